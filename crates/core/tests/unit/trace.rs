//! Trace grammar unit tests.

use std::io::Cursor;

use cache_core::trace::{parse_line, Access, TraceReader};

#[test]
fn parses_reads_and_writes() {
    assert_eq!(
        parse_line("R 0x1000"),
        Some(Access {
            write: false,
            address: 0x1000
        })
    );
    assert_eq!(
        parse_line("W 0x2000"),
        Some(Access {
            write: true,
            address: 0x2000
        })
    );
}

#[test]
fn hex_prefix_is_optional() {
    assert_eq!(parse_line("R 1000"), parse_line("R 0x1000"));
}

#[test]
fn hex_digits_are_case_insensitive() {
    assert_eq!(parse_line("R 0xABCDEF"), parse_line("R 0xabcdef"));
    assert_eq!(parse_line("R 0xAbCdEf").unwrap().address, 0xABCDEF);
}

#[test]
fn surrounding_whitespace_is_tolerated() {
    assert_eq!(parse_line("  R 0x10  "), parse_line("R 0x10"));
    assert_eq!(parse_line("R 0x10\r\n"), parse_line("R 0x10"));
    assert_eq!(parse_line("R\t0x10"), parse_line("R 0x10"));
}

#[test]
fn sixteen_digits_fit_exactly() {
    assert_eq!(
        parse_line("R 0xFFFFFFFFFFFFFFFF").unwrap().address,
        u64::MAX
    );
    assert_eq!(parse_line("R 0xFFFFFFFFFFFFFFFFF"), None); // 17 digits
}

#[test]
fn malformed_lines_are_rejected() {
    for line in [
        "",
        "   ",
        "GARBAGE",
        "R",
        "R 0x",
        "R 0xG1",
        "r 0x10",
        "X 0x10",
        "R 0x10 extra",
        "R0x10",
    ] {
        assert_eq!(parse_line(line), None, "accepted {:?}", line);
    }
}

#[test]
fn reader_skips_malformed_lines() {
    let input = Cursor::new("R 0x1000\nGARBAGE\n\nW 0x2000\n");
    let records: Vec<Access> = TraceReader::new(input).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].address, 0x1000);
    assert!(records[1].write);
}

#[test]
fn trailing_partial_line_is_accepted() {
    let input = Cursor::new("R 0x1000\nW 0x2000");
    let records: Vec<Access> = TraceReader::new(input).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].address, 0x2000);
}

#[test]
fn empty_input_yields_no_records() {
    let input = Cursor::new("");
    assert_eq!(TraceReader::new(input).count(), 0);
}
