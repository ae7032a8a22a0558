//! Memory trace intake.
//!
//! One record per line:
//!
//! ```text
//! ('R' | 'W') ' ' ('0x')? HEX{1..16}
//! ```
//!
//! Surrounding whitespace (carriage returns included) is tolerated and hex
//! digits may be either case. Lines that do not match the grammar are
//! silently skipped; end of input ends the stream, and a trailing line
//! without a newline is still accepted.

use std::io::BufRead;

/// A single parsed trace record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    pub write: bool,
    pub address: u64,
}

/// Parses one trace line, returning `None` for anything malformed.
pub fn parse_line(line: &str) -> Option<Access> {
    let mut fields = line.split_ascii_whitespace();
    let op = fields.next()?;
    let addr = fields.next()?;
    if fields.next().is_some() {
        return None;
    }

    let write = match op {
        "R" => false,
        "W" => true,
        _ => return None,
    };

    let digits = addr.strip_prefix("0x").unwrap_or(addr);
    if digits.is_empty() || digits.len() > 16 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let address = u64::from_str_radix(digits, 16).ok()?;

    Some(Access { write, address })
}

/// Streams well-formed records out of any buffered reader.
pub struct TraceReader<R> {
    input: R,
    line: String,
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            line: String::new(),
        }
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Access;

    /// Next well-formed record. Read failures end the stream like EOF.
    fn next(&mut self) -> Option<Access> {
        loop {
            self.line.clear();
            match self.input.read_line(&mut self.line) {
                Ok(0) | Err(_) => return None,
                Ok(_) => {
                    if let Some(access) = parse_line(&self.line) {
                        return Some(access);
                    }
                }
            }
        }
    }
}
