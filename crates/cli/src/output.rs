//! Banner and per-access row formatting.
//!
//! The default output is a fixed-width table meant for eyeballing short
//! traces; `--csv` switches the rows to a machine-readable form. Both share
//! the same column set: per-level outcome, per-level cycles, per-level
//! evicted tag, and the effective total.

use std::io::{self, Write};

use cache_core::cache::INVALID_TAG;
use cache_core::config::Config;
use cache_core::hierarchy::{AccessResult, LevelOutcome, LevelResult};

/// Prints the resolved profile before the first access.
pub fn banner<W: Write>(out: &mut W, config: &Config) -> io::Result<()> {
    writeln!(out, "[*] CPU: {}", config.cpu.name())?;
    for (name, level) in [("L1", &config.l1), ("L2", &config.l2), ("L3", &config.l3)] {
        writeln!(
            out,
            "    {}: {:>4} sets x {:>2} ways  {:>3} cycles  {}",
            name,
            level.sets,
            level.ways,
            level.latency,
            level.policy.name()
        )?;
    }
    writeln!(out, "    memory: {} cycles", config.memory_latency)
}

/// Prints the column header for the chosen row format.
pub fn header<W: Write>(out: &mut W, csv: bool) -> io::Result<()> {
    if csv {
        writeln!(
            out,
            "address,op,l1,l1_cycles,l1_evicted,l2,l2_cycles,l2_evicted,\
             l3,l3_cycles,l3_evicted,total_cycles"
        )
    } else {
        writeln!(
            out,
            "{:<18} op  {:<9} {:<9} {:<9} total",
            "address", "L1", "L2", "L3"
        )
    }
}

/// Prints one per-access row.
pub fn row<W: Write>(out: &mut W, csv: bool, result: &AccessResult) -> io::Result<()> {
    let op = if result.write { 'W' } else { 'R' };
    if csv {
        writeln!(
            out,
            "{:#x},{},{},{},{},{},{},{},{},{},{},{}",
            result.address,
            op,
            outcome(result.l1.outcome),
            result.l1.cycles,
            tag(result.l1.evicted),
            outcome(result.l2.outcome),
            result.l2.cycles,
            tag(result.l2.evicted),
            outcome(result.l3.outcome),
            result.l3.cycles,
            tag(result.l3.evicted),
            result.total_cycles
        )
    } else {
        writeln!(
            out,
            "{:#018x} {}   {:<9} {:<9} {:<9} {:>5}{}",
            result.address,
            op,
            cell(&result.l1),
            cell(&result.l2),
            cell(&result.l3),
            result.total_cycles,
            evictions(result)
        )
    }
}

fn outcome(outcome: LevelOutcome) -> &'static str {
    match outcome {
        LevelOutcome::Hit => "HIT",
        LevelOutcome::Miss => "MISS",
        LevelOutcome::NotAccessed => "-",
    }
}

fn tag(tag_value: u64) -> String {
    if tag_value == INVALID_TAG {
        "-".into()
    } else {
        format!("{:#x}", tag_value)
    }
}

/// Table cell: outcome plus the cycles charged to that level.
fn cell(level: &LevelResult) -> String {
    match level.outcome {
        LevelOutcome::Hit => format!("HIT @{}", level.cycles),
        LevelOutcome::Miss => "MISS".into(),
        LevelOutcome::NotAccessed => "-".into(),
    }
}

/// Table-row suffix listing any live lines displaced by this access.
fn evictions(result: &AccessResult) -> String {
    let mut parts = Vec::new();
    for (name, level) in [("L1", &result.l1), ("L2", &result.l2), ("L3", &result.l3)] {
        if level.evicted != INVALID_TAG {
            parts.push(format!("{}={:#x}", name, level.evicted));
        }
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!("  evicted[{}]", parts.join(" "))
    }
}
