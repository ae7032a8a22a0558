//! The three-level access driver.
//!
//! Walks each access through L1, L2 and L3 in order, stopping at the first
//! hit; anything that misses all three is charged the flat memory penalty.
//! Levels fill independently: a level installs a line only on its own miss,
//! and neither hits nor misses propagate fills to the other levels.

use crate::cache::{CacheLevel, INVALID_TAG};
use crate::config::Config;
use crate::stats::SimStats;

/// What happened at one cache level during a single access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelOutcome {
    Hit,
    Miss,
    /// A higher level already served the access.
    NotAccessed,
}

/// Per-level slice of an access result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelResult {
    pub outcome: LevelOutcome,
    /// Cycles charged to this level: its hit latency when it served the
    /// access, 0 otherwise.
    pub cycles: u64,
    /// Tag displaced by the install on a miss; [`INVALID_TAG`] when the
    /// victim way was empty or no install happened.
    pub evicted: u64,
}

impl LevelResult {
    fn skipped() -> Self {
        Self {
            outcome: LevelOutcome::NotAccessed,
            cycles: 0,
            evicted: INVALID_TAG,
        }
    }
}

/// Everything observable about a single access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessResult {
    pub address: u64,
    /// Whether the trace record was a write. Reads and writes behave
    /// identically; the flag is carried through for the output only.
    pub write: bool,
    pub l1: LevelResult,
    pub l2: LevelResult,
    pub l3: LevelResult,
    /// Effective cycle cost of the whole access.
    pub total_cycles: u64,
}

/// The simulated hierarchy: three independent levels plus the counters.
pub struct Hierarchy {
    pub l1: CacheLevel,
    pub l2: CacheLevel,
    pub l3: CacheLevel,
    memory_latency: u64,
    pub stats: SimStats,
}

impl Hierarchy {
    /// Builds a cold hierarchy from a validated configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            l1: CacheLevel::new(&config.l1),
            l2: CacheLevel::new(&config.l2),
            l3: CacheLevel::new(&config.l3),
            memory_latency: config.memory_latency,
            stats: SimStats::default(),
        }
    }

    /// Runs one access through the hierarchy and updates the counters.
    pub fn access(&mut self, write: bool, address: u64) -> AccessResult {
        self.stats.accesses += 1;

        let mut result = AccessResult {
            address,
            write,
            l1: LevelResult::skipped(),
            l2: LevelResult::skipped(),
            l3: LevelResult::skipped(),
            total_cycles: 0,
        };

        let (hit, evicted) = self.l1.access(address);
        if hit {
            self.stats.l1_hits += 1;
            result.l1 = LevelResult {
                outcome: LevelOutcome::Hit,
                cycles: self.l1.latency,
                evicted: INVALID_TAG,
            };
            return self.finish(result, self.l1.latency);
        }
        self.stats.l1_misses += 1;
        result.l1 = LevelResult {
            outcome: LevelOutcome::Miss,
            cycles: 0,
            evicted,
        };

        let (hit, evicted) = self.l2.access(address);
        if hit {
            self.stats.l2_hits += 1;
            result.l2 = LevelResult {
                outcome: LevelOutcome::Hit,
                cycles: self.l2.latency,
                evicted: INVALID_TAG,
            };
            return self.finish(result, self.l2.latency);
        }
        self.stats.l2_misses += 1;
        result.l2 = LevelResult {
            outcome: LevelOutcome::Miss,
            cycles: 0,
            evicted,
        };

        let (hit, evicted) = self.l3.access(address);
        if hit {
            self.stats.l3_hits += 1;
            result.l3 = LevelResult {
                outcome: LevelOutcome::Hit,
                cycles: self.l3.latency,
                evicted: INVALID_TAG,
            };
            return self.finish(result, self.l3.latency);
        }
        self.stats.l3_misses += 1;
        result.l3 = LevelResult {
            outcome: LevelOutcome::Miss,
            cycles: 0,
            evicted,
        };

        self.finish(result, self.memory_latency)
    }

    fn finish(&mut self, mut result: AccessResult, cycles: u64) -> AccessResult {
        result.total_cycles = cycles;
        self.stats.total_cycles += cycles;
        result
    }
}
