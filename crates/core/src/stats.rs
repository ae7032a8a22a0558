//! Aggregate simulation statistics.

/// Monotonic counters accumulated over a run.
///
/// Per-level hit/miss counters only count levels that were actually
/// consulted, so `l2_hits + l2_misses == l1_misses` and likewise for L3.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SimStats {
    pub accesses: u64,
    pub l1_hits: u64,
    pub l1_misses: u64,
    pub l2_hits: u64,
    pub l2_misses: u64,
    pub l3_hits: u64,
    pub l3_misses: u64,
    pub total_cycles: u64,
}

impl SimStats {
    /// L1 hit percentage over all accesses, truncated.
    pub fn l1_hit_rate(&self) -> u64 {
        percent(self.l1_hits, self.accesses)
    }

    /// L2 hit percentage over the accesses that reached L2, truncated.
    pub fn l2_hit_rate(&self) -> u64 {
        percent(self.l2_hits, self.l1_misses)
    }

    /// L3 hit percentage over the accesses that reached L3, truncated.
    pub fn l3_hit_rate(&self) -> u64 {
        percent(self.l3_hits, self.l2_misses)
    }

    /// Mean effective cycles per access, truncated.
    pub fn average_cycles(&self) -> u64 {
        if self.accesses == 0 {
            0
        } else {
            self.total_cycles / self.accesses
        }
    }

    /// Prints the end-of-run summary to stdout.
    pub fn print(&self) {
        println!();
        println!("[*] Simulation statistics");
        println!("    accesses     {:>12}", self.accesses);
        println!(
            "    L1 hits      {:>12}  ({}%)",
            self.l1_hits,
            self.l1_hit_rate()
        );
        println!("    L1 misses    {:>12}", self.l1_misses);
        println!(
            "    L2 hits      {:>12}  ({}%)",
            self.l2_hits,
            self.l2_hit_rate()
        );
        println!("    L2 misses    {:>12}", self.l2_misses);
        println!(
            "    L3 hits      {:>12}  ({}%)",
            self.l3_hits,
            self.l3_hit_rate()
        );
        println!("    L3 misses    {:>12}", self.l3_misses);
        println!("    total cycles {:>12}", self.total_cycles);
        println!("    avg cycles   {:>12}", self.average_cycles());
    }
}

/// Truncating integer percentage; 0 when the denominator is 0.
fn percent(part: u64, whole: u64) -> u64 {
    if whole == 0 {
        0
    } else {
        part * 100 / whole
    }
}
