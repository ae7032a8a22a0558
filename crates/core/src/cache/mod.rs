pub mod policies;

use self::policies::{AgeUpdate, HitUpdate, Mru, Qlru, ReplacementPolicy, TreePlru, VictimScan};
use crate::config::{LevelConfig, PolicyKind};

/// Tag value of an empty way, doubling as the "nothing evicted" marker.
///
/// Real tags are addresses shifted right by at least 12 bits, so they can
/// never collide with this sentinel.
pub const INVALID_TAG: u64 = u64::MAX;

/// Bits below the set index; lines are always 64 bytes.
const LINE_SHIFT: u32 = 6;

/// One cache level: a rectangular tag/age store plus the policy driving it.
///
/// State is sized exactly to the level's own profile and mutated only by
/// [`CacheLevel::access`]. The age bytes carry policy-defined meaning: a
/// 2-bit age for the QLRU family, a single protection bit for MRU, and for
/// Tree-PLRU the first byte of each set holds the packed decision tree.
pub struct CacheLevel {
    /// Hit latency in cycles.
    pub latency: u64,
    tags: Vec<u64>,
    ages: Vec<u8>,
    ways: usize,
    set_mask: u64,
    tag_shift: u32,
    policy: Box<dyn ReplacementPolicy>,
}

impl CacheLevel {
    /// Builds a cold level from a validated configuration.
    pub fn new(config: &LevelConfig) -> Self {
        let policy: Box<dyn ReplacementPolicy> = match config.policy {
            PolicyKind::TreePlru => Box::new(TreePlru::new(config.ways)),
            PolicyKind::QlruH11M1R0U0 => {
                Box::new(Qlru::new(HitUpdate::H11, 1, VictimScan::R0, AgeUpdate::U0))
            }
            PolicyKind::QlruH11M1R1U2 => {
                Box::new(Qlru::new(HitUpdate::H11, 1, VictimScan::R1, AgeUpdate::U2))
            }
            PolicyKind::QlruH00M1R2U1 => {
                Box::new(Qlru::new(HitUpdate::H00, 1, VictimScan::R2, AgeUpdate::U1))
            }
            PolicyKind::Mru | PolicyKind::MruN => Box::new(Mru),
        };

        Self {
            latency: config.latency,
            tags: vec![INVALID_TAG; config.sets * config.ways],
            ages: vec![policy.cold_age(); config.sets * config.ways],
            ways: config.ways,
            set_mask: (config.sets - 1) as u64,
            tag_shift: LINE_SHIFT + config.sets.trailing_zeros(),
            policy,
        }
    }

    /// Looks up `addr`, installing it on a miss.
    ///
    /// Returns `(hit, evicted_tag)`. The evicted tag is [`INVALID_TAG`] on
    /// a hit or when the victim way was still empty.
    pub fn access(&mut self, addr: u64) -> (bool, u64) {
        let set = ((addr >> LINE_SHIFT) & self.set_mask) as usize;
        let tag = addr >> self.tag_shift;
        let base = set * self.ways;
        let tags = &mut self.tags[base..base + self.ways];
        let ages = &mut self.ages[base..base + self.ways];

        for way in 0..tags.len() {
            if tags[way] == tag {
                self.policy.on_hit(way, ages);
                return (true, INVALID_TAG);
            }
        }

        let victim = self.policy.select_victim(tags, ages);
        let evicted = tags[victim];
        tags[victim] = tag;
        self.policy.on_miss(victim, ages);
        (false, evicted)
    }

    /// Whether the line holding `addr` is currently resident.
    ///
    /// Does not touch replacement state.
    pub fn contains(&self, addr: u64) -> bool {
        let set = ((addr >> LINE_SHIFT) & self.set_mask) as usize;
        let tag = addr >> self.tag_shift;
        let base = set * self.ways;
        self.tags[base..base + self.ways].contains(&tag)
    }

    /// Tags currently stored in `set`, in way order.
    ///
    /// Inspection hook for tests and tooling; [`INVALID_TAG`] marks empty
    /// ways.
    pub fn set_tags(&self, set: usize) -> &[u64] {
        let base = set * self.ways;
        &self.tags[base..base + self.ways]
    }

    /// Number of sets in this level.
    pub fn sets(&self) -> usize {
        self.set_mask as usize + 1
    }

    /// Associativity of this level.
    pub fn ways(&self) -> usize {
        self.ways
    }
}
