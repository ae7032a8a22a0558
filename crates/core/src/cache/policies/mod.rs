/// A replacement policy, driving victim selection and age updates for one
/// cache level.
///
/// Policies are stateless values; the observable state lives in the level's
/// per-way age bytes, which are handed in as a slice covering exactly one
/// set. The way order of those slices is significant: several policies
/// break ties by scan position.
pub trait ReplacementPolicy {
    /// Age byte assigned to every way of an untouched set.
    fn cold_age(&self) -> u8;

    /// Picks the way to evict from a set with no matching tag.
    fn select_victim(&self, tags: &[u64], ages: &[u8]) -> usize;

    /// Rewrites ages after a hit at `way`.
    fn on_hit(&self, way: usize, ages: &mut [u8]);

    /// Rewrites ages after installing a new line at `way`.
    fn on_miss(&self, way: usize, ages: &mut [u8]);
}

pub use self::mru::Mru;
pub use self::plru::TreePlru;
pub use self::qlru::{AgeUpdate, HitUpdate, Qlru, VictimScan};

mod mru;
mod plru;
mod qlru;
