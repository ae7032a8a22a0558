//! The QLRU (quad-age LRU) policy family.
//!
//! Every way carries a 2-bit age, 0 = youngest, 3 = oldest. A concrete
//! policy is a quadruple of small functions: the hit-promotion table (H),
//! the insertion age for new lines (M), the victim scan order (R), and the
//! global age-update rule applied after every access (U). The named
//! variants measured on real parts compose these at profile load; any
//! other combination can be built with [`Qlru::new`].

use super::ReplacementPolicy;
use crate::cache::INVALID_TAG;

/// Hit-promotion table: new age as a function of the current age.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitUpdate {
    /// 0, 0, 0, 0
    H00,
    /// 0, 0, 0, 1
    H10,
    /// 0, 0, 1, 1
    H11,
    /// 0, 0, 0, 2
    H20,
    /// 0, 0, 1, 2
    H21,
}

impl HitUpdate {
    fn promote(self, age: u8) -> u8 {
        let table: [u8; 4] = match self {
            HitUpdate::H00 => [0, 0, 0, 0],
            HitUpdate::H10 => [0, 0, 0, 1],
            HitUpdate::H11 => [0, 0, 1, 1],
            HitUpdate::H20 => [0, 0, 0, 2],
            HitUpdate::H21 => [0, 0, 1, 2],
        };
        table[age as usize]
    }
}

/// Victim scan order on a miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VictimScan {
    /// Ascending scan; first empty or age-3 way wins, way 0 as fallback.
    R0,
    /// Same scan as [`VictimScan::R0`]; with the cold state fixed at age 3
    /// the two are indistinguishable, and the variant exists so profiles
    /// read like the measured policy names.
    R1,
    /// Descending scan; first empty or age-3 way wins, the last way as
    /// fallback.
    R2,
}

/// Global age-update rule, run after the hit or install with the touched
/// way as the exclusion candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeUpdate {
    /// Lift every way (touched included) by `3 - max_age`.
    U0,
    /// Lift every way except the touched one by `3 - max_age_of_others`.
    U1,
    /// Increment every way by one unless some way already sits at 3.
    U2,
    /// As [`AgeUpdate::U2`], but the touched way is skipped.
    U3,
}

impl AgeUpdate {
    fn normalize(self, ages: &mut [u8], touched: usize) {
        match self {
            AgeUpdate::U0 => {
                let max = ages.iter().copied().max().unwrap_or(3);
                let inc = 3 - max;
                if inc > 0 {
                    for age in ages.iter_mut() {
                        *age = (*age + inc).min(3);
                    }
                }
            }
            AgeUpdate::U1 => {
                let max = ages
                    .iter()
                    .enumerate()
                    .filter(|&(way, _)| way != touched)
                    .map(|(_, &age)| age)
                    .max()
                    .unwrap_or(3);
                let inc = 3 - max;
                if inc == 0 {
                    return;
                }
                for (way, age) in ages.iter_mut().enumerate() {
                    if way != touched {
                        *age = (*age + inc).min(3);
                    }
                }
            }
            AgeUpdate::U2 => {
                if ages.contains(&3) {
                    return;
                }
                for age in ages.iter_mut() {
                    *age = (*age + 1).min(3);
                }
            }
            AgeUpdate::U3 => {
                if ages.contains(&3) {
                    return;
                }
                for (way, age) in ages.iter_mut().enumerate() {
                    if way != touched {
                        *age = (*age + 1).min(3);
                    }
                }
            }
        }
    }
}

/// A composed QLRU policy.
pub struct Qlru {
    hit: HitUpdate,
    insert_age: u8,
    scan: VictimScan,
    update: AgeUpdate,
}

impl Qlru {
    /// Composes a policy from its four dimensions. `insert_age` is the age
    /// given to a freshly installed line and must be at most 3.
    pub fn new(hit: HitUpdate, insert_age: u8, scan: VictimScan, update: AgeUpdate) -> Self {
        debug_assert!(insert_age <= 3);
        Self {
            hit,
            insert_age,
            scan,
            update,
        }
    }
}

impl ReplacementPolicy for Qlru {
    fn cold_age(&self) -> u8 {
        // Every way starts at max age so the first victim is well-defined.
        3
    }

    fn select_victim(&self, tags: &[u64], ages: &[u8]) -> usize {
        let evictable = |&way: &usize| tags[way] == INVALID_TAG || ages[way] == 3;
        match self.scan {
            VictimScan::R0 | VictimScan::R1 => (0..tags.len()).find(evictable).unwrap_or(0),
            VictimScan::R2 => (0..tags.len())
                .rev()
                .find(evictable)
                .unwrap_or(tags.len() - 1),
        }
    }

    fn on_hit(&self, way: usize, ages: &mut [u8]) {
        ages[way] = self.hit.promote(ages[way]);
        self.update.normalize(ages, way);
    }

    fn on_miss(&self, way: usize, ages: &mut [u8]) {
        ages[way] = self.insert_age;
        self.update.normalize(ages, way);
    }
}
