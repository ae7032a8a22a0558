//! Configuration system for the cache hierarchy simulator.
//!
//! This module defines everything needed to parameterize a simulation run:
//! 1. **CPU Profiles:** Built-in set/way/latency/policy tables for the six
//!    supported Intel generations.
//! 2. **Selectors:** Short and long command-line names mapping to a profile.
//! 3. **Overrides:** Optional TOML-supplied overrides for any level
//!    parameter and the memory penalty.
//! 4. **Validation:** Structural checks performed once at startup so the
//!    per-access path never has to.

use serde::Deserialize;
use thiserror::Error;

/// Default configuration constants.
mod defaults {
    /// Cycle cost of an access that misses every cache level.
    ///
    /// Charged in full to the access; the miss lookups along the way
    /// contribute nothing on top.
    pub const MEMORY_LATENCY: u64 = 200;
}

/// The supported CPU generations.
///
/// Each generation carries a fixed three-level profile; see
/// [`Config::for_cpu`] for the exact parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CpuModel {
    /// Nehalem (2008): Tree-PLRU L1/L2, MRU L3.
    Nehalem,
    /// Sandy Bridge (2011): Tree-PLRU L1/L2, MRU_N L3.
    SandyBridge,
    /// Ivy Bridge (2012): first generation with a quad-age L3.
    IvyBridge,
    /// Haswell (2013): quad-age policies on both L2 and L3.
    Haswell,
    /// Skylake (2015): narrow 4-way L2, slower L3.
    Skylake,
    /// Coffee Lake (2017). The default model.
    #[default]
    CoffeeLake,
}

impl CpuModel {
    /// Resolves a command-line selector to a model.
    ///
    /// Accepts the short mnemonic or the full lowercase name of each
    /// generation. Returns `None` for anything else; callers are expected
    /// to fall back to [`CpuModel::default`].
    pub fn from_selector(selector: &str) -> Option<CpuModel> {
        match selector.to_ascii_lowercase().as_str() {
            "nhm" | "nehalem" => Some(CpuModel::Nehalem),
            "snb" | "sandybridge" => Some(CpuModel::SandyBridge),
            "ivb" | "ivybridge" => Some(CpuModel::IvyBridge),
            "hsw" | "haswell" => Some(CpuModel::Haswell),
            "skl" | "skylake" => Some(CpuModel::Skylake),
            "cfl" | "coffeelake" => Some(CpuModel::CoffeeLake),
            _ => None,
        }
    }

    /// Human-readable model name, as shown in the banner.
    pub fn name(self) -> &'static str {
        match self {
            CpuModel::Nehalem => "Nehalem",
            CpuModel::SandyBridge => "Sandy Bridge",
            CpuModel::IvyBridge => "Ivy Bridge",
            CpuModel::Haswell => "Haswell",
            CpuModel::Skylake => "Skylake",
            CpuModel::CoffeeLake => "Coffee Lake",
        }
    }
}

/// Replacement policy selector for one cache level.
///
/// The QLRU variants are named after their measured parameter quadruple:
/// hit-promotion table (H), insertion age (M), victim scan order (R), and
/// global age-update rule (U).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PolicyKind {
    /// Binary tree of pseudo-LRU direction bits.
    #[serde(rename = "PLRU", alias = "Plru", alias = "TreePlru")]
    TreePlru,
    /// Quad-age LRU as found on the Coffee Lake L3.
    #[serde(rename = "QLRU_H11_M1_R0_U0")]
    QlruH11M1R0U0,
    /// Quad-age LRU as found on Ivy Bridge, Haswell and Skylake L3.
    #[serde(rename = "QLRU_H11_M1_R1_U2")]
    QlruH11M1R1U2,
    /// Quad-age LRU as found on the L2 from Haswell onward.
    #[serde(rename = "QLRU_H00_M1_R2_U1")]
    QlruH00M1R2U1,
    /// One-bit most-recently-used protection (Nehalem L3).
    #[serde(rename = "MRU", alias = "Mru")]
    Mru,
    /// Sandy Bridge L3 variant of [`PolicyKind::Mru`]; behaves identically
    /// here (see `policies::mru`).
    #[serde(rename = "MRU_N", alias = "MruN")]
    MruN,
}

impl PolicyKind {
    /// Policy name, as shown in the banner and CSV output.
    pub fn name(self) -> &'static str {
        match self {
            PolicyKind::TreePlru => "Tree-PLRU",
            PolicyKind::QlruH11M1R0U0 => "QLRU_H11_M1_R0_U0",
            PolicyKind::QlruH11M1R1U2 => "QLRU_H11_M1_R1_U2",
            PolicyKind::QlruH00M1R2U1 => "QLRU_H00_M1_R2_U1",
            PolicyKind::Mru => "MRU",
            PolicyKind::MruN => "MRU_N",
        }
    }
}

/// Parameters of a single cache level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelConfig {
    /// Number of sets. Must be a power of two.
    pub sets: usize,
    /// Associativity (ways per set).
    pub ways: usize,
    /// Hit latency in cycles.
    pub latency: u64,
    /// Replacement policy driving this level.
    pub policy: PolicyKind,
}

impl LevelConfig {
    const fn new(sets: usize, ways: usize, latency: u64, policy: PolicyKind) -> Self {
        Self {
            sets,
            ways,
            latency,
            policy,
        }
    }
}

/// Full simulation configuration: one profile, resolved and mutable until
/// the hierarchy is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// The model this configuration was derived from.
    pub cpu: CpuModel,
    /// Cycle cost of an access served by memory.
    pub memory_latency: u64,
    /// L1 data cache parameters.
    pub l1: LevelConfig,
    /// Unified L2 parameters.
    pub l2: LevelConfig,
    /// Shared L3 parameters.
    pub l3: LevelConfig,
}

impl Config {
    /// Builds the measured profile for `cpu`.
    ///
    /// The L1 is identical across all six generations; the L2 and L3 tables
    /// are where the generations differ.
    pub fn for_cpu(cpu: CpuModel) -> Self {
        use PolicyKind::*;

        let l1 = LevelConfig::new(64, 8, 4, TreePlru);
        let (l2, l3) = match cpu {
            CpuModel::Nehalem => (
                LevelConfig::new(512, 8, 12, TreePlru),
                LevelConfig::new(4096, 16, 40, Mru),
            ),
            CpuModel::SandyBridge => (
                LevelConfig::new(512, 8, 12, TreePlru),
                LevelConfig::new(2048, 16, 36, MruN),
            ),
            CpuModel::IvyBridge => (
                LevelConfig::new(512, 8, 12, TreePlru),
                LevelConfig::new(2048, 16, 36, QlruH11M1R1U2),
            ),
            CpuModel::Haswell => (
                LevelConfig::new(512, 8, 12, QlruH00M1R2U1),
                LevelConfig::new(2048, 16, 36, QlruH11M1R1U2),
            ),
            CpuModel::Skylake => (
                LevelConfig::new(1024, 4, 12, QlruH00M1R2U1),
                LevelConfig::new(2048, 16, 42, QlruH11M1R1U2),
            ),
            CpuModel::CoffeeLake => (
                LevelConfig::new(512, 8, 12, QlruH00M1R2U1),
                LevelConfig::new(2048, 16, 42, QlruH11M1R0U0),
            ),
        };

        Self {
            cpu,
            memory_latency: defaults::MEMORY_LATENCY,
            l1,
            l2,
            l3,
        }
    }

    /// Applies TOML-supplied overrides on top of the built-in profile.
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(latency) = overrides.memory_latency {
            self.memory_latency = latency;
        }
        for (level, ov) in [
            (&mut self.l1, &overrides.l1),
            (&mut self.l2, &overrides.l2),
            (&mut self.l3, &overrides.l3),
        ] {
            if let Some(sets) = ov.sets {
                level.sets = sets;
            }
            if let Some(ways) = ov.ways {
                level.ways = ways;
            }
            if let Some(latency) = ov.latency {
                level.latency = latency;
            }
            if let Some(policy) = ov.policy {
                level.policy = policy;
            }
        }
    }

    /// Checks the structural constraints the cache arrays rely on.
    ///
    /// Runs once at startup; after it passes, every set index and way index
    /// produced during simulation is in range by construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, level) in [("L1", &self.l1), ("L2", &self.l2), ("L3", &self.l3)] {
            if level.sets == 0 || !level.sets.is_power_of_two() {
                return Err(ConfigError::SetsNotPowerOfTwo {
                    level: name,
                    sets: level.sets,
                });
            }
            if level.ways == 0 {
                return Err(ConfigError::ZeroWays { level: name });
            }
            if level.policy == PolicyKind::TreePlru
                && (level.ways > 8 || !level.ways.is_power_of_two())
            {
                // The PLRU tree lives in a single byte per set.
                return Err(ConfigError::PlruWays {
                    level: name,
                    ways: level.ways,
                });
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::for_cpu(CpuModel::default())
    }
}

/// Optional overrides, deserialized from a TOML file.
///
/// Every field is optional; anything absent keeps the profile value.
///
/// ```toml
/// memory_latency = 150
///
/// [l2]
/// latency = 14
/// policy = "PLRU"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Overrides {
    /// Memory penalty override.
    #[serde(default)]
    pub memory_latency: Option<u64>,

    /// L1 parameter overrides.
    #[serde(default)]
    pub l1: LevelOverrides,

    /// L2 parameter overrides.
    #[serde(default)]
    pub l2: LevelOverrides,

    /// L3 parameter overrides.
    #[serde(default)]
    pub l3: LevelOverrides,
}

/// Per-level portion of [`Overrides`].
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct LevelOverrides {
    /// Set count override. Must be a power of two.
    #[serde(default)]
    pub sets: Option<usize>,

    /// Associativity override.
    #[serde(default)]
    pub ways: Option<usize>,

    /// Hit latency override.
    #[serde(default)]
    pub latency: Option<u64>,

    /// Replacement policy override.
    #[serde(default)]
    pub policy: Option<PolicyKind>,
}

/// Structural configuration errors reported at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Set counts feed a bit-mask index; anything but a power of two breaks
    /// the mapping.
    #[error("{level}: set count {sets} is not a power of two")]
    SetsNotPowerOfTwo {
        /// Level name.
        level: &'static str,
        /// Offending set count.
        sets: usize,
    },

    /// A cache level needs at least one way.
    #[error("{level}: associativity must be at least 1")]
    ZeroWays {
        /// Level name.
        level: &'static str,
    },

    /// The Tree-PLRU state is a single byte per set, which limits it to
    /// eight ways.
    #[error("{level}: Tree-PLRU supports a power-of-two way count up to 8, got {ways}")]
    PlruWays {
        /// Level name.
        level: &'static str,
        /// Offending way count.
        ways: usize,
    },
}
