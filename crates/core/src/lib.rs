//! Cache hierarchy simulation engine.
//!
//! This crate models a three-level set-associative cache hierarchy (L1, L2,
//! L3) with the replacement policies measured on six Intel generations
//! (Nehalem through Coffee Lake). It coordinates the following:
//! 1. **Configuration:** Built-in CPU profiles plus TOML overrides.
//! 2. **Cache State:** Per-level tag and age arrays driven by pluggable
//!    replacement policies (Tree-PLRU, the QLRU family, MRU).
//! 3. **Access Walk:** L1 -> L2 -> L3 -> memory, short-circuiting on the
//!    first hit, with effective cycle accounting per access.
//! 4. **Statistics:** Monotonic counters and derived hit rates.
//!
//! The engine is single-threaded and performs no I/O of its own; trace
//! intake and result formatting live with the caller.

/// Per-level cache state and replacement policies.
pub mod cache;

/// CPU profiles, per-level parameters, and override handling.
pub mod config;

/// The three-level access driver.
pub mod hierarchy;

/// Aggregate counters and derived metrics.
pub mod stats;

/// Memory trace grammar and line reader.
pub mod trace;
