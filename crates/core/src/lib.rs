//! Trace-driven cache simulator library.
//!
//! This crate replays a memory-access trace against a configurable cache model and
//! reports hit/miss statistics. It provides the following:
//! 1. **Cache:** Address decoding into tag/set fields, the line store, and LRU/FIFO replacement.
//! 2. **Configuration:** Validated cache geometry built from power-of-two exponents.
//! 3. **Trace:** Parsing of `<op> <hexaddr> <size>` trace files and canned trace generators.
//! 4. **Simulation:** The per-record driver plus a configuration sweep that emits CSV rows.
//! 5. **Statistics:** Hit counts, hit rate, and CSV/JSON result rendering.
//!
//! Loads and stores are scored identically. There is no dirty-bit, write-back,
//! timing, or multi-level modelling.

/// Address decoding, line store, and replacement policies.
pub mod cache;
/// Common types and constants (addresses, errors).
pub mod common;
/// Cache configuration (exponents, associativity, policy, validation).
pub mod config;
/// Simulation driver and experiment sweep.
pub mod sim;
/// Simulation result collection and reporting.
pub mod stats;
/// Trace file parsing and generation.
pub mod trace;

/// Validated cache configuration; build with `CacheConfig::new`.
pub use crate::config::CacheConfig;
/// Error type shared by every fallible operation in the crate.
pub use crate::common::error::{Result, SimError};
/// Step-wise simulator owning one cache store.
pub use crate::sim::Simulator;
/// Outcome of one simulation run.
pub use crate::stats::SimulationResult;
