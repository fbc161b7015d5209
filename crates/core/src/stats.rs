//! Simulation result collection and reporting.
//!
//! This module holds the outcome of one run. It provides:
//! 1. **Counts:** Hits, accesses, and misses.
//! 2. **Hit rate:** `hits / accesses`, defined as `0.0` for an empty trace.
//! 3. **Rendering:** The CSV row consumed by sweeps, a JSON object, and a
//!    one-line human summary.

use std::fmt;

use serde::Serialize;

use crate::common::error::Result;
use crate::config::{CacheConfig, ReplacementPolicy};

/// Header line of every results CSV.
pub const CSV_HEADER: &str = "CacheSize,LineSize,Associativity,Policy,Hits,Accesses,HitRate";

/// Outcome of one simulation run, tagged with the configuration that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    /// Cache size in bytes.
    pub cache_bytes: u64,
    /// Line size in bytes.
    pub line_bytes: u64,
    /// `direct`, `fully`, or `<ways>way`.
    pub associativity: String,
    /// Replacement policy.
    pub policy: ReplacementPolicy,
    /// Accesses that hit.
    pub hits: u64,
    /// Trace records processed (skipped lines excluded).
    pub accesses: u64,
    /// `hits / accesses`, or `0.0` when nothing was accessed.
    pub hit_rate: f64,
}

impl SimulationResult {
    /// Builds a result for `config` from the final counters.
    pub fn new(config: &CacheConfig, hits: u64, accesses: u64) -> Self {
        let hit_rate = if accesses == 0 {
            0.0
        } else {
            hits as f64 / accesses as f64
        };
        Self {
            cache_bytes: config.cache_bytes(),
            line_bytes: config.line_bytes(),
            associativity: config.associativity_label(),
            policy: config.policy(),
            hits,
            accesses,
            hit_rate,
        }
    }

    /// Accesses that missed.
    pub const fn misses(&self) -> u64 {
        self.accesses - self.hits
    }

    /// Renders the CSV row matching [`CSV_HEADER`], hit rate to four decimals.
    pub fn csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{:.4}",
            self.cache_bytes,
            self.line_bytes,
            self.associativity,
            self.policy.label(),
            self.hits,
            self.accesses,
            self.hit_rate
        )
    }

    /// Renders the result as a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SimError::Serialization`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hits {} accesses {} hit rate {}",
            self.hits, self.accesses, self.hit_rate
        )
    }
}
