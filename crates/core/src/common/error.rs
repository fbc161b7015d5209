//! Simulator error definitions.
//!
//! This module defines the error taxonomy for the simulator. It provides:
//! 1. **Configuration Errors:** Geometry or tag values that violate the cache invariants.
//! 2. **Trace Errors:** Unreadable trace files and malformed trace lines.
//! 3. **Output Errors:** Failures writing generated traces or sweep results.
//!
//! Configuration errors are raised before any trace record is processed. Malformed
//! trace lines are skipped by the reader and never abort a run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while configuring or running a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// Cache, line, associativity, or policy parameters violate the geometry invariants.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A trace line could not be turned into a record.
    ///
    /// The trace reader logs and skips these; they are surfaced only by the
    /// single-line parser.
    #[error("malformed trace line {line}: {reason}")]
    MalformedTraceLine {
        /// One-based line number within the trace.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// The trace file could not be opened for reading.
    #[error("could not open trace file '{}': {source}", .path.display())]
    TraceFileUnavailable {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// Reading the trace failed part-way through.
    #[error("failed reading trace '{}': {source}", .path.display())]
    TraceRead {
        /// Path (or label) of the trace being read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// A generated trace or results file could not be written.
    #[error("could not write '{}': {source}", .path.display())]
    Output {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// A configuration document or result could not be (de)serialized.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SimError {
    /// Shorthand for building an [`SimError::InvalidConfiguration`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Returns `true` if the error must abort the run.
    ///
    /// Only malformed trace lines are recoverable.
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::MalformedTraceLine { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SimError>;
