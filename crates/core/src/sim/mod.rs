//! Simulation driver and experiment sweeps.
//!
//! Provides the single-run driver that streams trace records through the cache
//! model, and the sweep that repeats it over a grid of configurations.

/// Experiment sweep over cache geometries and policies.
pub mod sweep;

/// Single-run simulation driver.
pub mod simulator;

pub use simulator::{Simulator, run, run_file};
pub use sweep::{Experiment, ExperimentReport, SweepPlan, SweepSummary};
