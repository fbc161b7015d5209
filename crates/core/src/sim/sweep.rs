//! Experiment sweep over cache geometries and policies.
//!
//! A [`SweepPlan`] is the cross product of cache size exponents, line size
//! exponents, associativities, and policies. Pairs whose line size is not
//! smaller than the cache size are dropped. Every remaining experiment runs
//! against its own freshly built cache over the same trace records, and each
//! successful run appends one CSV row to the results.
//!
//! An experiment whose geometry fails validation, or whose cache cannot be
//! allocated, is reported and skipped; the sweep carries on with the next one.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::{debug, warn};

use super::simulator;
use crate::common::error::{Result, SimError};
use crate::config::{Associativity, CacheConfig, ReplacementPolicy, defaults};
use crate::stats::{CSV_HEADER, SimulationResult};
use crate::trace::TraceRecord;

/// One point of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Experiment {
    /// Cache size exponent.
    pub cache_size_exp: u32,
    /// Line size exponent.
    pub line_size_exp: u32,
    /// Associativity tag.
    pub associativity: Associativity,
    /// Replacement policy.
    pub policy: ReplacementPolicy,
}

impl Experiment {
    /// Validates this point into a cache configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] for an invalid geometry.
    pub fn config(&self) -> Result<CacheConfig> {
        CacheConfig::new(
            self.cache_size_exp,
            self.line_size_exp,
            self.associativity,
            self.policy,
        )
    }
}

/// Grid of parameters to sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepPlan {
    /// Cache size exponents.
    pub cache_size_exps: Vec<u32>,
    /// Line size exponents.
    pub line_size_exps: Vec<u32>,
    /// Associativities.
    pub associativities: Vec<Associativity>,
    /// Replacement policies.
    pub policies: Vec<ReplacementPolicy>,
}

impl Default for SweepPlan {
    fn default() -> Self {
        Self {
            cache_size_exps: defaults::SWEEP_CACHE_SIZE_EXPS.to_vec(),
            line_size_exps: defaults::SWEEP_LINE_SIZE_EXPS.to_vec(),
            associativities: defaults::SWEEP_ASSOCIATIVITIES.to_vec(),
            policies: defaults::SWEEP_POLICIES.to_vec(),
        }
    }
}

impl SweepPlan {
    /// Size of the full cross product, before dropping line sizes that do not fit.
    pub fn total(&self) -> usize {
        self.cache_size_exps.len()
            * self.line_size_exps.len()
            * self.associativities.len()
            * self.policies.len()
    }

    /// Experiments to run, in nesting order cache size, line size, associativity, policy.
    pub fn experiments(&self) -> Vec<Experiment> {
        let mut out = Vec::with_capacity(self.total());
        for &cache_size_exp in &self.cache_size_exps {
            for &line_size_exp in &self.line_size_exps {
                if line_size_exp >= cache_size_exp {
                    continue;
                }
                for &associativity in &self.associativities {
                    for &policy in &self.policies {
                        out.push(Experiment {
                            cache_size_exp,
                            line_size_exp,
                            associativity,
                            policy,
                        });
                    }
                }
            }
        }
        out
    }

    /// Runs every experiment over `records`, writing the CSV header and one row
    /// per successful run to `out`.
    ///
    /// `on_report` is called after each experiment, in order.
    ///
    /// # Errors
    ///
    /// Propagates failures writing to `out`. Invalid experiments are not errors.
    pub fn run<W: Write>(
        &self,
        records: &[TraceRecord],
        out: &mut W,
        mut on_report: impl FnMut(&ExperimentReport),
    ) -> io::Result<SweepSummary> {
        writeln!(out, "{CSV_HEADER}")?;
        let experiments = self.experiments();
        let total = self.total();
        let mut summary = SweepSummary::default();

        for (i, experiment) in experiments.into_iter().enumerate() {
            let outcome = experiment
                .config()
                .and_then(|config| simulator::run(&config, records.iter().copied()));
            match &outcome {
                Ok(result) => {
                    writeln!(out, "{}", result.csv_row())?;
                    out.flush()?;
                    summary.completed += 1;
                }
                Err(e) => {
                    warn!(?experiment, "experiment skipped: {e}");
                    summary.failed += 1;
                }
            }
            on_report(&ExperimentReport {
                index: i + 1,
                total,
                experiment,
                outcome,
            });
        }

        debug!(completed = summary.completed, failed = summary.failed, "sweep complete");
        Ok(summary)
    }

    /// Runs the sweep and writes the results file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Output`] if the results file cannot be created or written.
    pub fn run_to_file(
        &self,
        records: &[TraceRecord],
        path: impl AsRef<Path>,
        on_report: impl FnMut(&ExperimentReport),
    ) -> Result<SweepSummary> {
        let path = path.as_ref();
        let output_error = |source: io::Error| SimError::Output {
            path: path.to_path_buf(),
            source,
        };
        let mut out = BufWriter::new(File::create(path).map_err(output_error)?);
        let summary = self.run(records, &mut out, on_report).map_err(output_error)?;
        out.flush().map_err(output_error)?;
        Ok(summary)
    }
}

/// Progress notification for one finished experiment.
#[derive(Debug)]
pub struct ExperimentReport {
    /// One-based position among the experiments run.
    pub index: usize,
    /// Size of the full cross product (see [`SweepPlan::total`]).
    pub total: usize,
    /// The experiment.
    pub experiment: Experiment,
    /// Its result, or why it could not run.
    pub outcome: Result<SimulationResult>,
}

/// Counts of experiments by outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepSummary {
    /// Experiments that produced a CSV row.
    pub completed: usize,
    /// Experiments rejected by validation or allocation.
    pub failed: usize,
}
