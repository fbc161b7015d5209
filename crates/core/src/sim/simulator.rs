//! Simulator: owns one cache store and the run's counters.
//!
//! Each access is decoded into `(tag, set)`, resolved against the store with the
//! current access counter as its stamp, and then the counter is advanced. The
//! counter is the only clock: it orders lines for LRU and FIFO eviction and
//! equals the number of accesses at the end of the run.

use std::path::Path;

use tracing::{debug, trace};

use crate::cache::{AddressCodec, CacheStore};
use crate::common::Addr;
use crate::common::error::Result;
use crate::config::CacheConfig;
use crate::stats::SimulationResult;
use crate::trace::{TraceReader, TraceRecord};

/// Top-level simulator: cache store, address codec, and running counters.
///
/// A simulator is built fresh for every run; its store is never shared.
#[derive(Debug)]
pub struct Simulator {
    config: CacheConfig,
    codec: AddressCodec,
    store: CacheStore,
    counter: u64,
    hits: u64,
}

impl Simulator {
    /// Creates a simulator with an empty cache.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SimError::InvalidConfiguration`] if the cache lines
    /// cannot be allocated.
    pub fn new(config: &CacheConfig) -> Result<Self> {
        debug!(
            cache_bytes = config.cache_bytes(),
            line_bytes = config.line_bytes(),
            associativity = %config.associativity_label(),
            policy = %config.policy(),
            tag_bits = config.tag_bits(),
            set_bits = config.num_sets_exp(),
            "simulator created"
        );
        Ok(Self {
            config: *config,
            codec: AddressCodec::new(config),
            store: CacheStore::new(config)?,
            counter: 0,
            hits: 0,
        })
    }

    /// Simulates one access to `addr`.
    ///
    /// # Returns
    ///
    /// `true` on a hit.
    pub fn access(&mut self, addr: Addr) -> bool {
        let (tag, set) = self.codec.decode(addr);
        let hit = self.store.resolve(set, tag, self.counter);
        trace!(%addr, tag, set, hit, "access");
        if hit {
            self.hits += 1;
        }
        self.counter += 1;
        hit
    }

    /// Simulates one trace record. The access kind and size are ignored.
    pub fn step(&mut self, record: &TraceRecord) -> bool {
        self.access(record.addr)
    }

    /// Accesses simulated so far.
    pub const fn accesses(&self) -> u64 {
        self.counter
    }

    /// Hits so far.
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    /// The configuration this simulator was built for.
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// The cache store.
    pub const fn store(&self) -> &CacheStore {
        &self.store
    }

    /// The address codec.
    pub const fn codec(&self) -> &AddressCodec {
        &self.codec
    }

    /// Snapshot of the counters as a result.
    pub fn result(&self) -> SimulationResult {
        SimulationResult::new(&self.config, self.hits, self.counter)
    }
}

/// Runs `records` in order against a fresh cache built from `config`.
///
/// # Errors
///
/// Returns [`crate::SimError::InvalidConfiguration`] if the cache lines cannot
/// be allocated.
pub fn run(
    config: &CacheConfig,
    records: impl IntoIterator<Item = TraceRecord>,
) -> Result<SimulationResult> {
    let mut sim = Simulator::new(config)?;
    for record in records {
        let _ = sim.step(&record);
    }
    let result = sim.result();
    debug!(hits = result.hits, accesses = result.accesses, "run complete");
    Ok(result)
}

/// Streams the trace file at `path` through a fresh cache built from `config`.
///
/// # Errors
///
/// Returns [`crate::SimError::TraceFileUnavailable`] if the file cannot be
/// opened, [`crate::SimError::TraceRead`] if reading fails part-way, and
/// [`crate::SimError::InvalidConfiguration`] if the cache cannot be allocated.
pub fn run_file(config: &CacheConfig, path: impl AsRef<Path>) -> Result<SimulationResult> {
    let mut sim = Simulator::new(config)?;
    let mut reader = TraceReader::open(path)?;
    for record in reader.by_ref() {
        let _ = sim.step(&record?);
    }
    let result = sim.result();
    debug!(
        hits = result.hits,
        accesses = result.accesses,
        skipped = reader.skipped(),
        "run complete"
    );
    Ok(result)
}
