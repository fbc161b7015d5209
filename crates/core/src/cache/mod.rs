//! Set-Associative Cache Model.
//!
//! This module implements the line store and the lookup-or-install algorithm.
//! It holds no data: a line records only its tag, a stamp taken from the global
//! access counter, and whether it is valid. It provides:
//! 1. **Address decoding:** [`AddressCodec`] splits addresses into tag and set.
//! 2. **Line store:** [`CacheStore`] partitions `2^num_lines_exp` lines into
//!    contiguous sets of `2^set_assoc_exp` lines.
//! 3. **Replacement:** [`CacheStore::resolve`] decides hit or miss and, on a miss,
//!    which line to fill, using the configured [`ReplacementPolicy`].

/// Address decomposition into tag and set fields.
pub mod codec;

/// Cache replacement policy implementations (LRU, FIFO).
pub mod policies;

pub use self::codec::AddressCodec;
pub use self::policies::ReplacementPolicy;

use crate::common::error::{Result, SimError};
use crate::config::CacheConfig;

/// Cache line entry containing tag, stamp, and validity.
///
/// The stamp is the global access counter value of the install (FIFO) or of the
/// most recent access (LRU). It is meaningless while the line is invalid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Tag of the resident line.
    pub tag: u32,
    /// Access counter value used to order lines for eviction.
    pub stamp: u64,
    /// `false` until the line is first filled.
    pub valid: bool,
}

impl CacheLine {
    /// Returns `true` if the line is valid and holds `tag`.
    #[inline]
    pub const fn holds(&self, tag: u32) -> bool {
        self.valid && self.tag == tag
    }

    /// Installs `tag` with `stamp`, evicting whatever was resident.
    #[inline]
    pub const fn fill(&mut self, tag: u32, stamp: u64) {
        self.tag = tag;
        self.stamp = stamp;
        self.valid = true;
    }
}

/// The mutable array of cache lines, organized into sets.
///
/// Set `s` occupies lines `[s * ways, (s + 1) * ways)`.
#[derive(Debug)]
pub struct CacheStore {
    lines: Vec<CacheLine>,
    num_sets: usize,
    ways: usize,
    policy: Box<dyn ReplacementPolicy>,
}

impl CacheStore {
    /// Creates a store with every line empty.
    ///
    /// # Arguments
    ///
    /// * `config` - Validated cache configuration supplying the geometry and policy.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if the lines cannot be allocated.
    pub fn new(config: &CacheConfig) -> Result<Self> {
        let num_lines = config.num_lines();
        let mut lines = Vec::new();
        lines.try_reserve_exact(num_lines).map_err(|e| {
            SimError::config(format!("cannot allocate {num_lines} cache lines: {e}"))
        })?;
        lines.resize(num_lines, CacheLine::default());

        Ok(Self {
            lines,
            num_sets: config.num_sets(),
            ways: config.ways(),
            policy: policies::build(config.policy()),
        })
    }

    /// Resolves one access against the store.
    ///
    /// A one-way set is overwritten on every miss and re-stamped on every hit.
    /// Otherwise the set is scanned in way order: a matching line is a hit and the
    /// policy decides whether to refresh its stamp; with no match the line chosen
    /// by [`ReplacementPolicy::get_victim`] is filled with `tag` and `stamp`.
    ///
    /// # Arguments
    ///
    /// * `set` - Set index in `[0, num_sets)`.
    /// * `tag` - Tag of the accessed address.
    /// * `stamp` - Current value of the global access counter.
    ///
    /// # Returns
    ///
    /// `true` on a hit.
    ///
    /// # Panics
    ///
    /// Panics if `set >= num_sets`. Set indices produced by an [`AddressCodec`]
    /// built from the same configuration are always in range.
    pub fn resolve(&mut self, set: usize, tag: u32, stamp: u64) -> bool {
        let base = set * self.ways;
        let lines = &mut self.lines[base..base + self.ways];

        if let [line] = &mut *lines {
            let hit = line.holds(tag);
            line.fill(tag, stamp);
            return hit;
        }

        if let Some(line) = lines.iter_mut().find(|line| line.holds(tag)) {
            self.policy.update(line, stamp);
            return true;
        }

        let way = self.policy.get_victim(lines);
        lines[way].fill(tag, stamp);
        false
    }

    /// Checks whether `tag` is resident in `set` without touching any state.
    pub fn contains(&self, set: usize, tag: u32) -> bool {
        self.set_lines(set).iter().any(|line| line.holds(tag))
    }

    /// Returns the lines of one set, in way order.
    ///
    /// # Panics
    ///
    /// Panics if `set >= num_sets`.
    pub fn set_lines(&self, set: usize) -> &[CacheLine] {
        let base = set * self.ways;
        &self.lines[base..base + self.ways]
    }

    /// Returns every line, set by set.
    pub fn lines(&self) -> &[CacheLine] {
        &self.lines
    }

    /// Number of sets.
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Lines per set.
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Number of valid lines.
    pub fn occupancy(&self) -> usize {
        self.lines.iter().filter(|line| line.valid).count()
    }

    /// The replacement policy in use.
    pub fn policy(&self) -> &dyn ReplacementPolicy {
        self.policy.as_ref()
    }
}
