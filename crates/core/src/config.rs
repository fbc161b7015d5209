//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures and enums used to parameterize
//! a simulation run. It provides:
//! 1. **Defaults:** Baseline sweep ranges and trace-generation parameters.
//! 2. **Enums:** Associativity tags and replacement policies, parsed case-insensitively.
//! 3. **Validation:** [`CacheConfig`] derives the line/set/tag widths and rejects
//!    geometries that violate the cache invariants before any trace is read.
//!
//! Configuration comes from command-line parameters or a JSON document
//! (see [`CacheConfig::from_json`]).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::constants::{ADDRESS_BITS, MAX_CACHE_SIZE_EXP};
use crate::common::error::{Result, SimError};

/// Default parameters for trace generation and experiment sweeps.
pub mod defaults {
    use super::{Associativity, ReplacementPolicy};

    /// Cache size exponents swept by default (256 B to 2 KiB).
    pub const SWEEP_CACHE_SIZE_EXPS: [u32; 4] = [8, 9, 10, 11];

    /// Line size exponents swept by default (16 B to 64 B).
    pub const SWEEP_LINE_SIZE_EXPS: [u32; 3] = [4, 5, 6];

    /// Associativities swept by default.
    pub const SWEEP_ASSOCIATIVITIES: [Associativity; 4] = [
        Associativity::Direct,
        Associativity::TwoWay,
        Associativity::FourWay,
        Associativity::Fully,
    ];

    /// Replacement policies swept by default.
    pub const SWEEP_POLICIES: [ReplacementPolicy; 2] =
        [ReplacementPolicy::Lru, ReplacementPolicy::Fifo];

    /// Trace file read by the sweep and written by the generator.
    pub const TRACE_FILE: &str = "trace.txt";

    /// Results file written by the sweep.
    pub const RESULTS_FILE: &str = "results.csv";

    /// Number of records a generated trace contains.
    pub const TRACE_LENGTH: usize = 1000;

    /// Seed for the random trace pattern.
    pub const TRACE_SEED: u64 = 123456789;
}

/// Cache associativity as named on the command line and in sweeps.
///
/// Each tag maps to a set-associativity exponent; `Fully` resolves to the
/// line-count exponent of the cache it is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Associativity {
    /// One line per set.
    #[serde(rename = "direct")]
    Direct,
    /// Two lines per set.
    #[serde(rename = "2way")]
    TwoWay,
    /// Four lines per set.
    #[serde(rename = "4way")]
    FourWay,
    /// Eight lines per set.
    #[serde(rename = "8way")]
    EightWay,
    /// Sixteen lines per set.
    #[serde(rename = "16way")]
    SixteenWay,
    /// A single set holding every line.
    #[serde(rename = "fully")]
    Fully,
}

impl Associativity {
    /// Every associativity tag, in increasing way count.
    pub const ALL: [Self; 6] = [
        Self::Direct,
        Self::TwoWay,
        Self::FourWay,
        Self::EightWay,
        Self::SixteenWay,
        Self::Fully,
    ];

    /// Returns the tag used on the command line.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::TwoWay => "2way",
            Self::FourWay => "4way",
            Self::EightWay => "8way",
            Self::SixteenWay => "16way",
            Self::Fully => "fully",
        }
    }

    /// Resolves the set-associativity exponent for a cache with `2^num_lines_exp` lines.
    pub const fn set_assoc_exp(self, num_lines_exp: u32) -> u32 {
        match self {
            Self::Direct => 0,
            Self::TwoWay => 1,
            Self::FourWay => 2,
            Self::EightWay => 3,
            Self::SixteenWay => 4,
            Self::Fully => num_lines_exp,
        }
    }
}

impl FromStr for Associativity {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SimError::config(format!("unknown associativity: {s}")))
    }
}

impl fmt::Display for Associativity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Cache replacement policy algorithms.
///
/// Both policies evict the line with the smallest stamp; they differ only in
/// whether a hit refreshes that stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplacementPolicy {
    /// Least Recently Used: hits refresh the line's stamp.
    #[default]
    #[serde(alias = "LRU", alias = "Lru")]
    Lru,
    /// First In First Out: stamps are set on install only.
    #[serde(alias = "FIFO", alias = "Fifo")]
    Fifo,
}

impl ReplacementPolicy {
    /// Returns the label used in CSV output (`LRU` or `FIFO`).
    pub const fn label(self) -> &'static str {
        match self {
            Self::Lru => "LRU",
            Self::Fifo => "FIFO",
        }
    }

    /// Returns the tag used on the command line (`lru` or `fifo`).
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Lru => "lru",
            Self::Fifo => "fifo",
        }
    }
}

impl FromStr for ReplacementPolicy {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lru" => Ok(Self::Lru),
            "fifo" => Ok(Self::Fifo),
            _ => Err(SimError::config(format!("unknown replacement policy: {s}"))),
        }
    }
}

impl fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unvalidated cache parameters, as deserialized from JSON.
///
/// Convert with `CacheConfig::try_from` to validate.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::{CacheConfig, RawCacheConfig, ReplacementPolicy};
///
/// let raw: RawCacheConfig = serde_json::from_str(
///     r#"{ "cache_size_exp": 10, "line_size_exp": 4, "associativity": "4way", "policy": "fifo" }"#,
/// ).unwrap();
/// let config = CacheConfig::try_from(raw).unwrap();
/// assert_eq!(config.ways(), 4);
/// assert_eq!(config.policy(), ReplacementPolicy::Fifo);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawCacheConfig {
    /// Cache size as a power-of-two exponent of bytes.
    pub cache_size_exp: u32,
    /// Line size as a power-of-two exponent of bytes.
    pub line_size_exp: u32,
    /// Associativity tag.
    pub associativity: Associativity,
    /// Replacement policy (defaults to LRU).
    #[serde(default)]
    pub policy: ReplacementPolicy,
}

impl TryFrom<RawCacheConfig> for CacheConfig {
    type Error = SimError;

    fn try_from(raw: RawCacheConfig) -> Result<Self> {
        Self::new(
            raw.cache_size_exp,
            raw.line_size_exp,
            raw.associativity,
            raw.policy,
        )
    }
}

/// Validated, immutable cache geometry and policy.
///
/// All sizes are powers of two held as exponents. The derived widths satisfy
/// `num_lines_exp = cache_size_exp - line_size_exp`,
/// `num_sets_exp = num_lines_exp - set_assoc_exp`, and
/// `tag_bits = 32 - num_sets_exp - line_size_exp`.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::{Associativity, CacheConfig, ReplacementPolicy};
///
/// let config = CacheConfig::new(4, 2, Associativity::Direct, ReplacementPolicy::Lru).unwrap();
/// assert_eq!(config.num_lines_exp(), 2);
/// assert_eq!(config.num_sets_exp(), 2);
/// assert_eq!(config.tag_bits(), 28);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheConfig {
    cache_size_exp: u32,
    line_size_exp: u32,
    set_assoc_exp: u32,
    policy: ReplacementPolicy,
}

impl CacheConfig {
    /// Builds a configuration from an associativity tag.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] when the geometry violates the
    /// cache invariants (see [`CacheConfig::with_set_assoc_exp`]).
    pub fn new(
        cache_size_exp: u32,
        line_size_exp: u32,
        associativity: Associativity,
        policy: ReplacementPolicy,
    ) -> Result<Self> {
        let num_lines_exp = cache_size_exp.checked_sub(line_size_exp).ok_or_else(|| {
            SimError::config(format!(
                "line size exponent {line_size_exp} exceeds cache size exponent {cache_size_exp}"
            ))
        })?;
        Self::with_set_assoc_exp(
            cache_size_exp,
            line_size_exp,
            associativity.set_assoc_exp(num_lines_exp),
            policy,
        )
    }

    /// Builds a configuration from a raw set-associativity exponent.
    ///
    /// `0` is direct-mapped and `num_lines_exp` is fully associative.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] when:
    /// - `line_size_exp > cache_size_exp`
    /// - the cache's byte count does not fit in a `u64`
    /// - `set_assoc_exp > num_lines_exp`
    /// - the set and offset fields need more than 32 address bits
    /// - the line count does not fit in a `usize`
    ///
    /// A geometry that passes may still be too large to allocate; that is
    /// reported when the cache store is built.
    pub fn with_set_assoc_exp(
        cache_size_exp: u32,
        line_size_exp: u32,
        set_assoc_exp: u32,
        policy: ReplacementPolicy,
    ) -> Result<Self> {
        let num_lines_exp = cache_size_exp.checked_sub(line_size_exp).ok_or_else(|| {
            SimError::config(format!(
                "line size exponent {line_size_exp} exceeds cache size exponent {cache_size_exp}"
            ))
        })?;
        if cache_size_exp > MAX_CACHE_SIZE_EXP {
            return Err(SimError::config(format!(
                "cache size exponent {cache_size_exp} exceeds the largest supported {MAX_CACHE_SIZE_EXP}"
            )));
        }
        if set_assoc_exp > num_lines_exp {
            return Err(SimError::config(format!(
                "set associativity exponent {set_assoc_exp} outside [0, {num_lines_exp}]"
            )));
        }
        let num_sets_exp = num_lines_exp - set_assoc_exp;
        let tag_bits = i64::from(ADDRESS_BITS) - i64::from(num_sets_exp) - i64::from(line_size_exp);
        if tag_bits < 0 {
            return Err(SimError::config(format!(
                "set and offset fields need {} bits, more than {ADDRESS_BITS}",
                num_sets_exp + line_size_exp
            )));
        }
        if num_lines_exp >= usize::BITS {
            return Err(SimError::config(format!(
                "2^{num_lines_exp} lines cannot be addressed on this platform"
            )));
        }

        Ok(Self {
            cache_size_exp,
            line_size_exp,
            set_assoc_exp,
            policy,
        })
    }

    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if the document does not
    /// deserialize or describes an invalid geometry.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawCacheConfig = serde_json::from_str(json)
            .map_err(|e| SimError::config(format!("bad configuration document: {e}")))?;
        Self::try_from(raw)
    }

    /// Cache size exponent.
    pub const fn cache_size_exp(&self) -> u32 {
        self.cache_size_exp
    }

    /// Line size exponent (width of the ignored offset field).
    pub const fn line_size_exp(&self) -> u32 {
        self.line_size_exp
    }

    /// Set-associativity exponent; each set holds `2^set_assoc_exp` lines.
    pub const fn set_assoc_exp(&self) -> u32 {
        self.set_assoc_exp
    }

    /// Line-count exponent.
    pub const fn num_lines_exp(&self) -> u32 {
        self.cache_size_exp - self.line_size_exp
    }

    /// Set-count exponent (width of the set-index field).
    pub const fn num_sets_exp(&self) -> u32 {
        self.num_lines_exp() - self.set_assoc_exp
    }

    /// Width of the tag field in bits.
    pub const fn tag_bits(&self) -> u32 {
        ADDRESS_BITS - self.num_sets_exp() - self.line_size_exp
    }

    /// Replacement policy.
    pub const fn policy(&self) -> ReplacementPolicy {
        self.policy
    }

    /// Cache size in bytes.
    pub const fn cache_bytes(&self) -> u64 {
        1 << self.cache_size_exp
    }

    /// Line size in bytes.
    pub const fn line_bytes(&self) -> u64 {
        1 << self.line_size_exp
    }

    /// Total number of lines.
    pub const fn num_lines(&self) -> usize {
        1 << self.num_lines_exp()
    }

    /// Number of sets.
    pub const fn num_sets(&self) -> usize {
        1 << self.num_sets_exp()
    }

    /// Lines per set.
    pub const fn ways(&self) -> usize {
        1 << self.set_assoc_exp
    }

    /// `true` when every set holds exactly one line.
    pub const fn is_direct_mapped(&self) -> bool {
        self.set_assoc_exp == 0
    }

    /// `true` when the cache is a single set.
    pub const fn is_fully_associative(&self) -> bool {
        self.set_assoc_exp == self.num_lines_exp()
    }

    /// Renders the associativity as it appears in CSV output.
    ///
    /// `direct` takes precedence over `fully` for a one-line cache.
    pub fn associativity_label(&self) -> String {
        if self.is_direct_mapped() {
            "direct".to_string()
        } else if self.is_fully_associative() {
            "fully".to_string()
        } else {
            format!("{}way", self.ways())
        }
    }
}

impl fmt::Display for CacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}B cache, {}B lines, {}, {}",
            self.cache_bytes(),
            self.line_bytes(),
            self.associativity_label(),
            self.policy
        )
    }
}
