//! Canned trace generators.
//!
//! Writes traces in the simulator's input format for four access patterns:
//!
//! - `sequential`: word-by-word walk from address 0 (spatial locality).
//! - `repeated`: cycles over 16 words (temporal locality).
//! - `random`: uniform words within a 4 KiB window (little locality).
//! - `mixed`: the sequential walk with every fourth access a store.
//!
//! The random pattern uses a seeded xorshift generator so traces are reproducible.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, warn};

use super::TraceRecord;
use crate::common::error::{Result, SimError};
use crate::config::defaults;

/// Bytes per generated access.
const WORD_BYTES: u32 = 4;

/// Distinct words cycled by the `repeated` pattern.
const REPEATED_WORDS: u32 = 16;

/// Words in the `random` pattern's window (4 KiB).
const RANDOM_WORDS: u64 = 1024;

/// Every n-th access of the `mixed` pattern is a store.
const MIXED_STORE_PERIOD: u32 = 4;

/// Access pattern to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Pattern {
    /// Ascending word addresses.
    #[default]
    Sequential,
    /// The same 16 words over and over.
    Repeated,
    /// Uniformly random words in a 4 KiB window.
    Random,
    /// Ascending word addresses, one store per four accesses.
    Mixed,
}

impl Pattern {
    /// Every pattern.
    pub const ALL: [Self; 4] = [Self::Sequential, Self::Repeated, Self::Random, Self::Mixed];

    /// Name used on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Repeated => "repeated",
            Self::Random => "random",
            Self::Mixed => "mixed",
        }
    }

    /// Parses a pattern name, falling back to [`Pattern::Sequential`] when the name is unknown.
    pub fn parse_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|e| {
            warn!("{e}; using sequential");
            Self::Sequential
        })
    }
}

impl FromStr for Pattern {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SimError::config(format!("unknown trace pattern: {s}")))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Xorshift64 pseudo-random generator.
#[derive(Debug, Clone)]
struct XorShift {
    state: u64,
}

impl XorShift {
    /// A zero seed would lock the generator at zero, so it falls back to the default seed.
    const fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { defaults::TRACE_SEED } else { seed },
        }
    }

    const fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

/// Iterator over the records of a generated trace.
#[derive(Debug, Clone)]
pub struct Generator {
    pattern: Pattern,
    index: usize,
    count: usize,
    rng: XorShift,
}

impl Generator {
    /// Creates a generator for `count` records of `pattern`.
    ///
    /// `seed` only affects [`Pattern::Random`].
    pub const fn new(pattern: Pattern, count: usize, seed: u64) -> Self {
        Self {
            pattern,
            index: 0,
            count,
            rng: XorShift::new(seed),
        }
    }
}

impl Iterator for Generator {
    type Item = TraceRecord;

    fn next(&mut self) -> Option<TraceRecord> {
        if self.index >= self.count {
            return None;
        }
        let i = self.index as u32;
        self.index += 1;

        // Addresses wrap at 4 GiB, past any realistic trace length.
        let record = match self.pattern {
            Pattern::Sequential => TraceRecord::load(i.wrapping_mul(WORD_BYTES), WORD_BYTES),
            Pattern::Repeated => TraceRecord::load((i % REPEATED_WORDS) * WORD_BYTES, WORD_BYTES),
            Pattern::Random => {
                let word = (self.rng.next() % RANDOM_WORDS) as u32;
                TraceRecord::load(word * WORD_BYTES, WORD_BYTES)
            }
            Pattern::Mixed => {
                let addr = i.wrapping_mul(WORD_BYTES);
                if i % MIXED_STORE_PERIOD == 0 {
                    TraceRecord::store(addr, WORD_BYTES)
                } else {
                    TraceRecord::load(addr, WORD_BYTES)
                }
            }
        };
        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.count.saturating_sub(self.index);
        (left, Some(left))
    }
}

/// Writes a generated trace to `out`, one record per line.
///
/// # Errors
///
/// Propagates any write failure.
pub fn generate<W: Write>(pattern: Pattern, count: usize, seed: u64, out: &mut W) -> io::Result<()> {
    for record in Generator::new(pattern, count, seed) {
        writeln!(out, "{record}")?;
    }
    out.flush()
}

/// Writes a generated trace to the file at `path`, replacing it.
///
/// # Errors
///
/// Returns [`SimError::Output`] if the file cannot be created or written.
pub fn write_trace_file(
    path: impl AsRef<Path>,
    pattern: Pattern,
    count: usize,
    seed: u64,
) -> Result<()> {
    let path = path.as_ref();
    let output_error = |source: io::Error| SimError::Output {
        path: path.to_path_buf(),
        source,
    };
    let mut out = BufWriter::new(File::create(path).map_err(output_error)?);
    generate(pattern, count, seed, &mut out).map_err(output_error)?;
    debug!(path = %path.display(), %pattern, count, "trace written");
    Ok(())
}
