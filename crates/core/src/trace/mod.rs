//! Memory-access trace parsing.
//!
//! A trace is plain text, one record per line: `<op> <hexaddr> <size>`, fields
//! separated by whitespace. `op` is `l` or `s` (either case), `hexaddr` is `0x`
//! followed by eight hex digits, and `size` is a decimal byte count. Neither the
//! op nor the size affect hit/miss scoring, so the size is never validated.
//!
//! Lines with fewer than two fields are skipped silently. Lines whose op or
//! address does not parse are skipped with a warning. Neither kind counts as an
//! access. Bytes that are not UTF-8 are decoded lossily.

/// Canned access-pattern trace generators.
pub mod generator;

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::warn;

use crate::common::Addr;
use crate::common::error::{Result, SimError};

/// Kind of memory access named by a trace record.
///
/// Loads and stores are scored identically; the kind is kept only so traces
/// round-trip and can be summarised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessKind {
    /// A read (`l`).
    Load,
    /// A write (`s`).
    Store,
}

impl AccessKind {
    /// Single-character trace code.
    pub const fn code(self) -> char {
        match self {
            Self::Load => 'l',
            Self::Store => 's',
        }
    }
}

impl FromStr for AccessKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        match s {
            "l" | "L" => Ok(Self::Load),
            "s" | "S" => Ok(Self::Store),
            _ => Err(format!("unknown access kind '{s}'")),
        }
    }
}

/// One memory access from a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceRecord {
    /// Load or store (ignored by the simulation).
    pub kind: AccessKind,
    /// Accessed byte address.
    pub addr: Addr,
    /// Access size in bytes (ignored by the simulation; `0` when absent or unparsable).
    pub size: u32,
}

impl TraceRecord {
    /// Creates a load record.
    pub const fn load(addr: u32, size: u32) -> Self {
        Self {
            kind: AccessKind::Load,
            addr: Addr::new(addr),
            size,
        }
    }

    /// Creates a store record.
    pub const fn store(addr: u32, size: u32) -> Self {
        Self {
            kind: AccessKind::Store,
            addr: Addr::new(addr),
            size,
        }
    }

    /// Parses one trace line.
    ///
    /// # Arguments
    ///
    /// * `line` - Raw line text.
    /// * `line_no` - One-based line number, used in error reports.
    ///
    /// # Returns
    ///
    /// `Ok(None)` for lines with fewer than two fields, `Ok(Some(record))` for a
    /// well-formed line.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::MalformedTraceLine`] when the op or address fails to parse.
    pub fn parse(line: &str, line_no: usize) -> Result<Option<Self>> {
        let mut fields = line.split_whitespace();
        let (Some(op), Some(addr)) = (fields.next(), fields.next()) else {
            return Ok(None);
        };
        let malformed = |reason: String| SimError::MalformedTraceLine {
            line: line_no,
            reason,
        };

        let kind = op.parse::<AccessKind>().map_err(malformed)?;
        let addr = Addr::from_hex(addr)
            .ok_or_else(|| malformed(format!("bad address '{addr}'")))?;
        let size = fields.next().and_then(|size| size.parse().ok()).unwrap_or(0);

        Ok(Some(Self { kind, addr, size }))
    }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.kind.code(), self.addr, self.size)
    }
}

/// Streaming reader yielding the well-formed records of a trace, in order.
///
/// Skipped lines are counted but never yielded. An I/O error ends the stream
/// after being yielded once; invalid UTF-8 is not an I/O error.
#[derive(Debug)]
pub struct TraceReader<R> {
    source: R,
    path: PathBuf,
    line_no: usize,
    skipped: usize,
    buf: Vec<u8>,
    done: bool,
}

impl TraceReader<BufReader<File>> {
    /// Opens a trace file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::TraceFileUnavailable`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SimError::TraceFileUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file), path))
    }
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps any buffered reader; `path` labels errors.
    pub fn new(source: R, path: impl Into<PathBuf>) -> Self {
        Self {
            source,
            path: path.into(),
            line_no: 0,
            skipped: 0,
            buf: Vec::new(),
            done: false,
        }
    }

    /// Number of lines skipped so far (short or malformed).
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of lines read so far.
    pub const fn lines_read(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.source.read_until(b'\n', &mut self.buf) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line_no += 1;
                    let line = String::from_utf8_lossy(&self.buf);
                    match TraceRecord::parse(&line, self.line_no) {
                        Ok(Some(record)) => return Some(Ok(record)),
                        Ok(None) => self.skipped += 1,
                        Err(e) => {
                            warn!(path = %self.path.display(), "skipping {e}");
                            self.skipped += 1;
                        }
                    }
                }
                Err(source) => {
                    self.done = true;
                    return Some(Err(SimError::TraceRead {
                        path: self.path.clone(),
                        source,
                    }));
                }
            }
        }
        None
    }
}

/// Reads every well-formed record of a trace file into memory.
///
/// # Errors
///
/// Returns [`SimError::TraceFileUnavailable`] if the file cannot be opened, or
/// [`SimError::TraceRead`] if reading fails part-way.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<TraceRecord>> {
    TraceReader::open(path)?.collect()
}
