//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the line that has gone longest without being accessed.
//! Every access stamps the line it touches with the global access counter, so
//! the smallest stamp in a set marks its least recently used line.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `update()`: O(1)
//!   - `get_victim()`: O(W) where W is the number of ways (associativity)
//! - **Space Complexity:** One 64-bit stamp per line, already held by the line
//! - **Best Case:** Working sets that fit in a set, strong temporal locality
//! - **Worst Case:** Cyclic scans larger than the set (every access misses)

use super::{CacheLine, PolicyType, ReplacementPolicy};

/// LRU Policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct LruPolicy;

impl ReplacementPolicy for LruPolicy {
    /// Moves the hit line to the most-recently-used position by re-stamping it.
    fn update(&self, line: &mut CacheLine, stamp: u64) {
        line.stamp = stamp;
    }

    fn kind(&self) -> PolicyType {
        PolicyType::Lru
    }
}
