//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! This policy evicts the oldest line in a set, regardless of how recently it
//! was accessed. A line's stamp is written once, when it is installed, so the
//! smallest stamp in a full set always belongs to the earliest install.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `update()`: O(1) (no-op)
//!   - `get_victim()`: O(W) where W is the number of ways (associativity)
//! - **Best Case:** Streaming accesses where all lines have equal importance
//! - **Worst Case:** Workloads with strong temporal locality (may evict frequently-used lines)

use super::{CacheLine, PolicyType, ReplacementPolicy};

/// FIFO Policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct FifoPolicy;

impl ReplacementPolicy for FifoPolicy {
    /// Hits leave the install stamp untouched so insertion order is preserved.
    fn update(&self, _line: &mut CacheLine, _stamp: u64) {}

    fn kind(&self) -> PolicyType {
        PolicyType::Fifo
    }
}
