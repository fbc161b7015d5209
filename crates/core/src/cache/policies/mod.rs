//! Cache Replacement Policies.
//!
//! Both policies share one victim rule: fill the first empty line of the set,
//! otherwise evict the valid line with the smallest stamp, lowest index winning
//! ties. A policy only decides what a hit does to the hit line's stamp.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used (hits refresh the stamp).
//! - `Fifo`: First-In, First-Out (stamps reflect install time only).

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Recently Used replacement policy.
pub mod lru;

pub use fifo::FifoPolicy;
pub use lru::LruPolicy;

use super::CacheLine;
use crate::config::ReplacementPolicy as PolicyType;

/// Trait for cache replacement policies.
///
/// Defines the interface for updating line state on a hit and selecting victim lines.
pub trait ReplacementPolicy: Send + Sync + std::fmt::Debug {
    /// Updates the hit line's state.
    ///
    /// # Arguments
    ///
    /// * `line` - The line whose tag matched.
    /// * `stamp` - The global access counter for the current access.
    fn update(&self, line: &mut CacheLine, stamp: u64);

    /// Which policy this is.
    fn kind(&self) -> PolicyType;

    /// Selects the way to fill on a miss.
    ///
    /// Returns the first empty way if there is one. Otherwise returns the valid
    /// way with the smallest stamp; a later way replaces the candidate only when
    /// its stamp is strictly smaller.
    ///
    /// # Arguments
    ///
    /// * `set` - The lines of one set, in way order. Must not be empty.
    ///
    /// # Returns
    ///
    /// The index of the way to fill.
    fn get_victim(&self, set: &[CacheLine]) -> usize {
        let mut candidate: Option<(usize, u64)> = None;
        for (way, line) in set.iter().enumerate() {
            if !line.valid {
                return way;
            }
            match candidate {
                Some((_, smallest)) if line.stamp >= smallest => {}
                _ => candidate = Some((way, line.stamp)),
            }
        }
        candidate.map_or(0, |(way, _)| way)
    }
}

/// Builds the policy object for a configured policy type.
pub fn build(policy: PolicyType) -> Box<dyn ReplacementPolicy> {
    match policy {
        PolicyType::Lru => Box::new(LruPolicy),
        PolicyType::Fifo => Box::new(FifoPolicy),
    }
}
