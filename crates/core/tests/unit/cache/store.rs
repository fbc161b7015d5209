//! Line Store Tests.
//!
//! Drives `CacheStore::resolve` with explicit `(set, tag, stamp)` triples and
//! inspects the resulting lines.

use pretty_assertions::assert_eq;

use cachesim_core::cache::{CacheLine, CacheStore, ReplacementPolicy as _};
use cachesim_core::config::{Associativity, ReplacementPolicy};

use crate::common::config;

#[test]
fn new_store_is_empty_and_partitioned() {
    let cfg = config(10, 4, Associativity::FourWay, ReplacementPolicy::Lru);
    let store = CacheStore::new(&cfg).unwrap();

    assert_eq!(store.num_sets(), 16);
    assert_eq!(store.ways(), 4);
    assert_eq!(store.lines().len(), 64);
    assert_eq!(store.occupancy(), 0);
    assert!(store.lines().iter().all(|line| *line == CacheLine::default()));
    assert_eq!(store.policy().kind(), ReplacementPolicy::Lru);
}

/// Direct mapped: the single line is overwritten on every miss.
#[test]
fn direct_mapped_conflict() {
    let mut store = CacheStore::new(&config(4, 2, Associativity::Direct, ReplacementPolicy::Fifo)).unwrap();

    assert!(!store.resolve(1, 5, 0));
    assert!(store.resolve(1, 5, 1));
    assert!(!store.resolve(1, 6, 2));
    assert!(!store.resolve(1, 5, 3));
    assert_eq!(store.set_lines(1), &[CacheLine { tag: 5, stamp: 3, valid: true }]);
    assert_eq!(store.occupancy(), 1);
}

/// A direct-mapped hit re-stamps the line whatever the policy.
#[test]
fn direct_mapped_hit_restamps() {
    let mut store = CacheStore::new(&config(4, 2, Associativity::Direct, ReplacementPolicy::Fifo)).unwrap();
    assert!(!store.resolve(0, 9, 0));
    assert!(store.resolve(0, 9, 7));
    assert_eq!(store.set_lines(0)[0].stamp, 7);
}

#[test]
fn lru_hit_refreshes_and_fifo_does_not() {
    for (policy, expected) in [(ReplacementPolicy::Lru, 2), (ReplacementPolicy::Fifo, 0)] {
        let mut store = CacheStore::new(&config(3, 2, Associativity::Fully, policy)).unwrap();
        assert!(!store.resolve(0, 1, 0));
        assert!(!store.resolve(0, 2, 1));
        assert!(store.resolve(0, 1, 2));
        assert_eq!(store.set_lines(0)[0].stamp, expected, "{policy}");
    }
}

/// Misses fill empty ways in way order before anything is evicted.
#[test]
fn fills_first_empty_way() {
    let mut store = CacheStore::new(&config(4, 2, Associativity::Fully, ReplacementPolicy::Lru)).unwrap();
    for (stamp, tag) in [10u32, 20, 30].into_iter().enumerate() {
        assert!(!store.resolve(0, tag, stamp as u64));
    }
    let tags: Vec<_> = store.set_lines(0).iter().map(|l| (l.tag, l.valid)).collect();
    assert_eq!(tags, vec![(10, true), (20, true), (30, true), (0, false)]);
}

/// Equal stamps evict the lowest way.
#[test]
fn tie_breaks_to_lowest_way() {
    let mut store = CacheStore::new(&config(3, 2, Associativity::Fully, ReplacementPolicy::Lru)).unwrap();
    assert!(!store.resolve(0, 0xA, 0));
    assert!(!store.resolve(0, 0xB, 0));
    assert!(!store.resolve(0, 0xC, 1));

    assert!(!store.contains(0, 0xA));
    assert!(store.contains(0, 0xB));
    assert!(store.contains(0, 0xC));
    assert_eq!(store.set_lines(0)[0].tag, 0xC);
}

/// Traffic in one set never disturbs another.
#[test]
fn sets_are_independent() {
    let mut store = CacheStore::new(&config(5, 2, Associativity::TwoWay, ReplacementPolicy::Lru)).unwrap();
    assert_eq!(store.num_sets(), 4);
    assert!(!store.resolve(2, 1, 0));
    for (stamp, tag) in (1..=10).zip(100..) {
        let _ = store.resolve(3, tag, stamp);
    }
    assert!(store.contains(2, 1));
    assert!(store.resolve(2, 1, 11));
    assert_eq!(store.set_lines(0), &[CacheLine::default(); 2]);
}

#[test]
fn contains_does_not_touch_state() {
    let mut store = CacheStore::new(&config(3, 2, Associativity::Fully, ReplacementPolicy::Lru)).unwrap();
    assert!(!store.resolve(0, 4, 0));
    let before = store.lines().to_vec();
    assert!(store.contains(0, 4));
    assert!(!store.contains(0, 5));
    assert_eq!(store.lines(), before.as_slice());
}
