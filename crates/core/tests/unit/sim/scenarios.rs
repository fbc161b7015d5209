//! Simulation Scenario Tests.
//!
//! Small traces worked out by hand: the direct-mapped and fully associative
//! examples, the LRU and FIFO eviction orders, and file-driven runs.

use pretty_assertions::assert_eq;
use rstest::rstest;

use cachesim_core::common::Addr;
use cachesim_core::config::{Associativity, ReplacementPolicy};
use cachesim_core::sim::{self, Simulator};
use cachesim_core::{CacheConfig, SimError};

use crate::common::{addr_for, config, fully, init_tracing, loads, trace_file};

fn hits(sim: &mut Simulator, addrs: &[u32]) -> Vec<bool> {
    addrs.iter().map(|&a| sim.access(Addr::new(a))).collect()
}

// ══════════════════════════════════════════════════════════
// 1. Worked examples
// ══════════════════════════════════════════════════════════

/// 16 B direct mapped, 4 B lines: 0x0 and 0x4 land in sets 0 and 1.
#[test]
fn direct_mapped_example() {
    init_tracing();
    let cfg = config(4, 2, Associativity::Direct, ReplacementPolicy::Lru);
    let result = sim::run(&cfg, loads(&[0x0, 0x4, 0x0])).unwrap();

    assert_eq!(result.hits, 1);
    assert_eq!(result.accesses, 3);
    assert!((result.hit_rate - 1.0 / 3.0).abs() < 1e-12);
    assert_eq!(result.csv_row(), "16,4,direct,LRU,1,3,0.3333");
}

/// Two-line FIFO: A B A C A -> A evicted by C, so the last A misses.
#[test]
fn fully_associative_fifo_example() {
    let mut sim = Simulator::new(&fully(1, ReplacementPolicy::Fifo)).unwrap();
    assert_eq!(
        hits(&mut sim, &[0x00, 0x10, 0x00, 0x20, 0x00]),
        vec![false, false, true, false, false]
    );
    assert_eq!(sim.hits(), 1);
    assert_eq!(sim.accesses(), 5);
}

/// Same trace under LRU: the hit on A protects it, so C evicts B.
#[test]
fn fully_associative_lru_example() {
    let mut sim = Simulator::new(&fully(1, ReplacementPolicy::Lru)).unwrap();
    assert_eq!(
        hits(&mut sim, &[0x00, 0x10, 0x00, 0x20, 0x00]),
        vec![false, false, true, false, true]
    );
}

#[rstest]
fn empty_trace(
    #[values(Associativity::Direct, Associativity::TwoWay, Associativity::Fully)] assoc: Associativity,
    #[values(ReplacementPolicy::Lru, ReplacementPolicy::Fifo)] policy: ReplacementPolicy,
) {
    let result = sim::run(&config(8, 4, assoc, policy), loads(&[])).unwrap();
    assert_eq!((result.hits, result.accesses), (0, 0));
    assert!(result.hit_rate.abs() < f64::EPSILON);
}

/// Repeating one address: only the first access misses.
#[rstest]
fn same_address_repeated(
    #[values(Associativity::Direct, Associativity::FourWay, Associativity::Fully)] assoc: Associativity,
    #[values(ReplacementPolicy::Lru, ReplacementPolicy::Fifo)] policy: ReplacementPolicy,
) {
    let result = sim::run(&config(10, 4, assoc, policy), loads(&[0xBEEF; 25])).unwrap();
    assert_eq!(result.hits, 24);
    assert_eq!(result.accesses, 25);
}

/// Every byte of one line hits once the line is resident.
#[test]
fn offset_bits_are_ignored() {
    let mut sim = Simulator::new(&config(8, 4, Associativity::Direct, ReplacementPolicy::Lru)).unwrap();
    let line: Vec<u32> = (0x40..0x50).collect();
    let got = hits(&mut sim, &line);
    assert!(!got[0]);
    assert!(got[1..].iter().all(|&h| h));
}

/// Loads and stores to the same line are indistinguishable.
#[test]
fn stores_score_like_loads() {
    use cachesim_core::trace::TraceRecord;
    let cfg = config(6, 2, Associativity::TwoWay, ReplacementPolicy::Lru);
    let mixed = vec![TraceRecord::store(0x8, 4), TraceRecord::load(0x8, 4), TraceRecord::store(0x8, 1)];
    assert_eq!(sim::run(&cfg, mixed).unwrap(), sim::run(&cfg, loads(&[0x8, 0x8, 0x8])).unwrap());
}

// ══════════════════════════════════════════════════════════
// 2. Eviction orders
// ══════════════════════════════════════════════════════════

/// Fill N lines, touch them in reverse, then one new tag evicts the least
/// recently touched line.
#[test]
fn lru_evicts_least_recently_used() {
    let cfg = fully(3, ReplacementPolicy::Lru);
    let n = cfg.num_lines() as u32;
    let mut sim = Simulator::new(&cfg).unwrap();

    for tag in 1..=n {
        assert!(!sim.access(addr_for(&cfg, tag, 0)));
    }
    for tag in (2..=n).rev() {
        assert!(sim.access(addr_for(&cfg, tag, 0)));
    }
    assert!(sim.access(addr_for(&cfg, 1, 0)));
    // Least recent is now n.
    assert!(!sim.access(addr_for(&cfg, n + 1, 0)));

    let store = sim.store();
    assert!(!store.contains(0, n));
    assert!((1..n).all(|tag| store.contains(0, tag)));
    assert!(store.contains(0, n + 1));
}

/// FIFO evicts in install order no matter how often residents are hit.
#[test]
fn fifo_evicts_in_install_order() {
    let cfg = fully(2, ReplacementPolicy::Fifo);
    let mut sim = Simulator::new(&cfg).unwrap();

    for tag in 0..4 {
        assert!(!sim.access(addr_for(&cfg, tag, 0)));
    }
    for _ in 0..3 {
        assert_eq!(hits(&mut sim, &[0x0, 0x4]), vec![true, true]);
    }
    for (incoming, evicted) in (4..8).zip(0..4) {
        assert!(!sim.access(addr_for(&cfg, incoming, 0)));
        assert!(!sim.store().contains(0, evicted), "tag {evicted} should be gone");
        assert!(sim.store().contains(0, incoming));
    }
}

/// Two tags alternating in one direct-mapped set never hit.
#[test]
fn direct_mapped_thrash() {
    let cfg = config(6, 2, Associativity::Direct, ReplacementPolicy::Lru);
    let a = addr_for(&cfg, 1, 3).val();
    let b = addr_for(&cfg, 2, 3).val();
    let result = sim::run(&cfg, loads(&[a, b, a, b, a, b])).unwrap();
    assert_eq!(result.hits, 0);
}

/// The same alternation fits in a two-way set.
#[test]
fn two_way_absorbs_the_thrash() {
    let cfg = config(6, 2, Associativity::TwoWay, ReplacementPolicy::Lru);
    let a = addr_for(&cfg, 1, 3).val();
    let b = addr_for(&cfg, 2, 3).val();
    let result = sim::run(&cfg, loads(&[a, b, a, b, a, b])).unwrap();
    assert_eq!(result.hits, 4);
}

// ══════════════════════════════════════════════════════════
// 3. Trace files
// ══════════════════════════════════════════════════════════

#[test]
fn run_file_skips_bad_lines() {
    init_tracing();
    let file = trace_file(&[
        "l 0x00000000 4",
        "",
        "l 0x00000004 4",
        "nonsense",
        "x 0x00000000 4",
        "l 0x00000000 4",
    ]);
    let cfg = config(4, 2, Associativity::Direct, ReplacementPolicy::Lru);

    let result = sim::run_file(&cfg, file.path()).unwrap();

    assert_eq!((result.hits, result.accesses), (1, 3));
}

/// Sizes are never scored, so an unreadable size keeps the access.
#[test]
fn run_file_ignores_size_field() {
    let file = trace_file(&["l 0x00000000 4", "l 0x00000000 4.0", "l 0x00000000 -1"]);
    let cfg = config(4, 2, Associativity::Direct, ReplacementPolicy::Lru);

    let result = sim::run_file(&cfg, file.path()).unwrap();

    assert_eq!((result.hits, result.accesses), (2, 3));
}

#[test]
fn run_file_survives_invalid_utf8() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    std::io::Write::write_all(&mut file, b"l 0x00000000 4\n# caf\xE9\nl 0x00000000 4\n").unwrap();
    let cfg = config(4, 2, Associativity::Direct, ReplacementPolicy::Lru);

    let result = sim::run_file(&cfg, file.path()).unwrap();

    assert_eq!((result.hits, result.accesses), (1, 2));
}

#[test]
fn run_file_missing_trace() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(4, 2, Associativity::Direct, ReplacementPolicy::Lru);
    let err = sim::run_file(&cfg, dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, SimError::TraceFileUnavailable { .. }));
}

/// Configuration errors surface before the trace is touched.
#[test]
fn invalid_config_never_opens_the_trace() {
    let err = CacheConfig::new(4, 2, Associativity::EightWay, ReplacementPolicy::Lru).unwrap_err();
    assert!(matches!(err, SimError::InvalidConfiguration(_)));
}

/// A valid geometry whose lines cannot be allocated is a configuration error,
/// reported before the trace is opened.
#[test]
fn unallocatable_cache_is_a_configuration_error() {
    let cfg = config(62, 0, Associativity::Fully, ReplacementPolicy::Lru);

    let err = Simulator::new(&cfg).unwrap_err();
    assert!(matches!(err, SimError::InvalidConfiguration(_)), "{err}");

    let dir = tempfile::tempdir().unwrap();
    let err = sim::run_file(&cfg, dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, SimError::InvalidConfiguration(_)), "{err}");
}

#[test]
fn simulator_reports_its_parts() {
    let cfg = config(10, 4, Associativity::FourWay, ReplacementPolicy::Fifo);
    let sim = Simulator::new(&cfg).unwrap();
    assert_eq!(sim.config(), &cfg);
    assert_eq!(sim.codec().set_bits(), 4);
    assert_eq!(sim.store().ways(), 4);
    assert_eq!(sim.result().accesses, 0);
}
