use crate::cache::config::CacheConfig;
use crate::cache::level::CacheLevel;

fn level(block_size: u32, ways: u32, size_kb: u32) -> CacheLevel {
    CacheLevel::new("L1", &CacheConfig::new(block_size, ways, size_kb))
        .expect("level should build")
}

#[test]
fn allocates_one_set_per_index() {
    let l1 = level(16, 2, 1);
    assert_eq!(l1.sets().len(), 32);
    assert!(l1.sets().iter().all(|set| set.ways() == 2));
    assert_eq!(l1.occupancy(), 0);
}

#[test]
fn insert_then_probe_whole_block() {
    let mut l1 = level(16, 2, 1);
    assert!(!l1.probe(0x1234));
    assert_eq!(l1.insert(0x1234), None);
    assert!(l1.probe(0x1230));
    assert!(l1.probe(0x123F));
    assert!(!l1.probe(0x1240));
}

#[test]
fn insert_reports_evicted_block_address() {
    // direct mapped, 64 sets of 16B: addresses 1 KiB apart collide
    let mut l1 = level(16, 1, 1);
    assert_eq!(l1.insert(0x0000_0404), None);
    assert_eq!(l1.insert(0x0000_0808), Some(0x0000_0400));
    assert_eq!(l1.insert(0xFFFF_FC0C), Some(0x0000_0800));
    assert_eq!(l1.stats().fills, 3);
    assert_eq!(l1.stats().evictions, 2);
}

#[test]
fn reconstructed_victim_decodes_under_another_geometry() {
    let mut l1 = level(16, 1, 1);
    let mut l2 = level(64, 4, 16);
    l1.insert(0x0001_2345);
    let victim = l1.insert(0x0001_2745).expect("same L1 set, must evict");
    assert_eq!(victim, 0x0001_2340);
    let decoded = l2.decode(victim);
    assert_eq!(
        l2.reconstruct_address(decoded.tag, decoded.index),
        0x0001_2340
    );
    l2.insert(victim);
    assert!(l2.contains(0x0001_2345));
}

#[test]
fn invalidate_clears_only_the_target_block() {
    let mut l1 = level(16, 2, 1);
    l1.insert(0x100);
    l1.insert(0x500);
    assert!(l1.invalidate(0x104));
    assert!(!l1.invalidate(0x104));
    assert!(!l1.probe(0x100));
    assert!(l1.probe(0x500));
    assert_eq!(l1.stats().invalidations, 1);
}

#[test]
fn resident_blocks_lists_valid_lines() {
    let mut l1 = level(16, 2, 1);
    l1.insert(0x20);
    l1.insert(0x1000);
    l1.insert(0x3F4);
    let mut blocks = l1.resident_blocks();
    blocks.sort_unstable();
    assert_eq!(blocks, vec![0x20, 0x3F0, 0x1000]);
}

#[test]
fn fully_associative_level_uses_single_set() {
    let mut l1 = level(16, 0, 1);
    assert_eq!(l1.sets().len(), 1);
    for i in 0..64u32 {
        assert_eq!(l1.insert(i * 0x1000), None);
    }
    assert_eq!(l1.insert(0xABC0), Some(0));
}
