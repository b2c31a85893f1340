use crate::cache::set::{AssociativeSet, Line};

#[test]
fn probe_returns_false_for_empty_set() {
    let set = AssociativeSet::new(4);
    assert!(!set.probe(0));
    assert!(!set.probe(123));
    assert_eq!(set.occupancy(), 0);
}

#[test]
fn invalid_line_never_matches() {
    let mut set = AssociativeSet::new(2);
    set.insert(7, 0);
    set.invalidate(0);
    assert!(!set.probe(7));
    assert_eq!(set.lines()[0], Line { tag: 7, valid: false });
}

#[test]
fn empty_ways_fill_in_cursor_order() {
    let mut set = AssociativeSet::new(4);
    for (expected_way, tag) in (10..14).enumerate() {
        assert_eq!(set.select_insert_slot(), expected_way);
        let (way, evicted) = set.fill(tag);
        assert_eq!(way, expected_way);
        assert_eq!(evicted, None);
    }
    assert!(set.is_full());
    assert_eq!(set.next_victim(), 0);
}

#[test]
fn full_set_evicts_round_robin() {
    let mut set = AssociativeSet::new(2);
    set.fill(1);
    set.fill(2);
    assert!(set.probe(1));
    // hits do not move the cursor: 1 is still the oldest
    assert_eq!(set.fill(3), (0, Some(Line::new(1))));
    assert_eq!(set.fill(4), (1, Some(Line::new(2))));
    assert_eq!(set.fill(5), (0, Some(Line::new(3))));
    assert!(set.probe(4));
    assert!(set.probe(5));
}

#[test]
fn hole_is_reused_before_evicting() {
    let mut set = AssociativeSet::new(3);
    set.fill(1);
    set.fill(2);
    set.fill(3);
    assert_eq!(set.invalidate(1), Some(Line::new(2)));
    // cursor is at 0, but the scan finds the hole at way 1
    assert_eq!(set.next_victim(), 0);
    assert_eq!(set.fill(4), (1, None));
    assert_eq!(set.next_victim(), 2);
    assert_eq!(set.fill(5), (2, Some(Line::new(3))));
}

#[test]
fn scan_wraps_around_from_cursor() {
    let mut set = AssociativeSet::new(4);
    set.fill(1);
    set.fill(2);
    set.fill(3);
    set.fill(4);
    set.invalidate(0);
    set.fill(5); // refills the hole at way 0, cursor -> 1
    set.invalidate(0);
    set.insert(6, 2); // cursor -> 3, evicts tag 3
    // the only hole is way 0, reached by wrapping past the cursor at 3
    assert_eq!(set.next_victim(), 3);
    assert_eq!(set.select_insert_slot(), 0);
}

#[test]
fn insert_reports_previous_line_only_when_valid() {
    let mut set = AssociativeSet::new(1);
    assert_eq!(set.insert(9, 0), None);
    assert_eq!(set.insert(10, 0), Some(Line::new(9)));
    assert_eq!(set.invalidate(0), Some(Line::new(10)));
    assert_eq!(set.invalidate(0), None);
}

#[test]
fn single_way_set() {
    let mut set = AssociativeSet::new(1);
    set.fill(1);
    assert!(set.probe(1));
    set.fill(2);
    assert!(!set.probe(1));
    assert!(set.probe(2));
}

#[test]
fn fill_path_never_duplicates_a_tag() {
    // regression guard: callers probe before filling, so a tag is resident
    // at most once per set
    let mut set = AssociativeSet::new(4);
    for tag in [1, 2, 1, 3, 2, 4, 5, 1] {
        if !set.probe(tag) {
            set.fill(tag);
        }
        let copies = set.valid_tags().filter(|&t| t == tag).count();
        assert_eq!(copies, 1);
    }
}
