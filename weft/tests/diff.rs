use weft::grid::diff::{diff, SnapshotDiff};

#[test]
fn test_identical_snapshots_produce_empty_diff() {
    let old = vec!["a", "b", "c"];
    let new = vec!["a", "b", "c"];
    let d = diff(&old, &new);
    assert!(d.is_empty());
    assert_eq!(d.len(), 0);
}

#[test]
fn test_empty_to_populated_is_all_insertions() {
    let d = diff(&[], &["a", "b", "c"]);
    assert_eq!(
        d.inserted,
        vec![(0, "a"), (1, "b"), (2, "c")]
    );
    assert!(d.removed.is_empty());
    assert!(d.moved.is_empty());
}

#[test]
fn test_populated_to_empty_is_all_removals() {
    let d = diff(&["a", "b", "c"], &[]);
    assert_eq!(
        d.removed,
        vec![(0, "a"), (1, "b"), (2, "c")]
    );
    assert!(d.inserted.is_empty());
    assert!(d.moved.is_empty());
}

#[test]
fn test_insertion_in_the_middle() {
    let d = diff(&["a", "c"], &["a", "b", "c"]);
    assert_eq!(d.inserted, vec![(1, "b")]);
    assert!(d.removed.is_empty());
    assert!(d.moved.is_empty());
}

#[test]
fn test_removal_does_not_move_survivors() {
    let d = diff(&["a", "b", "c", "d"], &["a", "c", "d"]);
    assert_eq!(d.removed, vec![(1, "b")]);
    assert!(d.inserted.is_empty());
    // Survivors keep their relative order; no moves needed.
    assert!(d.moved.is_empty());
}

#[test]
fn test_reversal_moves_all_but_one() {
    let d = diff(&["a", "b", "c"], &["c", "b", "a"]);
    assert!(d.removed.is_empty());
    assert!(d.inserted.is_empty());
    assert_eq!(d.moved.len(), 2);
}

#[test]
fn test_single_move_is_reported_once() {
    // Moving "d" to the front disturbs nothing else.
    let d = diff(&["a", "b", "c", "d"], &["d", "a", "b", "c"]);
    assert!(d.removed.is_empty());
    assert!(d.inserted.is_empty());
    assert_eq!(d.moved, vec![(3, 0, "d")]);
}

#[test]
fn test_mixed_operations() {
    let d = diff(&["a", "b", "c", "d"], &["e", "d", "a", "c"]);
    assert_eq!(d.removed, vec![(1, "b")]);
    assert_eq!(d.inserted, vec![(0, "e")]);
    // Survivors in new order are d, a, c (old positions 3, 0, 2); the
    // longest increasing run keeps a and c, so only d moves.
    assert_eq!(d.moved, vec![(3, 1, "d")]);
}

#[test]
fn test_moves_touch_only_affected_positions() {
    // Swapping two adjacent items out of ten moves one item, not ten.
    let old: Vec<u32> = (0..10).collect();
    let mut new = old.clone();
    new.swap(4, 5);
    let d = diff(&old, &new);
    assert!(d.removed.is_empty());
    assert!(d.inserted.is_empty());
    assert_eq!(d.moved.len(), 1);
}

#[test]
fn test_default_diff_is_empty() {
    let d: SnapshotDiff<u32> = SnapshotDiff::default();
    assert!(d.is_empty());
}
