//! Keyed snapshot diffing.
//!
//! Compares two ordered identity sequences and produces the minimal set of
//! removals, insertions, and moves transforming one into the other. Only
//! identity is compared; payload changes are invisible here. Moves are
//! minimized by keeping the longest increasing subsequence of surviving
//! items in place.

use std::collections::HashMap;
use std::hash::Hash;

/// Structural difference between two snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotDiff<I> {
    /// Identities removed, with their positions in the old snapshot.
    pub removed: Vec<(usize, I)>,
    /// Identities inserted, with their positions in the new snapshot.
    pub inserted: Vec<(usize, I)>,
    /// Surviving identities that change position, as (old, new) pairs.
    pub moved: Vec<(usize, usize, I)>,
}

impl<I> SnapshotDiff<I> {
    /// A diff with no operations.
    pub fn empty() -> Self {
        Self {
            removed: Vec::new(),
            inserted: Vec::new(),
            moved: Vec::new(),
        }
    }

    /// Whether the diff performs no structural mutation.
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.inserted.is_empty() && self.moved.is_empty()
    }

    /// Total number of structural operations.
    pub fn len(&self) -> usize {
        self.removed.len() + self.inserted.len() + self.moved.len()
    }
}

impl<I> Default for SnapshotDiff<I> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Diff two snapshots of unique identities.
pub fn diff<I: Clone + Eq + Hash>(old: &[I], new: &[I]) -> SnapshotDiff<I> {
    let old_index: HashMap<&I, usize> = old.iter().enumerate().map(|(i, id)| (id, i)).collect();
    let new_index: HashMap<&I, usize> = new.iter().enumerate().map(|(i, id)| (id, i)).collect();

    let removed: Vec<(usize, I)> = old
        .iter()
        .enumerate()
        .filter(|(_, id)| !new_index.contains_key(id))
        .map(|(i, id)| (i, id.clone()))
        .collect();

    let inserted: Vec<(usize, I)> = new
        .iter()
        .enumerate()
        .filter(|(_, id)| !old_index.contains_key(id))
        .map(|(i, id)| (i, id.clone()))
        .collect();

    // Survivors in new order, tagged with their old positions. The longest
    // increasing run of old positions stays put; everything else moves.
    let survivors: Vec<(usize, usize, &I)> = new
        .iter()
        .enumerate()
        .filter_map(|(new_pos, id)| old_index.get(id).map(|old_pos| (*old_pos, new_pos, id)))
        .collect();

    let stable = longest_increasing_run(&survivors.iter().map(|(o, _, _)| *o).collect::<Vec<_>>());
    let moved: Vec<(usize, usize, I)> = survivors
        .iter()
        .enumerate()
        .filter(|(i, _)| !stable.contains(i))
        .map(|(_, (old_pos, new_pos, id))| (*old_pos, *new_pos, (*id).clone()))
        .collect();

    SnapshotDiff {
        removed,
        inserted,
        moved,
    }
}

/// Indices of one longest strictly-increasing subsequence.
fn longest_increasing_run(values: &[usize]) -> std::collections::HashSet<usize> {
    if values.is_empty() {
        return std::collections::HashSet::new();
    }

    // Patience sorting with back-pointers.
    let mut tails: Vec<usize> = Vec::new();
    let mut tail_index: Vec<usize> = Vec::new();
    let mut previous: Vec<Option<usize>> = vec![None; values.len()];

    for (i, value) in values.iter().enumerate() {
        let slot = tails.partition_point(|tail| tail < value);
        if slot > 0 {
            previous[i] = Some(tail_index[slot - 1]);
        }
        if slot == tails.len() {
            tails.push(*value);
            tail_index.push(i);
        } else {
            tails[slot] = *value;
            tail_index[slot] = i;
        }
    }

    let mut result = std::collections::HashSet::new();
    let mut cursor = tail_index.last().copied();
    while let Some(i) = cursor {
        result.insert(i);
        cursor = previous[i];
    }
    result
}
