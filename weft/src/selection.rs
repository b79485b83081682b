//! Selection state management for the grid.
//!
//! Selection is keyed by item identity rather than position, so it remains
//! stable when items are inserted, removed, or reordered around it.

use std::collections::HashSet;
use std::hash::Hash;

/// Identity-based selection state.
///
/// Tracks the set of selected identities plus an anchor for range selection.
/// Mutating operations return `(added, removed)` deltas so callers can emit
/// precise change events.
#[derive(Debug, Clone)]
pub struct Selection<I> {
    /// Currently selected identities.
    selected: HashSet<I>,
    /// Anchor for range selection (Shift+click starting point).
    anchor: Option<I>,
}

impl<I> Default for Selection<I> {
    fn default() -> Self {
        Self {
            selected: HashSet::new(),
            anchor: None,
        }
    }
}

impl<I: Clone + Eq + Hash> Selection<I> {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an identity is selected.
    pub fn is_selected(&self, id: &I) -> bool {
        self.selected.contains(id)
    }

    /// Get the number of selected items.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// The selected identities, in arbitrary order.
    pub fn ids(&self) -> &HashSet<I> {
        &self.selected
    }

    /// Get the anchor identity for range selection.
    pub fn anchor(&self) -> Option<&I> {
        self.anchor.as_ref()
    }

    /// Clear all selection.
    /// Returns the identities that were deselected.
    pub fn clear(&mut self) -> Vec<I> {
        let removed: Vec<_> = self.selected.drain().collect();
        self.anchor = None;
        removed
    }

    /// Select a single identity (clears others).
    /// Returns (added, removed) identities.
    pub fn select(&mut self, id: &I) -> (Vec<I>, Vec<I>) {
        let removed: Vec<_> = self.selected.iter().filter(|i| *i != id).cloned().collect();
        let was_selected = self.selected.contains(id);
        self.selected.clear();
        self.selected.insert(id.clone());
        self.anchor = Some(id.clone());
        let added = if was_selected {
            vec![]
        } else {
            vec![id.clone()]
        };
        (added, removed)
    }

    /// Toggle selection of an identity (Ctrl+click behavior).
    /// Returns (added, removed) identities.
    pub fn toggle(&mut self, id: &I) -> (Vec<I>, Vec<I>) {
        if self.selected.remove(id) {
            self.anchor = Some(id.clone());
            (vec![], vec![id.clone()])
        } else {
            self.selected.insert(id.clone());
            self.anchor = Some(id.clone());
            (vec![id.clone()], vec![])
        }
    }

    /// Range select from anchor to target identity (Shift+click behavior).
    ///
    /// Requires the ordered list of all visible identities to determine the
    /// range. If `extend` is false, clears selection outside the range first.
    ///
    /// Returns (added, removed) identities.
    pub fn range_select(&mut self, target_id: &I, all_ids_ordered: &[I], extend: bool) -> (Vec<I>, Vec<I>) {
        let anchor_id = self.anchor.clone().unwrap_or_else(|| target_id.clone());

        let anchor_pos = all_ids_ordered.iter().position(|id| id == &anchor_id);
        let target_pos = all_ids_ordered.iter().position(|id| id == target_id);

        let (start, end) = match (anchor_pos, target_pos) {
            (Some(a), Some(t)) => {
                if a <= t {
                    (a, t)
                } else {
                    (t, a)
                }
            }
            // If anchor or target not found, just select the target
            _ => {
                return self.select(target_id);
            }
        };

        let mut added = Vec::new();
        let mut removed = Vec::new();

        let range_ids: HashSet<I> = all_ids_ordered[start..=end].iter().cloned().collect();

        if !extend {
            removed = self
                .selected
                .iter()
                .filter(|id| !range_ids.contains(*id))
                .cloned()
                .collect();
            for id in &removed {
                self.selected.remove(id);
            }
        }

        for id in &range_ids {
            if self.selected.insert(id.clone()) {
                added.push(id.clone());
            }
        }

        (added, removed)
    }

    /// Select all identities from the provided ordered list.
    /// Returns the identities that were newly selected.
    pub fn select_all(&mut self, all_ids: &[I]) -> Vec<I> {
        let mut added = Vec::new();
        for id in all_ids {
            if self.selected.insert(id.clone()) {
                added.push(id.clone());
            }
        }
        added
    }

    /// Replace the selection wholesale.
    /// Returns (added, removed) identities.
    pub fn replace(&mut self, ids: impl IntoIterator<Item = I>) -> (Vec<I>, Vec<I>) {
        let next: HashSet<I> = ids.into_iter().collect();
        let added: Vec<_> = next.difference(&self.selected).cloned().collect();
        let removed: Vec<_> = self.selected.difference(&next).cloned().collect();
        self.selected = next;
        if let Some(anchor) = &self.anchor
            && !self.selected.contains(anchor)
        {
            self.anchor = None;
        }
        (added, removed)
    }

    /// Drop identities that are not in the known set.
    /// Returns the stale identities that were removed.
    pub fn retain_known(&mut self, known: &HashSet<I>) -> Vec<I> {
        let stale: Vec<_> = self
            .selected
            .iter()
            .filter(|id| !known.contains(*id))
            .cloned()
            .collect();
        for id in &stale {
            self.selected.remove(id);
        }
        if let Some(anchor) = &self.anchor
            && !known.contains(anchor)
        {
            self.anchor = None;
        }
        stale
    }
}
