//! Item identity contract for grid content.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for items displayable in a [`Grid`](crate::grid::Grid).
///
/// The identity is the only thing reconciliation ever compares. Payload
/// content changes are not detected automatically; an item whose identity
/// survives a snapshot swap keeps its cell, and the embedder re-renders the
/// cell content on its own schedule.
///
/// A grid is instantiated once per concrete item type, so no runtime type
/// checks are needed anywhere between the declarative and imperative layers.
pub trait GridItem: Clone + 'static {
    /// Stable identity, unique within one snapshot.
    type Id: Clone + Eq + Hash + Debug + 'static;

    /// The stable identity of this item.
    fn id(&self) -> Self::Id;
}
