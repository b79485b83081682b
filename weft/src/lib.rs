//! weft: a selectable, identity-tracked grid widget kit.
//!
//! Two tightly coupled subsystems: a reconciliation bridge that keeps a
//! stateful grid widget consistent with a declarative (items, selection,
//! layout) description across renders, and an adaptive grid layout engine
//! that solves declarative column specs into concrete slot widths with a
//! linear-constraint solver.

pub mod bridge;
pub mod geometry;
pub mod grid;
pub mod input;
pub mod item;
pub mod layout;
pub mod menu;
pub mod selection;

pub mod prelude {
    pub use crate::bridge::{Bridge, RenderOutcome, RenderPhase};
    pub use crate::geometry::{Insets, Point, Rect, Size};
    pub use crate::grid::{
        DoubleClickEvent, Easing, FocusEvent, Grid, GridEvents, GridId, Highlight,
        MenuRequestEvent, SelectionChangeEvent, SnapshotDiff,
    };
    pub use crate::input::{ClickEvent, ClickKind, EventResult, Key, KeyCombo, Modifiers};
    pub use crate::item::GridItem;
    pub use crate::layout::{Column, Geometry, LayoutSpec};
    pub use crate::menu::{MenuItem, MenuItemKind, MenuRole, MenuShortcut};
    pub use crate::selection::Selection;
}
