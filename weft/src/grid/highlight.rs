//! Per-cell highlight state.

/// Visual selection/focus/activation state of one cell.
///
/// Derived from selection membership, widget focus, and window activation;
/// recomputed whenever any of those changes and never persisted. Distinct
/// from the logical selection set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Highlight {
    /// Not selected, not being selected.
    #[default]
    None,
    /// The cursor rests on the cell but it is not yet selected.
    ForSelection,
    /// Selected while the widget has focus in an active window.
    SelectedActive,
    /// Selected while focus or window activation is elsewhere.
    SelectedInactive,
}

impl Highlight {
    /// Derive the highlight for a cell.
    ///
    /// `on_cursor` marks the cell the keyboard cursor rests on; it only
    /// shows through when the cell is not selected.
    pub fn derive(selected: bool, on_cursor: bool, focused: bool, window_active: bool) -> Self {
        if selected {
            if focused && window_active {
                Highlight::SelectedActive
            } else {
                Highlight::SelectedInactive
            }
        } else if on_cursor && focused {
            Highlight::ForSelection
        } else {
            Highlight::None
        }
    }

    /// Whether the cell reads as selected in any form.
    pub fn is_selected(&self) -> bool {
        matches!(self, Highlight::SelectedActive | Highlight::SelectedInactive)
    }
}
