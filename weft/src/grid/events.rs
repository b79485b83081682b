//! Pending interaction events produced by the grid widget.
//!
//! Input handlers return an event bundle instead of calling the embedder
//! directly; the bridge owns callback dispatch. This keeps the widget free
//! of references to the declarative layer.

/// Event fired when the user changes the selection.
#[derive(Debug, Clone)]
pub struct SelectionChangeEvent<I> {
    /// All currently selected identities, in snapshot order.
    pub selected: Vec<I>,
    /// Identities added to the selection.
    pub added: Vec<I>,
    /// Identities removed from the selection.
    pub removed: Vec<I>,
}

/// Event fired on a rapid repeated activation of a non-empty selection.
#[derive(Debug, Clone)]
pub struct DoubleClickEvent<I> {
    /// The selection at the time of the gesture, in snapshot order.
    pub selected: Vec<I>,
}

/// Event fired when the widget gains or loses input focus.
#[derive(Debug, Clone, Copy)]
pub struct FocusEvent {
    /// Whether the widget now holds focus.
    pub focused: bool,
}

/// Request for a context menu over the current selection.
#[derive(Debug, Clone)]
pub struct MenuRequestEvent<I> {
    /// The (possibly just-updated) selection, in snapshot order.
    pub selected: Vec<I>,
}

/// Pending events to be dispatched after input handling.
#[derive(Debug, Clone)]
pub struct GridEvents<I> {
    pub selection_change: Option<SelectionChangeEvent<I>>,
    pub double_click: Option<DoubleClickEvent<I>>,
    pub focus: Option<FocusEvent>,
    pub menu_request: Option<MenuRequestEvent<I>>,
}

impl<I> Default for GridEvents<I> {
    fn default() -> Self {
        Self {
            selection_change: None,
            double_click: None,
            focus: None,
            menu_request: None,
        }
    }
}

impl<I> GridEvents<I> {
    /// Whether the bundle carries no events.
    pub fn is_empty(&self) -> bool {
        self.selection_change.is_none()
            && self.double_click.is_none()
            && self.focus.is_none()
            && self.menu_request.is_none()
    }
}
