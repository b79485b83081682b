//! Reconciliation between the declarative model and the grid widget.
//!
//! The bridge owns the widget it constructed; the widget never holds a
//! reference back. Declarative renders flow in through [`Bridge::render`],
//! which diffs against the last-applied state and pushes the minimal
//! mutation. Widget interaction flows out as event bundles that the bridge
//! translates 1:1 into embedder callbacks. A callback is never a cause to
//! re-enter the diffing phase synchronously; it is expected to produce a new
//! declarative render on its own schedule.

use std::collections::HashSet;
use std::time::Instant;

use log::debug;

use crate::geometry::{Point, Size};
use crate::grid::{Grid, GridEvents};
use crate::input::{EventResult, KeyCombo, Modifiers};
use crate::item::GridItem;
use crate::layout::LayoutSpec;
use crate::menu::MenuItem;

type CellContentFn<T, C> = Box<dyn Fn(&T) -> Option<C>>;
type ContextMenuFn<I> = Box<dyn Fn(&[I]) -> Vec<MenuItem>>;
type PrimaryActionFn<I> = Box<dyn FnMut(&[I])>;
type SelectionChangedFn<I> = Box<dyn FnMut(HashSet<I>)>;
type FocusChangedFn = Box<dyn FnMut(bool)>;
type KeyInterceptorFn = Box<dyn FnMut(&KeyCombo) -> EventResult>;

/// Where the bridge is within one render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderPhase {
    /// Between cycles.
    #[default]
    Idle,
    /// Comparing the incoming state against the last-applied copy.
    Diffing,
    /// Pushing mutations into the widget.
    Applying,
}

/// What a call to [`Bridge::render`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Nothing differed from the last-applied state.
    Unchanged,
    /// The widget was updated.
    Applied,
    /// The layout is the table sentinel; the widget was bypassed.
    TableFallback,
    /// A cycle was already in progress; the render was queued (coalesced,
    /// last-write-wins) and will be replayed when the cycle completes.
    Queued,
}

struct AppliedState<T: GridItem> {
    ids: Vec<T::Id>,
    selection: HashSet<T::Id>,
    layout_hash: u64,
    container: Size,
}

struct PendingRender<T: GridItem> {
    items: Vec<T>,
    selection: HashSet<T::Id>,
    layout: LayoutSpec,
    container: Size,
}

/// Synchronizes a declarative (items, selection, layout) description with a
/// [`Grid`] widget and routes widget events back to embedder callbacks.
pub struct Bridge<T: GridItem, C> {
    grid: Grid<T>,
    phase: RenderPhase,
    last_applied: Option<AppliedState<T>>,
    queued: Option<PendingRender<T>>,
    cell_content: CellContentFn<T, C>,
    context_menu: ContextMenuFn<T::Id>,
    primary_action: PrimaryActionFn<T::Id>,
    selection_changed: SelectionChangedFn<T::Id>,
    focus_changed: Option<FocusChangedFn>,
    key_down: Option<KeyInterceptorFn>,
    key_up: Option<KeyInterceptorFn>,
}

impl<T: GridItem, C> Bridge<T, C> {
    /// Create a bridge around a freshly constructed widget.
    ///
    /// All callbacks default to inert implementations: no cell content
    /// (placeholder cells), an empty context menu, and no-op action and
    /// selection handlers.
    pub fn new() -> Self {
        Self {
            grid: Grid::new(),
            phase: RenderPhase::Idle,
            last_applied: None,
            queued: None,
            cell_content: Box::new(|_| None),
            context_menu: Box::new(|_| Vec::new()),
            primary_action: Box::new(|_| {}),
            selection_changed: Box::new(|_| {}),
            focus_changed: None,
            key_down: None,
            key_up: None,
        }
    }

    /// Set the cell content callback. `None` results render as empty
    /// placeholder cells, never as errors.
    pub fn cell_content(mut self, f: impl Fn(&T) -> Option<C> + 'static) -> Self {
        self.cell_content = Box::new(f);
        self
    }

    /// Set the context-menu builder, invoked lazily per menu request.
    pub fn context_menu(mut self, f: impl Fn(&[T::Id]) -> Vec<MenuItem> + 'static) -> Self {
        self.context_menu = Box::new(f);
        self
    }

    /// Set the primary-action callback (double-click or equivalent).
    pub fn on_primary_action(mut self, f: impl FnMut(&[T::Id]) + 'static) -> Self {
        self.primary_action = Box::new(f);
        self
    }

    /// Set the selection write-back callback (the two-way binding).
    pub fn on_selection_change(mut self, f: impl FnMut(HashSet<T::Id>) + 'static) -> Self {
        self.selection_changed = Box::new(f);
        self
    }

    /// Set the focus-changed notification callback.
    pub fn on_focus_change(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.focus_changed = Some(Box::new(f));
        self
    }

    /// Set the key-down interceptor. The embedder gets first refusal on
    /// every key before the widget's default handling.
    pub fn on_key_down(mut self, f: impl FnMut(&KeyCombo) -> EventResult + 'static) -> Self {
        self.key_down = Some(Box::new(f));
        self
    }

    /// Set the key-up interceptor.
    pub fn on_key_up(mut self, f: impl FnMut(&KeyCombo) -> EventResult + 'static) -> Self {
        self.key_up = Some(Box::new(f));
        self
    }

    /// The widget this bridge owns.
    pub fn grid(&self) -> &Grid<T> {
        &self.grid
    }

    /// The current render phase.
    pub fn phase(&self) -> RenderPhase {
        self.phase
    }

    /// Resolve cell content for an item.
    pub fn cell_for(&self, item: &T) -> Option<C> {
        (self.cell_content)(item)
    }

    /// Drive one declarative render cycle.
    ///
    /// Compares (items, selection, layout, container) against the
    /// last-applied state; an unchanged render is a no-op. A render arriving
    /// while a cycle is applying is queued and replayed afterwards, newest
    /// winning.
    pub fn render(
        &mut self,
        items: &[T],
        selection: &HashSet<T::Id>,
        layout: &LayoutSpec,
        container: Size,
        now: Instant,
    ) -> RenderOutcome {
        if self.phase != RenderPhase::Idle {
            debug!("render requested mid-cycle; queueing");
            self.queued = Some(PendingRender {
                items: items.to_vec(),
                selection: selection.clone(),
                layout: layout.clone(),
                container,
            });
            return RenderOutcome::Queued;
        }

        let mut outcome = self.render_cycle(items, selection, layout, container, now);

        // Replay whatever arrived while the cycle was applying.
        while let Some(pending) = self.queued.take() {
            outcome = self.render_cycle(
                &pending.items,
                &pending.selection,
                &pending.layout,
                pending.container,
                now,
            );
        }
        outcome
    }

    fn render_cycle(
        &mut self,
        items: &[T],
        selection: &HashSet<T::Id>,
        layout: &LayoutSpec,
        container: Size,
        now: Instant,
    ) -> RenderOutcome {
        self.phase = RenderPhase::Diffing;
        let layout_hash = layout.structural_hash();
        let ids: Vec<T::Id> = items.iter().map(|item| item.id()).collect();

        let unchanged = self.last_applied.as_ref().is_some_and(|last| {
            last.ids == ids
                && last.selection == *selection
                && last.layout_hash == layout_hash
                && last.container == container
        });
        if unchanged {
            self.phase = RenderPhase::Idle;
            return RenderOutcome::Unchanged;
        }

        self.phase = RenderPhase::Applying;

        if layout.is_table() {
            // The widget is bypassed entirely; forget the applied state so a
            // later switch back to a grid layout re-applies from scratch.
            self.last_applied = None;
            self.phase = RenderPhase::Idle;
            return RenderOutcome::TableFallback;
        }

        self.grid.apply_snapshot(items.to_vec(), selection, now);
        self.grid.apply_layout(layout, container);
        self.last_applied = Some(AppliedState {
            ids,
            selection: selection.clone(),
            layout_hash,
            container,
        });
        self.phase = RenderPhase::Idle;
        RenderOutcome::Applied
    }

    /// Translate a widget event bundle into embedder callbacks.
    ///
    /// Selection changes also refresh the bridge's last-applied selection so
    /// the echo render coming back from the declarative layer is recognized
    /// as unchanged.
    fn dispatch(&mut self, events: GridEvents<T::Id>) {
        if let Some(change) = events.selection_change {
            let set: HashSet<T::Id> = change.selected.iter().cloned().collect();
            if let Some(last) = &mut self.last_applied {
                last.selection = set.clone();
            }
            (self.selection_changed)(set);
        }
        if let Some(activation) = events.double_click {
            (self.primary_action)(&activation.selected);
        }
        if let Some(focus) = events.focus
            && let Some(f) = &mut self.focus_changed
        {
            f(focus.focused);
        }
    }

    /// Route a primary click into the widget and dispatch the results.
    pub fn handle_click(&mut self, pos: Point, modifiers: Modifiers, now: Instant) {
        let events = self.grid.handle_click(pos, modifiers, now);
        self.dispatch(events);
    }

    /// Route a context click; returns the menu to present, if any.
    ///
    /// The selection update (if the click landed outside the selection) is
    /// dispatched before the menu is built, so the builder sees the updated
    /// selection. An empty menu suppresses presentation.
    pub fn handle_context_click(&mut self, pos: Point) -> Option<Vec<MenuItem>> {
        let mut events = self.grid.handle_context_click(pos);
        let request = events.menu_request.take();
        self.dispatch(events);

        let request = request?;
        let menu = (self.context_menu)(&request.selected);
        if menu.is_empty() {
            None
        } else {
            Some(menu)
        }
    }

    /// Route a key press: embedder interceptor first, then the widget.
    ///
    /// Space is always reported unhandled (unless the interceptor consumes
    /// it) so the embedding context's default handling can run.
    pub fn handle_key_down(&mut self, combo: &KeyCombo) -> EventResult {
        if let Some(f) = &mut self.key_down
            && f(combo).is_handled()
        {
            return EventResult::Consumed;
        }
        let (result, events) = self.grid.handle_key(combo);
        self.dispatch(events);
        result
    }

    /// Route a key release to the embedder interceptor.
    pub fn handle_key_up(&mut self, combo: &KeyCombo) -> EventResult {
        if let Some(f) = &mut self.key_up
            && f(combo).is_handled()
        {
            return EventResult::Consumed;
        }
        EventResult::Ignored
    }

    /// Forward a focus change and notify the embedder.
    pub fn set_focused(&mut self, focused: bool) {
        let events = self.grid.set_focused(focused);
        self.dispatch(events);
    }

    /// Forward a window/application activation change. Highlight-only.
    pub fn set_window_active(&self, active: bool) {
        self.grid.set_window_active(active);
    }

    /// Advance time-driven widget state (transition retirement and deferred
    /// selection application). Returns true if visible state changed.
    pub fn tick(&self, now: Instant) -> bool {
        self.grid.tick(now)
    }
}

impl<T: GridItem, C> Default for Bridge<T, C> {
    fn default() -> Self {
        Self::new()
    }
}
