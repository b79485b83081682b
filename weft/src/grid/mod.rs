//! The imperative, identity-indexed grid widget.
//!
//! `Grid<T>` holds an ordered item snapshot, an identity-keyed selection,
//! per-cell highlight state, and the resolved layout geometry. Structural
//! updates arrive as whole snapshots and are applied as diffs; interaction
//! handlers return pending event bundles for the bridge to dispatch.

pub mod animation;
pub mod diff;
pub mod events;
pub mod highlight;

use std::collections::{HashMap, HashSet};
use std::ops::Range;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use log::debug;

pub use animation::{Easing, StructuralAnimation};
pub use diff::{diff, SnapshotDiff};
pub use events::{
    DoubleClickEvent, FocusEvent, GridEvents, MenuRequestEvent, SelectionChangeEvent,
};
pub use highlight::Highlight;

use crate::geometry::{Point, Rect, Size};
use crate::input::{EventResult, Key, KeyCombo, Modifiers};
use crate::item::GridItem;
use crate::layout::{Geometry, LayoutSpec};
use crate::selection::Selection;

/// Two primary clicks on the same item within this interval form a
/// double-click gesture.
pub const DOUBLE_CLICK_INTERVAL: Duration = Duration::from_millis(400);

/// Default duration of an animated structural transition.
pub const STRUCTURAL_ANIMATION_DURATION: Duration = Duration::from_millis(250);

/// Unique identifier for a Grid widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridId(usize);

impl GridId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for GridId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__grid_{}", self.0)
    }
}

/// Internal state for the Grid widget.
#[derive(Debug)]
struct GridInner<T: GridItem> {
    /// The current snapshot, in visual order.
    items: Vec<T>,
    /// Identity to position index for the current snapshot.
    index: HashMap<T::Id, usize>,
    /// Selection state.
    selection: Selection<T::Id>,
    /// Selection waiting for the structural phase to settle.
    pending_selection: Option<HashSet<T::Id>>,
    /// Current cursor position (keyboard focus within the grid).
    cursor: Option<usize>,
    /// Scroll offset in container units.
    scroll_offset: f64,
    /// Viewport size (set by renderer).
    viewport: Size,
    /// Whether the widget holds input focus.
    focused: bool,
    /// Whether the embedding window/application is active.
    window_active: bool,
    /// Structural hash of the last applied layout spec.
    layout_hash: Option<u64>,
    /// Geometry resolved from the active layout.
    geometry: Geometry,
    /// Row height measured by the renderer, if any.
    measured_row_height: Option<f64>,
    /// Whether snapshot transitions animate.
    animate: bool,
    /// Duration for animated transitions.
    animation_duration: Duration,
    /// Easing for animated transitions.
    animation_easing: Easing,
    /// In-flight structural transition.
    animation: Option<StructuralAnimation>,
    /// Last primary click, for double-click detection.
    last_click: Option<(Instant, T::Id)>,
}

impl<T: GridItem> Default for GridInner<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
            selection: Selection::new(),
            pending_selection: None,
            cursor: None,
            scroll_offset: 0.0,
            viewport: Size::ZERO,
            focused: false,
            window_active: true,
            layout_hash: None,
            geometry: Geometry::empty(Size::ZERO),
            measured_row_height: None,
            animate: false,
            animation_duration: STRUCTURAL_ANIMATION_DURATION,
            animation_easing: Easing::default(),
            animation: None,
            last_click: None,
        }
    }
}

/// A selectable, identity-tracked grid widget.
///
/// Cheap to clone; clones share state. All mutation is expected to happen
/// from a single UI context — the lock only supports handle cloning, not
/// cross-thread mutation.
#[derive(Debug)]
pub struct Grid<T: GridItem> {
    /// Unique identifier.
    id: GridId,
    /// Internal state.
    inner: Arc<RwLock<GridInner<T>>>,
    /// Dirty flag for re-render.
    dirty: Arc<AtomicBool>,
}

impl<T: GridItem> Grid<T> {
    /// Create a new empty grid.
    pub fn new() -> Self {
        Self {
            id: GridId::new(),
            inner: Arc::new(RwLock::new(GridInner::default())),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get the unique ID.
    pub fn id(&self) -> GridId {
        self.id
    }

    /// Enable or disable animated structural transitions.
    pub fn set_animated(&self, animate: bool) {
        if let Ok(mut guard) = self.inner.write() {
            guard.animate = animate;
        }
    }

    /// Configure the transition timing.
    pub fn set_animation(&self, duration: Duration, easing: Easing) {
        if let Ok(mut guard) = self.inner.write() {
            guard.animation_duration = duration;
            guard.animation_easing = easing;
        }
    }

    // -------------------------------------------------------------------------
    // Item access
    // -------------------------------------------------------------------------

    /// Get the number of items.
    pub fn len(&self) -> usize {
        self.inner.read().map(|g| g.items.len()).unwrap_or(0)
    }

    /// Check if the grid is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get an item by position.
    pub fn get(&self, position: usize) -> Option<T> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.items.get(position).cloned())
    }

    /// Get all items in snapshot order.
    pub fn items(&self) -> Vec<T> {
        self.inner
            .read()
            .map(|g| g.items.clone())
            .unwrap_or_default()
    }

    /// The snapshot's identities in visual order.
    pub fn ids(&self) -> Vec<T::Id> {
        self.inner
            .read()
            .map(|g| g.items.iter().map(|item| item.id()).collect())
            .unwrap_or_default()
    }

    /// The current position of an identity, if present.
    pub fn position_of(&self, id: &T::Id) -> Option<usize> {
        self.inner.read().ok().and_then(|g| g.index.get(id).copied())
    }

    // -------------------------------------------------------------------------
    // Snapshot application
    // -------------------------------------------------------------------------

    /// Apply a new snapshot and target selection.
    ///
    /// Phase one replaces the item sequence structurally: only the diff
    /// against the current snapshot causes mutation, and an identical
    /// snapshot is a no-op. Phase two applies the selection; it runs
    /// immediately when nothing structural changed and no transition is in
    /// flight, and is otherwise deferred to the next [`tick`](Self::tick).
    ///
    /// Selection identities absent from the snapshot are silently dropped.
    /// Applying a pushed selection never emits a selection-change event.
    ///
    /// Returns the structural diff that was applied.
    pub fn apply_snapshot(
        &self,
        items: Vec<T>,
        selection: &HashSet<T::Id>,
        now: Instant,
    ) -> SnapshotDiff<T::Id> {
        let Ok(mut guard) = self.inner.write() else {
            return SnapshotDiff::empty();
        };

        let old_ids: Vec<T::Id> = guard.items.iter().map(|item| item.id()).collect();
        let new_ids: Vec<T::Id> = items.iter().map(|item| item.id()).collect();
        let structural = diff::diff(&old_ids, &new_ids);

        if !structural.is_empty() {
            debug!(
                "{}: applying snapshot ({} removed, {} inserted, {} moved)",
                self.id,
                structural.removed.len(),
                structural.inserted.len(),
                structural.moved.len()
            );
            guard.index = new_ids
                .iter()
                .enumerate()
                .map(|(i, id)| (id.clone(), i))
                .collect();
            if let Some(cursor) = guard.cursor
                && cursor >= new_ids.len()
            {
                guard.cursor = new_ids.len().checked_sub(1);
            }
            if guard.animate {
                // A newer transition supersedes the in-flight one wholesale.
                guard.animation = Some(StructuralAnimation::new(
                    now,
                    guard.animation_duration,
                    guard.animation_easing,
                ));
            }
            self.dirty.store(true, Ordering::SeqCst);
        }

        // Payloads refresh even when the structure is unchanged; identity
        // survival keeps the cell, not the cell's old content.
        guard.items = items;
        if !structural.is_empty() {
            let max = Self::max_scroll(&guard);
            guard.scroll_offset = guard.scroll_offset.clamp(0.0, max);
        }

        let animating = guard
            .animation
            .as_ref()
            .is_some_and(|a| !a.is_complete(now));
        if structural.is_empty() && !animating {
            self.apply_selection(&mut guard, selection);
        } else {
            guard.pending_selection = Some(selection.clone());
        }

        structural
    }

    /// Apply the pushed selection, filtering stale identities.
    fn apply_selection(&self, guard: &mut GridInner<T>, target: &HashSet<T::Id>) {
        let known: Vec<T::Id> = target
            .iter()
            .filter(|id| guard.index.contains_key(*id))
            .cloned()
            .collect();
        let dropped = target.len() - known.len();
        if dropped > 0 {
            debug!("{}: dropping {dropped} stale selection identities", self.id);
        }
        let (added, removed) = guard.selection.replace(known);
        if !added.is_empty() || !removed.is_empty() {
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Apply a deferred selection if the structural phase has settled.
    ///
    /// Returns true if a pending selection was applied.
    pub fn flush_pending(&self, now: Instant) -> bool {
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };
        if guard
            .animation
            .as_ref()
            .is_some_and(|a| !a.is_complete(now))
        {
            return false;
        }
        if let Some(target) = guard.pending_selection.take() {
            self.apply_selection(&mut guard, &target);
            true
        } else {
            false
        }
    }

    /// Advance time-driven state: retire finished transitions and flush any
    /// deferred selection.
    ///
    /// Returns true if visible state changed.
    pub fn tick(&self, now: Instant) -> bool {
        let mut changed = false;
        if let Ok(mut guard) = self.inner.write()
            && guard.animation.as_ref().is_some_and(|a| a.is_complete(now))
        {
            guard.animation = None;
            self.dirty.store(true, Ordering::SeqCst);
            changed = true;
        }
        self.flush_pending(now) || changed
    }

    /// Eased progress of the in-flight transition, if any.
    pub fn animation_progress(&self, now: Instant) -> Option<f32> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.animation.as_ref().map(|a| a.progress(now)))
    }

    // -------------------------------------------------------------------------
    // Layout
    // -------------------------------------------------------------------------

    /// Apply a layout spec, re-resolving geometry only when the spec's
    /// structural hash or the container size changed.
    ///
    /// The scroll offset is preserved across the swap, clamped to the new
    /// content height. Returns true if the geometry was re-resolved.
    pub fn apply_layout(&self, spec: &LayoutSpec, container: Size) -> bool {
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };
        let hash = spec.structural_hash();
        if guard.layout_hash == Some(hash) && guard.geometry.container == container {
            return false;
        }
        debug!("{}: resolving layout for container {container:?}", self.id);
        guard.geometry = spec.resolve(container);
        guard.layout_hash = Some(hash);
        let max = Self::max_scroll(&guard);
        guard.scroll_offset = guard.scroll_offset.clamp(0.0, max);
        self.dirty.store(true, Ordering::SeqCst);
        true
    }

    /// The currently resolved geometry.
    pub fn geometry(&self) -> Geometry {
        self.inner
            .read()
            .map(|g| g.geometry.clone())
            .unwrap_or_else(|_| Geometry::empty(Size::ZERO))
    }

    /// The structural hash of the last applied layout.
    pub fn layout_hash(&self) -> Option<u64> {
        self.inner.read().ok().and_then(|g| g.layout_hash)
    }

    /// Report the row height measured by the renderer.
    pub fn set_row_height(&self, height: f64) {
        if let Ok(mut guard) = self.inner.write()
            && guard.measured_row_height != Some(height)
        {
            guard.measured_row_height = Some(height);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    fn row_height_inner(guard: &GridInner<T>) -> f64 {
        guard.geometry.row_height(guard.measured_row_height)
    }

    /// The rect of the item at `position` in viewport coordinates, with the
    /// scroll offset applied.
    pub fn rect_for(&self, position: usize) -> Option<Rect> {
        let guard = self.inner.read().ok()?;
        let row_height = Self::row_height_inner(&guard);
        let rect = guard.geometry.rect_for(position, row_height)?;
        Some(Rect::new(
            Point::new(rect.origin.x, rect.origin.y - guard.scroll_offset),
            rect.size,
        ))
    }

    // -------------------------------------------------------------------------
    // Scrolling and viewport
    // -------------------------------------------------------------------------

    /// Set the viewport size (called by renderer).
    pub fn set_viewport(&self, size: Size) {
        if let Ok(mut guard) = self.inner.write() {
            guard.viewport = size;
            let max = Self::max_scroll(&guard);
            guard.scroll_offset = guard.scroll_offset.clamp(0.0, max);
        }
    }

    /// Get the scroll offset.
    pub fn scroll_offset(&self) -> f64 {
        self.inner.read().map(|g| g.scroll_offset).unwrap_or(0.0)
    }

    /// Set the scroll offset, clamped to the content height.
    pub fn set_scroll_offset(&self, offset: f64) {
        if let Ok(mut guard) = self.inner.write() {
            let max = Self::max_scroll(&guard);
            let next = offset.clamp(0.0, max);
            if next != guard.scroll_offset {
                guard.scroll_offset = next;
                self.dirty.store(true, Ordering::SeqCst);
            }
        }
    }

    /// Scroll by a delta.
    pub fn scroll_by(&self, delta: f64) {
        self.set_scroll_offset(self.scroll_offset() + delta);
    }

    fn max_scroll(guard: &GridInner<T>) -> f64 {
        let row_height = Self::row_height_inner(guard);
        let content = guard.geometry.content_height(guard.items.len(), row_height);
        (content - guard.viewport.height).max(0.0)
    }

    /// Scroll the minimum amount to make a position fully visible.
    pub fn scroll_to_position(&self, position: usize) {
        if let Ok(mut guard) = self.inner.write() {
            if position >= guard.items.len() || guard.viewport.height <= 0.0 {
                return;
            }
            let row_height = Self::row_height_inner(&guard);
            let Some(rect) = guard.geometry.rect_for(position, row_height) else {
                return;
            };
            let top = rect.origin.y;
            let bottom = top + rect.size.height;
            if top < guard.scroll_offset {
                guard.scroll_offset = top;
                self.dirty.store(true, Ordering::SeqCst);
            } else if bottom > guard.scroll_offset + guard.viewport.height {
                guard.scroll_offset = bottom - guard.viewport.height;
                self.dirty.store(true, Ordering::SeqCst);
            }
        }
    }

    /// The range of item positions intersecting the viewport.
    pub fn visible_range(&self) -> Range<usize> {
        let Ok(guard) = self.inner.read() else {
            return 0..0;
        };
        let per_row = guard.geometry.slots_per_row();
        if guard.items.is_empty() || per_row == 0 || guard.viewport.height <= 0.0 {
            return 0..0;
        }
        let row_height = Self::row_height_inner(&guard);
        let row_pitch = row_height + guard.geometry.row_spacing;
        if row_pitch <= 0.0 {
            return 0..guard.items.len();
        }
        let top = (guard.scroll_offset - guard.geometry.insets.top).max(0.0);
        let first_row = (top / row_pitch).floor() as usize;
        let visible_rows = (guard.viewport.height / row_pitch).ceil() as usize + 1;
        let start = (first_row * per_row).min(guard.items.len());
        let end = ((first_row + visible_rows) * per_row).min(guard.items.len());
        start..end
    }

    // -------------------------------------------------------------------------
    // Focus, activation, highlight
    // -------------------------------------------------------------------------

    /// Set input focus. Recomputes highlights only; never touches selection.
    pub fn set_focused(&self, focused: bool) -> GridEvents<T::Id> {
        let mut events = GridEvents::default();
        if let Ok(mut guard) = self.inner.write()
            && guard.focused != focused
        {
            guard.focused = focused;
            self.dirty.store(true, Ordering::SeqCst);
            events.focus = Some(FocusEvent { focused });
        }
        events
    }

    /// Whether the widget currently holds input focus.
    pub fn is_focused(&self) -> bool {
        self.inner.read().map(|g| g.focused).unwrap_or(false)
    }

    /// Notify the widget of window/application activation changes.
    /// Recomputes highlights only; never touches selection.
    pub fn set_window_active(&self, active: bool) {
        if let Ok(mut guard) = self.inner.write()
            && guard.window_active != active
        {
            guard.window_active = active;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// The highlight state for a cell.
    pub fn highlight_for(&self, id: &T::Id) -> Highlight {
        let Ok(guard) = self.inner.read() else {
            return Highlight::None;
        };
        let selected = guard.selection.is_selected(id);
        let on_cursor = guard
            .cursor
            .and_then(|c| guard.items.get(c))
            .is_some_and(|item| &item.id() == id);
        Highlight::derive(selected, on_cursor, guard.focused, guard.window_active)
    }

    /// Current cursor position.
    pub fn cursor(&self) -> Option<usize> {
        self.inner.read().ok().and_then(|g| g.cursor)
    }

    // -------------------------------------------------------------------------
    // Selection access
    // -------------------------------------------------------------------------

    /// Selected identities in snapshot order.
    pub fn selected_ids(&self) -> Vec<T::Id> {
        self.inner
            .read()
            .map(|g| Self::selected_ordered(&g))
            .unwrap_or_default()
    }

    /// The selection as a set.
    pub fn selection_set(&self) -> HashSet<T::Id> {
        self.inner
            .read()
            .map(|g| g.selection.ids().clone())
            .unwrap_or_default()
    }

    /// Check if an identity is selected.
    pub fn is_selected(&self, id: &T::Id) -> bool {
        self.inner
            .read()
            .map(|g| g.selection.is_selected(id))
            .unwrap_or(false)
    }

    fn selected_ordered(guard: &GridInner<T>) -> Vec<T::Id> {
        guard
            .items
            .iter()
            .map(|item| item.id())
            .filter(|id| guard.selection.is_selected(id))
            .collect()
    }

    fn selection_change(
        guard: &GridInner<T>,
        added: Vec<T::Id>,
        removed: Vec<T::Id>,
    ) -> Option<SelectionChangeEvent<T::Id>> {
        if added.is_empty() && removed.is_empty() {
            return None;
        }
        Some(SelectionChangeEvent {
            selected: Self::selected_ordered(guard),
            added,
            removed,
        })
    }

    // -------------------------------------------------------------------------
    // Interaction
    // -------------------------------------------------------------------------

    fn hit_test(guard: &GridInner<T>, pos: Point) -> Option<usize> {
        let row_height = Self::row_height_inner(guard);
        let content_point = Point::new(pos.x, pos.y + guard.scroll_offset);
        guard
            .geometry
            .slot_at(content_point, row_height, guard.items.len())
    }

    /// Handle a primary click at a viewport position.
    ///
    /// Plain click selects the hit item, Ctrl toggles it, Shift extends a
    /// range from the anchor. A click on empty space clears the selection.
    /// A second click on the same item within [`DOUBLE_CLICK_INTERVAL`]
    /// fires a double-click for the current selection and changes nothing.
    pub fn handle_click(&self, pos: Point, modifiers: Modifiers, now: Instant) -> GridEvents<T::Id> {
        let mut events = GridEvents::default();
        let Ok(mut guard) = self.inner.write() else {
            return events;
        };

        let Some(position) = Self::hit_test(&guard, pos) else {
            guard.last_click = None;
            if !modifiers.any() && !guard.selection.is_empty() {
                let removed = guard.selection.clear();
                guard.cursor = None;
                events.selection_change = Self::selection_change(&guard, vec![], removed);
                self.dirty.store(true, Ordering::SeqCst);
            }
            return events;
        };
        let id = guard.items[position].id();

        let is_double = !modifiers.any()
            && guard.last_click.as_ref().is_some_and(|(at, last)| {
                now.duration_since(*at) <= DOUBLE_CLICK_INTERVAL && *last == id
            });
        if is_double && !guard.selection.is_empty() {
            // The first click of the gesture already established the
            // selection; the second only activates it.
            guard.last_click = None;
            events.double_click = Some(DoubleClickEvent {
                selected: Self::selected_ordered(&guard),
            });
            return events;
        }

        let ordered: Vec<T::Id> = guard.items.iter().map(|item| item.id()).collect();
        let (added, removed) = if modifiers.shift {
            guard.selection.range_select(&id, &ordered, modifiers.ctrl)
        } else if modifiers.ctrl {
            guard.selection.toggle(&id)
        } else {
            guard.selection.select(&id)
        };
        guard.cursor = Some(position);
        guard.last_click = Some((now, id));
        events.selection_change = Self::selection_change(&guard, added, removed);
        if events.selection_change.is_some() {
            self.dirty.store(true, Ordering::SeqCst);
        }
        events
    }

    /// Handle a secondary (context) click at a viewport position.
    ///
    /// If the click lands outside the current selection, the selection first
    /// becomes exactly the clicked item (a miss clears it); then a context
    /// menu is requested for the possibly-updated selection.
    pub fn handle_context_click(&self, pos: Point) -> GridEvents<T::Id> {
        let mut events = GridEvents::default();
        let Ok(mut guard) = self.inner.write() else {
            return events;
        };

        match Self::hit_test(&guard, pos) {
            Some(position) => {
                let id = guard.items[position].id();
                if !guard.selection.is_selected(&id) {
                    let (added, removed) = guard.selection.select(&id);
                    guard.cursor = Some(position);
                    events.selection_change = Self::selection_change(&guard, added, removed);
                    self.dirty.store(true, Ordering::SeqCst);
                }
            }
            None => {
                if !guard.selection.is_empty() {
                    let removed = guard.selection.clear();
                    guard.cursor = None;
                    events.selection_change = Self::selection_change(&guard, vec![], removed);
                    self.dirty.store(true, Ordering::SeqCst);
                }
            }
        }

        events.menu_request = Some(MenuRequestEvent {
            selected: Self::selected_ordered(&guard),
        });
        events
    }

    /// Handle keyboard input.
    ///
    /// Space is always returned [`EventResult::Ignored`] so the embedding
    /// context gets first refusal.
    pub fn handle_key(&self, combo: &KeyCombo) -> (EventResult, GridEvents<T::Id>) {
        let mut events = GridEvents::default();
        if combo.key == Key::Space {
            return (EventResult::Ignored, events);
        }

        let Ok(mut guard) = self.inner.write() else {
            return (EventResult::Ignored, events);
        };
        if guard.items.is_empty() {
            return (EventResult::Ignored, events);
        }
        let per_row = guard.geometry.slots_per_row().max(1);
        let last = guard.items.len() - 1;

        let target = match combo.key {
            Key::Left if !combo.modifiers.ctrl => {
                Some(guard.cursor.map_or(0, |c| c.saturating_sub(1)))
            }
            Key::Right if !combo.modifiers.ctrl => {
                Some(guard.cursor.map_or(0, |c| (c + 1).min(last)))
            }
            Key::Up if !combo.modifiers.ctrl => {
                Some(guard.cursor.map_or(0, |c| c.saturating_sub(per_row)))
            }
            Key::Down if !combo.modifiers.ctrl => {
                Some(guard.cursor.map_or(0, |c| (c + per_row).min(last)))
            }
            Key::Home => Some(0),
            Key::End => Some(last),
            Key::Char('a') if combo.modifiers.ctrl => {
                let ordered: Vec<T::Id> = guard.items.iter().map(|item| item.id()).collect();
                let added = guard.selection.select_all(&ordered);
                events.selection_change = Self::selection_change(&guard, added, vec![]);
                if events.selection_change.is_some() {
                    self.dirty.store(true, Ordering::SeqCst);
                }
                return (EventResult::Consumed, events);
            }
            Key::Escape => {
                if guard.selection.is_empty() {
                    return (EventResult::Ignored, events);
                }
                let removed = guard.selection.clear();
                guard.cursor = None;
                events.selection_change = Self::selection_change(&guard, vec![], removed);
                self.dirty.store(true, Ordering::SeqCst);
                return (EventResult::Consumed, events);
            }
            Key::Enter => {
                if guard.selection.is_empty() {
                    return (EventResult::Ignored, events);
                }
                events.double_click = Some(DoubleClickEvent {
                    selected: Self::selected_ordered(&guard),
                });
                return (EventResult::Consumed, events);
            }
            _ => None,
        };

        let Some(target) = target else {
            return (EventResult::Ignored, events);
        };

        let id = guard.items[target].id();
        let (added, removed) = if combo.modifiers.shift {
            let ordered: Vec<T::Id> = guard.items.iter().map(|item| item.id()).collect();
            guard.selection.range_select(&id, &ordered, false)
        } else {
            guard.selection.select(&id)
        };
        guard.cursor = Some(target);
        events.selection_change = Self::selection_change(&guard, added, removed);
        self.dirty.store(true, Ordering::SeqCst);
        drop(guard);
        self.scroll_to_position(target);
        (EventResult::Consumed, events)
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the grid has changed since the last render.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl<T: GridItem> Clone for Grid<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<T: GridItem> Default for Grid<T> {
    fn default() -> Self {
        Self::new()
    }
}
