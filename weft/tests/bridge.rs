use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::time::{Duration, Instant};

use weft::bridge::{Bridge, RenderOutcome};
use weft::geometry::{Point, Size};
use weft::input::{EventResult, Key, KeyCombo, Modifiers};
use weft::item::GridItem;
use weft::layout::LayoutSpec;
use weft::menu::MenuItem;

#[derive(Debug, Clone, PartialEq)]
struct Card {
    id: u32,
}

impl GridItem for Card {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

fn cards(ids: &[u32]) -> Vec<Card> {
    ids.iter().map(|&id| Card { id }).collect()
}

fn id_set(ids: &[u32]) -> HashSet<u32> {
    ids.iter().copied().collect()
}

fn layout() -> LayoutSpec {
    LayoutSpec::columns(2, 0.0)
}

const CONTAINER: Size = Size::new(100.0, 30.0);

/// Center of the cell at `position` for the two-column test layout.
fn cell(position: usize) -> Point {
    let col = position % 2;
    let row = position / 2;
    Point::new(col as f64 * 50.0 + 25.0, row as f64 * 10.0 + 5.0)
}

fn bridge() -> Bridge<Card, String> {
    let bridge: Bridge<Card, String> = Bridge::new();
    bridge.grid().set_viewport(CONTAINER);
    bridge
}

#[test]
fn test_render_applies_then_short_circuits() {
    let now = Instant::now();
    let mut bridge = bridge();

    let outcome = bridge.render(&cards(&[1, 2, 3]), &id_set(&[2]), &layout(), CONTAINER, now);
    assert_eq!(outcome, RenderOutcome::Applied);
    assert_eq!(bridge.grid().ids(), vec![1, 2, 3]);
    bridge.tick(now);
    assert_eq!(bridge.grid().selection_set(), id_set(&[2]));

    let outcome = bridge.render(&cards(&[1, 2, 3]), &id_set(&[2]), &layout(), CONTAINER, now);
    assert_eq!(outcome, RenderOutcome::Unchanged);
}

#[test]
fn test_render_applies_selection_only_changes() {
    let now = Instant::now();
    let mut bridge = bridge();
    bridge.render(&cards(&[1, 2, 3]), &HashSet::new(), &layout(), CONTAINER, now);
    bridge.tick(now);

    let outcome = bridge.render(&cards(&[1, 2, 3]), &id_set(&[3]), &layout(), CONTAINER, now);
    assert_eq!(outcome, RenderOutcome::Applied);
    // No structural change, so the selection lands without another tick.
    assert_eq!(bridge.grid().selection_set(), id_set(&[3]));
}

#[test]
fn test_render_filters_stale_selection() {
    let now = Instant::now();
    let mut bridge = bridge();
    bridge.render(&cards(&[1, 2]), &id_set(&[2, 99]), &layout(), CONTAINER, now);
    bridge.tick(now);
    assert_eq!(bridge.grid().selection_set(), id_set(&[2]));
}

#[test]
fn test_container_resize_triggers_relayout() {
    let now = Instant::now();
    let mut bridge = bridge();
    bridge.render(&cards(&[1, 2]), &HashSet::new(), &layout(), CONTAINER, now);

    let wider = Size::new(200.0, 30.0);
    let outcome = bridge.render(&cards(&[1, 2]), &HashSet::new(), &layout(), wider, now);
    assert_eq!(outcome, RenderOutcome::Applied);
    assert_eq!(bridge.grid().geometry().container, wider);
}

#[test]
fn test_double_click_routes_primary_action_once() {
    let now = Instant::now();
    let actions: Rc<RefCell<Vec<Vec<u32>>>> = Rc::new(RefCell::new(Vec::new()));
    let selections: Rc<RefCell<Vec<HashSet<u32>>>> = Rc::new(RefCell::new(Vec::new()));

    let actions_log = Rc::clone(&actions);
    let selections_log = Rc::clone(&selections);
    let mut bridge = bridge()
        .on_primary_action(move |ids: &[u32]| actions_log.borrow_mut().push(ids.to_vec()))
        .on_selection_change(move |set| selections_log.borrow_mut().push(set));
    bridge.grid().set_viewport(CONTAINER);

    bridge.render(&cards(&[1, 2]), &HashSet::new(), &layout(), CONTAINER, now);
    bridge.tick(now);

    bridge.handle_click(cell(0), Modifiers::NONE, now);
    assert_eq!(selections.borrow().len(), 1);
    assert_eq!(selections.borrow()[0], id_set(&[1]));
    assert!(actions.borrow().is_empty());

    bridge.handle_click(cell(0), Modifiers::NONE, now + Duration::from_millis(200));
    assert_eq!(actions.borrow().as_slice(), &[vec![1]]);
    // The gesture fired no second selection change.
    assert_eq!(selections.borrow().len(), 1);
}

#[test]
fn test_context_menu_sees_updated_selection() {
    let now = Instant::now();
    let menu_selections: Rc<RefCell<Vec<Vec<u32>>>> = Rc::new(RefCell::new(Vec::new()));

    let log = Rc::clone(&menu_selections);
    let mut bridge = bridge().context_menu(move |ids: &[u32]| {
        log.borrow_mut().push(ids.to_vec());
        vec![MenuItem::action("Open", || {})]
    });
    bridge.grid().set_viewport(CONTAINER);

    bridge.render(&cards(&[1, 2, 3]), &HashSet::new(), &layout(), CONTAINER, now);
    bridge.tick(now);
    bridge.handle_click(cell(0), Modifiers::NONE, now);

    // Context click outside the selection reselects before building.
    let menu = bridge.handle_context_click(cell(2));
    assert!(menu.is_some());
    assert_eq!(menu_selections.borrow().as_slice(), &[vec![3]]);
}

#[test]
fn test_empty_menu_is_suppressed() {
    let now = Instant::now();
    let mut bridge = bridge().context_menu(|_| Vec::new());
    bridge.grid().set_viewport(CONTAINER);
    bridge.render(&cards(&[1, 2]), &HashSet::new(), &layout(), CONTAINER, now);
    bridge.tick(now);

    assert!(bridge.handle_context_click(cell(0)).is_none());
}

#[test]
fn test_space_is_reported_unhandled() {
    let now = Instant::now();
    let mut bridge = bridge();
    bridge.render(&cards(&[1, 2]), &HashSet::new(), &layout(), CONTAINER, now);
    bridge.tick(now);

    let result = bridge.handle_key_down(&KeyCombo::key(Key::Space));
    assert_eq!(result, EventResult::Ignored);
}

#[test]
fn test_key_interceptor_gets_first_refusal() {
    let now = Instant::now();
    let mut bridge = bridge().on_key_down(|combo: &KeyCombo| {
        if combo.key == Key::Down {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    });
    bridge.grid().set_viewport(CONTAINER);
    bridge.render(&cards(&[1, 2]), &HashSet::new(), &layout(), CONTAINER, now);
    bridge.tick(now);

    // The interceptor consumes Down before the widget can move selection.
    let result = bridge.handle_key_down(&KeyCombo::key(Key::Down));
    assert_eq!(result, EventResult::Consumed);
    assert!(bridge.grid().selection_set().is_empty());

    // Unintercepted keys fall through to the widget.
    let result = bridge.handle_key_down(&KeyCombo::key(Key::Right));
    assert_eq!(result, EventResult::Consumed);
    assert_eq!(bridge.grid().selection_set(), id_set(&[1]));
}

#[test]
fn test_interceptor_may_claim_space() {
    let now = Instant::now();
    let mut bridge = bridge().on_key_down(|_: &KeyCombo| EventResult::Consumed);
    bridge.render(&cards(&[1]), &HashSet::new(), &layout(), CONTAINER, now);

    let result = bridge.handle_key_down(&KeyCombo::key(Key::Space));
    assert_eq!(result, EventResult::Consumed);
}

#[test]
fn test_table_layout_bypasses_widget() {
    let now = Instant::now();
    let mut bridge = bridge();

    let outcome = bridge.render(
        &cards(&[1, 2, 3]),
        &HashSet::new(),
        &LayoutSpec::Table,
        CONTAINER,
        now,
    );
    assert_eq!(outcome, RenderOutcome::TableFallback);
    assert!(bridge.grid().ids().is_empty());

    // Switching back to a grid layout re-applies from scratch.
    let outcome = bridge.render(&cards(&[1, 2, 3]), &HashSet::new(), &layout(), CONTAINER, now);
    assert_eq!(outcome, RenderOutcome::Applied);
    assert_eq!(bridge.grid().ids(), vec![1, 2, 3]);
}

#[test]
fn test_user_selection_echo_render_is_unchanged() {
    let now = Instant::now();
    let written: Rc<RefCell<Option<HashSet<u32>>>> = Rc::new(RefCell::new(None));
    let log = Rc::clone(&written);
    let mut bridge = bridge().on_selection_change(move |set| *log.borrow_mut() = Some(set));
    bridge.grid().set_viewport(CONTAINER);

    bridge.render(&cards(&[1, 2]), &HashSet::new(), &layout(), CONTAINER, now);
    bridge.tick(now);
    bridge.handle_click(cell(1), Modifiers::NONE, now);

    let echoed = written.borrow().clone().expect("selection written back");
    assert_eq!(echoed, id_set(&[2]));

    // The declarative layer re-renders with the selection it was handed;
    // the bridge recognizes its own echo.
    let outcome = bridge.render(&cards(&[1, 2]), &echoed, &layout(), CONTAINER, now);
    assert_eq!(outcome, RenderOutcome::Unchanged);
}

#[test]
fn test_focus_change_notifies_embedder() {
    let focus_log: Rc<RefCell<Vec<bool>>> = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&focus_log);
    let mut bridge = bridge().on_focus_change(move |focused| log.borrow_mut().push(focused));

    bridge.set_focused(true);
    bridge.set_focused(true);
    bridge.set_focused(false);
    assert_eq!(focus_log.borrow().as_slice(), &[true, false]);
}

#[test]
fn test_tick_flushes_deferred_selection() {
    let now = Instant::now();
    let mut bridge = bridge();

    // The initial render is structural, so the selection is deferred.
    bridge.render(&cards(&[1, 2, 3]), &id_set(&[2]), &layout(), CONTAINER, now);
    assert!(bridge.grid().selection_set().is_empty());

    assert!(bridge.tick(now));
    assert_eq!(bridge.grid().selection_set(), id_set(&[2]));
}

#[test]
fn test_cell_content_defaults_to_placeholder() {
    let bridge = bridge();
    assert!(bridge.cell_for(&Card { id: 1 }).is_none());

    let bridge: Bridge<Card, String> =
        Bridge::new().cell_content(|card: &Card| Some(format!("#{}", card.id)));
    assert_eq!(bridge.cell_for(&Card { id: 7 }), Some("#7".to_string()));
}
