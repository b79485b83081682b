//! Terminal front end for the weft grid widget kit.
//!
//! Renders the demo model through a reconciliation bridge into a colored
//! cell grid, with a filter line, a status line, and a context-menu overlay.

mod config;
mod model;

use std::collections::HashSet;
use std::fs::File;
use std::io::{stdout, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event, MouseEventKind};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{cursor, event, execute, queue};
use log::{error, LevelFilter};
use simplelog::{Config as LogConfig, WriteLogger};
use thiserror::Error;
use tokio::sync::mpsc;
use uuid::Uuid;

use weft::bridge::Bridge;
use weft::geometry::{Point, Size};
use weft::grid::Highlight;
use weft::input::{convert_key_event, convert_modifiers, convert_mouse_button, ClickKind, Key,
    KeyCombo, Modifiers};
use weft::menu::{MenuItem, MenuItemKind, MenuRole};

use config::{ConfigError, DemoConfig};
use model::{generate_items, Item, LayoutMode, Model};

/// Rows reserved above the grid for the title and filter lines.
const HEADER_ROWS: u16 = 2;
/// Rows reserved below the grid for the status line.
const STATUS_ROWS: u16 = 1;
/// Items generated per bulk-add request.
const BULK_ADD_COUNT: usize = 1000;

#[derive(Debug, Error)]
enum DemoError {
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Writes from callbacks and menu handlers back into the model, applied by
/// the main loop so the model has a single writer.
#[derive(Debug, Clone)]
enum Command {
    SetSelection(HashSet<Uuid>),
    Open(Vec<Uuid>),
    Delete(Vec<Uuid>),
}

struct MenuState {
    items: Vec<MenuItem>,
    cursor: usize,
}

struct App {
    model: Model,
    bridge: Bridge<Item, String>,
    config: DemoConfig,
    container: Size,
    menu: Option<MenuState>,
    batch_tx: mpsc::UnboundedSender<Vec<Item>>,
    /// Redraw requested by something the grid's own dirty flag cannot see
    /// (filter edits, paint toggle, menu navigation).
    dirty: bool,
    quit: bool,
}

#[tokio::main]
async fn main() {
    let log_file = File::create("weft-demo.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, LogConfig::default(), log_file)
        .expect("Failed to initialize logger");

    let result = run().await;
    let _ = restore_terminal();
    if let Err(e) = result {
        error!("fatal: {e}");
        eprintln!("Error: {e}");
    }
}

async fn run() -> Result<(), DemoError> {
    let config = DemoConfig::load(Path::new("weft-demo.toml"))?;
    let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel();
    let (batch_tx, mut batch_rx) = mpsc::unbounded_channel();

    let mut app = App::new(config, cmd_tx, batch_tx);

    setup_terminal()?;

    // Crossterm events come from a dedicated blocking thread.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        loop {
            if event_tx.is_closed() {
                break;
            }
            match event::poll(Duration::from_millis(100)) {
                Ok(true) => {
                    if let Ok(ev) = event::read()
                        && event_tx.send(ev).is_err()
                    {
                        break;
                    }
                }
                Ok(false) => {}
                Err(_) => break,
            }
        }
    });

    let mut ticker = tokio::time::interval(Duration::from_millis(50));
    let mut out = stdout();

    app.bridge.set_focused(true);
    app.sync_container()?;

    while !app.quit {
        tokio::select! {
            maybe_event = event_rx.recv() => {
                let Some(ev) = maybe_event else { break };
                app.handle_event(ev)?;
            }
            Some(batch) = batch_rx.recv() => {
                // The whole batch lands as one replacement.
                app.model.extend(batch);
            }
            _ = ticker.tick() => {}
        }

        while let Ok(command) = cmd_rx.try_recv() {
            app.apply_command(command);
        }

        let now = Instant::now();
        app.render(now);
        app.bridge.tick(now);

        let animating = app.bridge.grid().animation_progress(now).is_some();
        if app.bridge.grid().is_dirty() || app.dirty || animating {
            app.draw(&mut out, now)?;
            app.bridge.grid().clear_dirty();
            app.dirty = false;
        }
    }

    Ok(())
}

fn setup_terminal() -> Result<(), std::io::Error> {
    enable_raw_mode()?;
    execute!(
        stdout(),
        EnterAlternateScreen,
        EnableMouseCapture,
        cursor::Hide
    )
}

fn restore_terminal() -> Result<(), std::io::Error> {
    execute!(
        stdout(),
        cursor::Show,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    disable_raw_mode()
}

/// Build the context menu for the current selection. An empty selection
/// gets no menu.
fn build_menu(tx: &mpsc::UnboundedSender<Command>, ids: &[Uuid]) -> Vec<MenuItem> {
    if ids.is_empty() {
        return Vec::new();
    }
    let open_ids = ids.to_vec();
    let open_tx = tx.clone();
    let delete_ids = ids.to_vec();
    let delete_tx = tx.clone();
    vec![
        MenuItem::action("Open", move || {
            let _ = open_tx.send(Command::Open(open_ids.clone()));
        })
        .shortcut(Key::Enter, Modifiers::NONE),
        MenuItem::separator(),
        MenuItem::action("Delete", move || {
            let _ = delete_tx.send(Command::Delete(delete_ids.clone()));
        })
        .role(MenuRole::Destructive),
    ]
}

impl App {
    fn new(
        config: DemoConfig,
        cmd_tx: mpsc::UnboundedSender<Command>,
        batch_tx: mpsc::UnboundedSender<Vec<Item>>,
    ) -> Self {
        let model = Model::new(config.initial_items);

        let selection_tx = cmd_tx.clone();
        let action_tx = cmd_tx.clone();
        let menu_tx = cmd_tx.clone();
        let bridge: Bridge<Item, String> = Bridge::new()
            .cell_content(|item: &Item| Some(format!("#{}", item.color.hex_code())))
            .context_menu(move |ids: &[Uuid]| build_menu(&menu_tx, ids))
            .on_selection_change(move |set| {
                let _ = selection_tx.send(Command::SetSelection(set));
            })
            .on_primary_action(move |ids: &[Uuid]| {
                let _ = action_tx.send(Command::Open(ids.to_vec()));
            });
        bridge.grid().set_animated(config.animate);
        bridge.grid().set_row_height(4.0);

        Self {
            model,
            bridge,
            config,
            container: Size::ZERO,
            menu: None,
            batch_tx,
            dirty: true,
            quit: false,
        }
    }

    fn sync_container(&mut self) -> Result<(), std::io::Error> {
        let (width, height) = crossterm::terminal::size()?;
        let rows = height.saturating_sub(HEADER_ROWS + STATUS_ROWS);
        self.container = Size::new(width as f64, rows as f64);
        self.bridge.grid().set_viewport(self.container);
        Ok(())
    }

    /// Push the declarative state through the bridge.
    fn render(&mut self, now: Instant) {
        let layout = self
            .model
            .layout_mode
            .layout(self.config.columns, self.config.spacing);
        self.bridge.render(
            &self.model.filtered_items,
            &self.model.selection,
            &layout,
            self.container,
            now,
        );
    }

    fn apply_command(&mut self, command: Command) {
        match command {
            Command::SetSelection(set) => self.model.set_selection(set),
            Command::Open(ids) => self.model.open(&ids),
            Command::Delete(ids) => self.model.delete(&ids.into_iter().collect()),
        }
    }

    fn handle_event(&mut self, ev: Event) -> Result<(), DemoError> {
        self.dirty = true;
        match ev {
            Event::Key(key_event) => {
                if let Some(combo) = convert_key_event(key_event) {
                    self.handle_key(combo);
                }
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(..) => self.sync_container()?,
            Event::FocusGained => self.bridge.set_window_active(true),
            Event::FocusLost => self.bridge.set_window_active(false),
            _ => {}
        }
        Ok(())
    }

    fn handle_key(&mut self, combo: KeyCombo) {
        if self.menu.is_some() {
            self.handle_menu_key(&combo);
            return;
        }

        if combo.modifiers.ctrl {
            match combo.key {
                Key::Char('q') => {
                    self.quit = true;
                    return;
                }
                Key::Char('r') => {
                    self.model.select_random();
                    return;
                }
                Key::Char('n') => {
                    self.add_many();
                    return;
                }
                Key::Char('l') => {
                    self.model.cycle_layout();
                    return;
                }
                _ => {}
            }
        }
        if combo.key == Key::Delete {
            let doomed = self.model.selection.clone();
            self.model.delete(&doomed);
            return;
        }

        if self.bridge.handle_key_down(&combo).is_handled() {
            return;
        }

        // The widget refused the key; default handling runs here.
        match combo.key {
            Key::Space => self.model.toggle_painted(),
            Key::Backspace => self.model.pop_filter(),
            Key::Char(c) if !combo.modifiers.ctrl && !combo.modifiers.alt => {
                self.model.push_filter(c);
            }
            _ => {}
        }
    }

    fn handle_menu_key(&mut self, combo: &KeyCombo) {
        let Some(menu) = &mut self.menu else { return };
        match combo.key {
            Key::Escape => self.menu = None,
            Key::Up => menu.cursor = step_menu_cursor(&menu.items, menu.cursor, -1),
            Key::Down => menu.cursor = step_menu_cursor(&menu.items, menu.cursor, 1),
            Key::Enter => {
                if let Some(item) = menu.items.get(menu.cursor) {
                    item.activate();
                }
                self.menu = None;
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: crossterm::event::MouseEvent) {
        // Any click closes an open menu before reaching the grid.
        if self.menu.is_some() {
            if matches!(mouse.kind, MouseEventKind::Down(_)) {
                self.menu = None;
            }
            return;
        }

        let grid_row = mouse.row.wrapping_sub(HEADER_ROWS);
        let pos = Point::new(mouse.column as f64, grid_row as f64);
        let in_grid = mouse.row >= HEADER_ROWS && (grid_row as f64) < self.container.height;

        match mouse.kind {
            MouseEventKind::Down(button) if in_grid => {
                match convert_mouse_button(button) {
                    Some(ClickKind::Primary) => {
                        let modifiers = convert_modifiers(mouse.modifiers);
                        self.bridge.handle_click(pos, modifiers, Instant::now());
                    }
                    Some(ClickKind::Secondary) => {
                        if let Some(items) = self.bridge.handle_context_click(pos) {
                            let cursor = step_menu_cursor(&items, 0, 0);
                            self.menu = Some(MenuState { items, cursor });
                        }
                    }
                    None => {}
                }
            }
            MouseEventKind::ScrollUp => self.bridge.grid().scroll_by(-3.0),
            MouseEventKind::ScrollDown => self.bridge.grid().scroll_by(3.0),
            _ => {}
        }
    }

    fn add_many(&self) {
        let batch_tx = self.batch_tx.clone();
        tokio::spawn(async move {
            let items = tokio::task::spawn_blocking(|| generate_items(BULK_ADD_COUNT))
                .await
                .unwrap_or_default();
            let _ = batch_tx.send(items);
        });
    }

    fn draw(&self, out: &mut impl Write, now: Instant) -> Result<(), std::io::Error> {
        queue!(out, Clear(ClearType::All), cursor::MoveTo(0, 0), ResetColor)?;

        queue!(
            out,
            SetAttribute(Attribute::Bold),
            Print(format!(
                "weft demo — {} — layout: {}",
                self.model.subtitle,
                self.model.layout_mode.help()
            )),
            SetAttribute(Attribute::Reset)
        )?;
        queue!(
            out,
            cursor::MoveTo(0, 1),
            Print(format!("filter: {}_", self.model.filter))
        )?;

        if self.model.layout_mode == LayoutMode::Table {
            self.draw_table(out)?;
        } else {
            self.draw_grid(out, now)?;
        }

        let (_, height) = crossterm::terminal::size()?;
        queue!(
            out,
            cursor::MoveTo(0, height.saturating_sub(1)),
            SetAttribute(Attribute::Dim),
            Print("ctrl+q quit · ctrl+r random · ctrl+n add 1000 · ctrl+l layout · del delete · space paint"),
            SetAttribute(Attribute::Reset)
        )?;

        if let Some(menu) = &self.menu {
            self.draw_menu(out, menu)?;
        }

        out.flush()
    }

    fn draw_grid(&self, out: &mut impl Write, now: Instant) -> Result<(), std::io::Error> {
        let grid = self.bridge.grid();
        let fading = grid.animation_progress(now);

        for position in grid.visible_range() {
            let Some(item) = grid.get(position) else { continue };
            let Some(rect) = grid.rect_for(position) else { continue };

            let x = rect.origin.x.round() as i32;
            let top = rect.origin.y.round() as i32;
            let width = rect.size.width.round().max(1.0) as usize;
            let height = rect.size.height.round().max(1.0) as i32;

            let highlight = grid.highlight_for(&item.id);
            let label = self.bridge.cell_for(&item).unwrap_or_default();
            // Cells fade in while a structural transition is in flight.
            let scale = fading.map_or(1.0, |p| 0.3 + 0.7 * p);
            let color = Color::Rgb {
                r: (item.color.r as f32 * scale) as u8,
                g: (item.color.g as f32 * scale) as u8,
                b: (item.color.b as f32 * scale) as u8,
            };

            for line in 0..height {
                let row = top + line;
                if row < 0 || row as f64 >= self.container.height || x < 0 {
                    continue;
                }
                queue!(out, cursor::MoveTo(x as u16, HEADER_ROWS + row as u16))?;
                if self.model.painted || line > 0 {
                    queue!(
                        out,
                        SetBackgroundColor(color),
                        Print(" ".repeat(width)),
                        ResetColor
                    )?;
                } else {
                    let marker = match highlight {
                        Highlight::SelectedActive => "▶ ",
                        Highlight::SelectedInactive => "▷ ",
                        Highlight::ForSelection => "· ",
                        Highlight::None => "  ",
                    };
                    let text: String = format!("{marker}{label}")
                        .chars()
                        .take(width.max(2))
                        .collect();
                    queue!(out, SetForegroundColor(color), Print(text), ResetColor)?;
                }
                if self.model.painted && line == 0 && highlight.is_selected() {
                    queue!(
                        out,
                        cursor::MoveTo(x as u16, HEADER_ROWS + row as u16),
                        SetBackgroundColor(color),
                        SetAttribute(Attribute::Reverse),
                        Print(if highlight == Highlight::SelectedActive {
                            "▶"
                        } else {
                            "▷"
                        }),
                        SetAttribute(Attribute::Reset),
                        ResetColor
                    )?;
                }
            }
        }
        Ok(())
    }

    fn draw_table(&self, out: &mut impl Write) -> Result<(), std::io::Error> {
        let rows = self.container.height as usize;
        for (line, item) in self.model.filtered_items.iter().take(rows).enumerate() {
            let selected = self.model.selection.contains(&item.id);
            queue!(out, cursor::MoveTo(0, HEADER_ROWS + line as u16))?;
            if selected {
                queue!(out, SetAttribute(Attribute::Reverse))?;
            }
            queue!(
                out,
                SetForegroundColor(Color::Rgb {
                    r: item.color.r,
                    g: item.color.g,
                    b: item.color.b,
                }),
                Print(format!(" #{}  {} ", item.color.hex_code(), item.id)),
                ResetColor,
                SetAttribute(Attribute::Reset)
            )?;
        }
        Ok(())
    }

    fn draw_menu(&self, out: &mut impl Write, menu: &MenuState) -> Result<(), std::io::Error> {
        let width = 24u16;
        let x = (self.container.width as u16).saturating_sub(width + 2);
        for (line, item) in menu.items.iter().enumerate() {
            queue!(out, cursor::MoveTo(x, HEADER_ROWS + line as u16))?;
            let text = match &item.kind {
                MenuItemKind::Action { title, role, .. } => {
                    let glyph = if *role == MenuRole::Destructive { "✗" } else { " " };
                    format!(" {glyph} {title:<18} ")
                }
                MenuItemKind::Separator => format!(" {} ", "─".repeat(20)),
                MenuItemKind::Submenu { title, .. } => format!("   {title:<16} ▸ "),
            };
            if line == menu.cursor {
                queue!(out, SetAttribute(Attribute::Reverse), Print(text), SetAttribute(Attribute::Reset))?;
            } else {
                queue!(out, SetBackgroundColor(Color::DarkGrey), Print(text), ResetColor)?;
            }
        }
        Ok(())
    }
}

/// Move the menu cursor to the nearest enabled actionable entry.
fn step_menu_cursor(items: &[MenuItem], from: usize, delta: i32) -> usize {
    if items.is_empty() {
        return 0;
    }
    let len = items.len() as i32;
    let mut index = from as i32;
    for _ in 0..len {
        index = (index + delta).rem_euclid(len);
        let candidate = &items[index as usize];
        if !candidate.disabled && matches!(candidate.kind, MenuItemKind::Action { .. }) {
            return index as usize;
        }
        if delta == 0 {
            index += 1;
        }
    }
    from
}
