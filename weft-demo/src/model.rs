//! Demo item model and filtering pipeline.

use std::collections::HashSet;

use log::info;
use uuid::Uuid;
use weft::geometry::Size;
use weft::item::GridItem;
use weft::layout::{Column, LayoutSpec};

/// A color derived from an item's identity bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Lowercase hex code without the leading `#`.
    pub fn hex_code(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// One displayable item. The identity is the payload; the color is derived
/// from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: Uuid,
    pub color: Rgb,
}

impl Item {
    /// Create an item with a fresh random identity.
    pub fn new() -> Self {
        let id = Uuid::new_v4();
        let bytes = id.as_bytes();
        Self {
            id,
            color: Rgb {
                r: bytes[0],
                g: bytes[1],
                b: bytes[2],
            },
        }
    }
}

impl Default for Item {
    fn default() -> Self {
        Self::new()
    }
}

impl GridItem for Item {
    type Id = Uuid;

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Build a batch of items. Runs on a background task for the bulk-add
/// operation; the result is merged into the model as one replacement.
pub fn generate_items(count: usize) -> Vec<Item> {
    (0..count).map(|_| Item::new()).collect()
}

/// The layout strategies the demo cycles through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    FixedSize,
    #[default]
    Columns,
    Grid,
    Table,
}

impl LayoutMode {
    /// The next mode in the cycle.
    pub fn next(self) -> Self {
        match self {
            LayoutMode::FixedSize => LayoutMode::Columns,
            LayoutMode::Columns => LayoutMode::Grid,
            LayoutMode::Grid => LayoutMode::Table,
            LayoutMode::Table => LayoutMode::FixedSize,
        }
    }

    /// Short display name.
    pub fn help(&self) -> &'static str {
        match self {
            LayoutMode::FixedSize => "fixed item size",
            LayoutMode::Columns => "columns",
            LayoutMode::Grid => "grid",
            LayoutMode::Table => "table",
        }
    }

    /// The layout spec for this mode.
    pub fn layout(&self, columns: usize, spacing: f64) -> LayoutSpec {
        match self {
            LayoutMode::FixedSize => LayoutSpec::fixed_size(Size::new(16.0, 8.0), spacing),
            LayoutMode::Columns => LayoutSpec::columns(columns, spacing),
            LayoutMode::Grid => LayoutSpec::grid(
                vec![
                    Column::fixed(14.0),
                    Column::adaptive(10.0, 24.0),
                    Column::flexible(8.0, 40.0),
                ],
                Some(spacing),
            ),
            LayoutMode::Table => LayoutSpec::Table,
        }
    }
}

/// The authoritative declarative model: items, selection, filter, and the
/// values derived from them. Derived state is recomputed on every mutation.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub items: Vec<Item>,
    pub selection: HashSet<Uuid>,
    pub filter: String,
    pub layout_mode: LayoutMode,
    pub painted: bool,
    pub filtered_items: Vec<Item>,
    pub subtitle: String,
}

impl Model {
    /// Create a model with `initial` generated items.
    pub fn new(initial: usize) -> Self {
        let mut model = Self {
            items: generate_items(initial),
            ..Default::default()
        };
        model.recompute();
        model
    }

    fn recompute(&mut self) {
        let needle = self.filter.to_lowercase();
        self.filtered_items = self
            .items
            .iter()
            .filter(|item| needle.is_empty() || item.color.hex_code().contains(&needle))
            .cloned()
            .collect();
        self.subtitle = format!("{} items", self.items.len());
    }

    /// Select one random item.
    pub fn select_random(&mut self) {
        if self.items.is_empty() {
            return;
        }
        // The v4 identity generator doubles as the entropy source.
        let index = (Uuid::new_v4().as_u128() % self.items.len() as u128) as usize;
        self.selection = HashSet::from([self.items[index].id]);
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Replace the selection from the widget's write-back.
    pub fn set_selection(&mut self, selection: HashSet<Uuid>) {
        self.selection = selection;
    }

    /// Delete the given items.
    pub fn delete(&mut self, ids: &HashSet<Uuid>) {
        self.items.retain(|item| !ids.contains(&item.id));
        self.selection.retain(|id| !ids.contains(id));
        self.recompute();
    }

    /// Log the color page URL for each item, standing in for opening it.
    pub fn open(&self, ids: &[Uuid]) {
        for item in self.items.iter().filter(|item| ids.contains(&item.id)) {
            info!(
                "open https://www.colorhexa.com/{}",
                item.color.hex_code()
            );
        }
    }

    /// Merge a generated batch in one step.
    pub fn extend(&mut self, batch: Vec<Item>) {
        self.items.extend(batch);
        self.recompute();
    }

    /// Append a character to the filter.
    pub fn push_filter(&mut self, c: char) {
        self.filter.push(c);
        self.recompute();
    }

    /// Remove the last filter character.
    pub fn pop_filter(&mut self) {
        self.filter.pop();
        self.recompute();
    }

    /// Advance to the next layout mode.
    pub fn cycle_layout(&mut self) {
        self.layout_mode = self.layout_mode.next();
    }

    /// Toggle the painted cell style.
    pub fn toggle_painted(&mut self) {
        self.painted = !self.painted;
    }
}
