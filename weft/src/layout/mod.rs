//! Declarative layout specifications and resolved geometry.
//!
//! A [`LayoutSpec`] is a pure description: resolving it against a container
//! size yields a [`Geometry`] with concrete slot widths. Specs are compared
//! by structural hash so the widget only swaps its active layout when the
//! description actually changed, keeping scroll and animation state intact
//! across renders.

pub mod grid;
pub mod solver;

use std::hash::{DefaultHasher, Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::geometry::{Insets, Point, Rect, Size};

/// Default spacing between columns and rows in a grid layout.
pub const DEFAULT_GRID_SPACING: f64 = 8.0;

/// Default content insets of a grid layout.
pub const DEFAULT_GRID_INSET: f64 = 16.0;

/// Row height assumed until the renderer reports a measured one.
pub const ESTIMATED_ROW_HEIGHT: f64 = 10.0;

/// Width specification for one grid column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Column {
    /// A single item with the specified fixed width.
    Fixed(f64),
    /// A single item solved within bounds.
    Flexible { min: f64, max: f64 },
    /// Solved within bounds like flexible, then subdivided into as many
    /// minimum-width slots as fit.
    Adaptive { min: f64, max: f64 },
}

impl Column {
    /// A fixed-width column.
    pub const fn fixed(width: f64) -> Self {
        Self::Fixed(width)
    }

    /// A flexible column bounded by `min` and `max`.
    pub const fn flexible(min: f64, max: f64) -> Self {
        Self::Flexible { min, max }
    }

    /// An adaptive column bounded by `min` and `max`.
    pub const fn adaptive(min: f64, max: f64) -> Self {
        Self::Adaptive { min, max }
    }
}

impl Hash for Column {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Column::Fixed(width) => {
                0u8.hash(state);
                width.to_bits().hash(state);
            }
            Column::Flexible { min, max } => {
                1u8.hash(state);
                min.to_bits().hash(state);
                max.to_bits().hash(state);
            }
            Column::Adaptive { min, max } => {
                2u8.hash(state);
                min.to_bits().hash(state);
                max.to_bits().hash(state);
            }
        }
    }
}

/// A closed set of layout strategies for the grid widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LayoutSpec {
    /// Every slot the same size; as many per row as fit.
    FixedSize { size: Size, spacing: f64 },
    /// `count` equal fully-flexible columns.
    Columns { count: usize, spacing: f64 },
    /// Columns solved by the constraint engine.
    Grid {
        columns: Vec<Column>,
        spacing: Option<f64>,
    },
    /// Sentinel: delegate to a row-based table widget. The grid engine and
    /// widget are bypassed entirely.
    Table,
}

impl LayoutSpec {
    /// A fixed-item-size layout.
    pub const fn fixed_size(size: Size, spacing: f64) -> Self {
        Self::FixedSize { size, spacing }
    }

    /// An equal-columns layout.
    pub const fn columns(count: usize, spacing: f64) -> Self {
        Self::Columns { count, spacing }
    }

    /// A constraint-solved grid layout.
    pub const fn grid(columns: Vec<Column>, spacing: Option<f64>) -> Self {
        Self::Grid { columns, spacing }
    }

    /// Whether this spec is the table-fallback sentinel.
    pub fn is_table(&self) -> bool {
        matches!(self, Self::Table)
    }

    /// Hash of the spec's structure and parameters.
    ///
    /// Two specs with the same hash resolve identically for every container
    /// size, so an unchanged hash means the active layout can be kept.
    pub fn structural_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        match self {
            LayoutSpec::FixedSize { size, spacing } => {
                0u8.hash(&mut hasher);
                size.width.to_bits().hash(&mut hasher);
                size.height.to_bits().hash(&mut hasher);
                spacing.to_bits().hash(&mut hasher);
            }
            LayoutSpec::Columns { count, spacing } => {
                1u8.hash(&mut hasher);
                count.hash(&mut hasher);
                spacing.to_bits().hash(&mut hasher);
            }
            LayoutSpec::Grid { columns, spacing } => {
                2u8.hash(&mut hasher);
                columns.hash(&mut hasher);
                spacing.map(f64::to_bits).hash(&mut hasher);
            }
            LayoutSpec::Table => {
                3u8.hash(&mut hasher);
            }
        }
        hasher.finish()
    }

    /// Resolve the spec against a container size.
    ///
    /// Pure function of the container and the spec's own parameters. Always
    /// produces geometry; constraint infeasibility degrades per the engine's
    /// clamp-to-minimum policy.
    pub fn resolve(&self, container: Size) -> Geometry {
        match self {
            LayoutSpec::FixedSize { size, spacing } => {
                let count = if size.width + spacing > 0.0 {
                    ((container.width + spacing) / (size.width + spacing))
                        .floor()
                        .max(1.0) as usize
                } else {
                    1
                };
                Geometry {
                    container,
                    content_size: container,
                    insets: Insets::ZERO,
                    item_spacing: *spacing,
                    row_spacing: *spacing,
                    slot_widths: vec![size.width; count],
                    slot_height: Some(size.height),
                    feasible: true,
                }
            }
            LayoutSpec::Columns { count, spacing } => {
                let columns = vec![Column::flexible(0.0, f64::INFINITY); (*count).max(1)];
                Self::resolve_grid(&columns, *spacing, Insets::ZERO, container)
            }
            LayoutSpec::Grid { columns, spacing } => Self::resolve_grid(
                columns,
                spacing.unwrap_or(DEFAULT_GRID_SPACING),
                Insets::uniform(DEFAULT_GRID_INSET),
                container,
            ),
            LayoutSpec::Table => Geometry::empty(container),
        }
    }

    fn resolve_grid(columns: &[Column], spacing: f64, insets: Insets, container: Size) -> Geometry {
        let content_size = container.inset_by(insets);
        let solution = grid::solve_columns(columns, content_size.width, spacing);
        Geometry {
            container,
            content_size,
            insets,
            item_spacing: spacing,
            row_spacing: spacing,
            slot_widths: solution.slot_widths,
            slot_height: None,
            feasible: solution.feasible,
        }
    }
}

/// Concrete geometry resolved from a [`LayoutSpec`] and a container size.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    /// The container the spec was resolved against.
    pub container: Size,
    /// Container size minus insets.
    pub content_size: Size,
    /// Content insets.
    pub insets: Insets,
    /// Spacing between adjacent slots in a row.
    pub item_spacing: f64,
    /// Spacing between adjacent rows.
    pub row_spacing: f64,
    /// Flat ordered slot widths for one row.
    pub slot_widths: Vec<f64>,
    /// Fixed slot height, when the spec dictates one. `None` means rows size
    /// to their content and the renderer reports the measured height.
    pub slot_height: Option<f64>,
    /// False when the solver fell back to minimum-clamped widths.
    pub feasible: bool,
}

impl Geometry {
    /// Geometry with no slots (table fallback, unresolved widget).
    pub fn empty(container: Size) -> Self {
        Self {
            container,
            content_size: container,
            insets: Insets::ZERO,
            item_spacing: 0.0,
            row_spacing: 0.0,
            slot_widths: Vec::new(),
            slot_height: None,
            feasible: true,
        }
    }

    /// Number of item slots per row.
    pub fn slots_per_row(&self) -> usize {
        self.slot_widths.len()
    }

    /// The effective row height given the renderer-measured height.
    pub fn row_height(&self, measured: Option<f64>) -> f64 {
        self.slot_height
            .or(measured)
            .unwrap_or(ESTIMATED_ROW_HEIGHT)
    }

    /// Number of rows needed for `item_count` items.
    pub fn row_count(&self, item_count: usize) -> usize {
        let per_row = self.slots_per_row();
        if per_row == 0 {
            return 0;
        }
        item_count.div_ceil(per_row)
    }

    /// Total content height for `item_count` items.
    pub fn content_height(&self, item_count: usize, row_height: f64) -> f64 {
        let rows = self.row_count(item_count);
        if rows == 0 {
            return self.insets.vertical();
        }
        self.insets.vertical() + rows as f64 * row_height + (rows - 1) as f64 * self.row_spacing
    }

    /// The rect of the slot at `position`, in content coordinates (scroll
    /// offset not applied).
    pub fn rect_for(&self, position: usize, row_height: f64) -> Option<Rect> {
        let per_row = self.slots_per_row();
        if per_row == 0 {
            return None;
        }
        let row = position / per_row;
        let col = position % per_row;
        let x = self.insets.leading
            + self.slot_widths[..col].iter().sum::<f64>()
            + self.item_spacing * col as f64;
        let y = self.insets.top + row as f64 * (row_height + self.row_spacing);
        Some(Rect::new(
            Point::new(x, y),
            Size::new(self.slot_widths[col], row_height),
        ))
    }

    /// Hit-test a point in content coordinates to a slot position.
    ///
    /// Points in spacing gaps or insets miss.
    pub fn slot_at(&self, point: Point, row_height: f64, item_count: usize) -> Option<usize> {
        let per_row = self.slots_per_row();
        if per_row == 0 || row_height <= 0.0 {
            return None;
        }

        let y = point.y - self.insets.top;
        if y < 0.0 {
            return None;
        }
        let row_pitch = row_height + self.row_spacing;
        let row = (y / row_pitch).floor() as usize;
        if y - row as f64 * row_pitch >= row_height {
            return None;
        }

        let mut x = point.x - self.insets.leading;
        if x < 0.0 {
            return None;
        }
        let mut col = None;
        for (i, width) in self.slot_widths.iter().enumerate() {
            if x < *width {
                col = Some(i);
                break;
            }
            x -= width + self.item_spacing;
            if x < 0.0 {
                return None;
            }
        }

        let position = row * per_row + col?;
        (position < item_count).then_some(position)
    }
}
