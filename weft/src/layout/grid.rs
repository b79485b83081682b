//! Column solving and adaptive subdivision.
//!
//! Turns a declarative column list into concrete widths via the constraint
//! solver, then subdivides adaptive columns into repeated item slots. The
//! engine always produces geometry; infeasible systems degrade to every
//! bounded column clamped at its minimum.

use log::warn;

use super::solver::{SolveError, Solver};
use super::Column;

/// One column after solving.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedColumn {
    /// Solved column width.
    pub width: f64,
    /// Number of item slots the column subdivides into (1 unless adaptive).
    pub slot_count: usize,
    /// Width of each slot.
    pub slot_width: f64,
}

/// Result of solving a column list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnSolution {
    /// Per-column widths and subdivisions, in declaration order.
    pub columns: Vec<ResolvedColumn>,
    /// Flat ordered list of item slot widths across all columns.
    pub slot_widths: Vec<f64>,
    /// False when the constraint system had no exact solution and the
    /// minimum-clamp fallback was applied.
    pub feasible: bool,
}

impl ColumnSolution {
    fn from_widths(columns: &[Column], widths: Vec<f64>, spacing: f64, feasible: bool) -> Self {
        let resolved: Vec<ResolvedColumn> = columns
            .iter()
            .zip(widths)
            .map(|(column, width)| subdivide(column, width, spacing))
            .collect();
        let slot_widths = resolved
            .iter()
            .flat_map(|c| std::iter::repeat_n(c.slot_width, c.slot_count))
            .collect();
        Self {
            columns: resolved,
            slot_widths,
            feasible,
        }
    }
}

/// Solve a column list against the available content width.
///
/// `content_width` is the container width with insets already removed;
/// `spacing` separates adjacent columns and adjacent slots within an
/// adaptive column.
pub fn solve_columns(columns: &[Column], content_width: f64, spacing: f64) -> ColumnSolution {
    if columns.is_empty() {
        return ColumnSolution {
            feasible: true,
            ..Default::default()
        };
    }

    if content_width <= 0.0 {
        warn!("column layout requested for non-positive width {content_width}; clamping to minimums");
        return clamped(columns, spacing, Bound::Min);
    }

    let mut solver = Solver::new();
    let variables: Vec<_> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let var = solver.add_variable(format!("column{i}"));
            match *column {
                Column::Fixed(width) => solver.require_equal(var, width),
                Column::Flexible { min, max } | Column::Adaptive { min, max } => {
                    solver.require_at_least(var, min);
                    if max.is_finite() {
                        solver.require_at_most(var, max);
                    }
                }
            }
            var
        })
        .collect();

    let total = content_width - spacing * (columns.len() - 1) as f64;
    solver.require_total(total);

    match solver.solve() {
        Ok(assignment) => {
            let widths = variables.iter().map(|v| assignment.value(*v)).collect();
            ColumnSolution::from_widths(columns, widths, spacing, true)
        }
        // Too much space: every bounded column saturates at its maximum.
        Err(reason @ SolveError::AboveMaximum { .. }) => {
            warn!("column constraints infeasible ({reason}); clamping to maximums");
            clamped(columns, spacing, Bound::Max)
        }
        // Too little space, or the system itself is invalid: collapse every
        // bounded column to its minimum.
        Err(reason) => {
            warn!("column constraints infeasible ({reason}); clamping to minimums");
            clamped(columns, spacing, Bound::Min)
        }
    }
}

#[derive(Clone, Copy)]
enum Bound {
    Min,
    Max,
}

/// The fallback assignment: fixed columns keep their width, bounded columns
/// saturate at the given bound.
fn clamped(columns: &[Column], spacing: f64, bound: Bound) -> ColumnSolution {
    let widths = columns
        .iter()
        .map(|column| match (*column, bound) {
            (Column::Fixed(width), _) => width,
            (Column::Flexible { min, .. } | Column::Adaptive { min, .. }, Bound::Min) => min,
            (Column::Flexible { min, max } | Column::Adaptive { min, max }, Bound::Max) => {
                if max.is_finite() {
                    max
                } else {
                    min
                }
            }
        })
        .collect();
    ColumnSolution::from_widths(columns, widths, spacing, false)
}

/// Subdivide a solved column into item slots.
///
/// Adaptive columns fit as many minimum-width slots as possible, then let
/// them grow equally to fill the column. A column narrower than the minimum
/// degrades to a single undersized slot.
fn subdivide(column: &Column, width: f64, spacing: f64) -> ResolvedColumn {
    match *column {
        Column::Fixed(_) | Column::Flexible { .. } => ResolvedColumn {
            width,
            slot_count: 1,
            slot_width: width,
        },
        Column::Adaptive { min, .. } => {
            let padded = width + spacing;
            let count = if min + spacing > 0.0 {
                (padded / (min + spacing)).floor().max(1.0)
            } else {
                1.0
            };
            ResolvedColumn {
                width,
                slot_count: count as usize,
                slot_width: padded / count - spacing,
            }
        }
    }
}
