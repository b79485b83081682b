//! Linear-arithmetic constraint solver for column widths.
//!
//! One variable per column, with an equality pin or lower/upper bounds, plus a
//! single totalizing sum constraint. Pinned variables are honored first; the
//! remaining slack is distributed across bounded variables by repeated equal
//! division with clamping. Equal division means earlier variables are never
//! preferentially widened beyond their own bounds.

use thiserror::Error;

/// Comparison tolerance for solved widths.
pub const EPSILON: f64 = 1e-6;

/// Why a constraint system could not be satisfied exactly.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// A variable's lower bound exceeds its upper bound.
    #[error("{name}: inverted bounds (min {min} > max {max})")]
    InvertedBounds { name: String, min: f64, max: f64 },
    /// A variable was pinned to two different values.
    #[error("{name}: pinned to both {first} and {second}")]
    Overconstrained {
        name: String,
        first: f64,
        second: f64,
    },
    /// The sum of lower bounds exceeds the available total.
    #[error("bounds exceed available width by {deficit}")]
    BelowMinimum { deficit: f64 },
    /// The available total exceeds the sum of upper bounds.
    #[error("available width exceeds bounds by {surplus}")]
    AboveMaximum { surplus: f64 },
    /// `solve` was called without a totalizing constraint.
    #[error("no total constraint set")]
    MissingTotal,
}

/// Handle for one scalar variable in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variable(usize);

#[derive(Debug, Clone)]
struct VarState {
    name: String,
    pinned: Option<f64>,
    conflicting_pin: Option<f64>,
    min: f64,
    max: f64,
}

/// A satisfying assignment, one value per variable in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assignment {
    values: Vec<f64>,
}

impl Assignment {
    /// The solved value of a variable.
    pub fn value(&self, var: Variable) -> f64 {
        self.values[var.0]
    }

    /// All solved values in variable declaration order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Accumulates constraints and solves them in one shot.
#[derive(Debug, Default)]
pub struct Solver {
    variables: Vec<VarState>,
    total: Option<f64>,
}

impl Solver {
    /// Create an empty system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable with a diagnostic name.
    pub fn add_variable(&mut self, name: impl Into<String>) -> Variable {
        self.variables.push(VarState {
            name: name.into(),
            pinned: None,
            conflicting_pin: None,
            min: 0.0,
            max: f64::INFINITY,
        });
        Variable(self.variables.len() - 1)
    }

    /// Constrain `var == value`.
    pub fn require_equal(&mut self, var: Variable, value: f64) {
        let state = &mut self.variables[var.0];
        match state.pinned {
            None => state.pinned = Some(value),
            Some(first) if (first - value).abs() > EPSILON => {
                state.conflicting_pin = Some(value);
            }
            Some(_) => {}
        }
    }

    /// Constrain `var >= min`.
    pub fn require_at_least(&mut self, var: Variable, min: f64) {
        let state = &mut self.variables[var.0];
        state.min = state.min.max(min);
    }

    /// Constrain `var <= max`.
    pub fn require_at_most(&mut self, var: Variable, max: f64) {
        let state = &mut self.variables[var.0];
        state.max = state.max.min(max);
    }

    /// Constrain the sum of all variables to equal `sum`.
    pub fn require_total(&mut self, sum: f64) {
        self.total = Some(sum);
    }

    /// Solve the system.
    ///
    /// Returns an assignment satisfying every constraint, or the first
    /// infeasibility encountered. The caller decides the fallback policy.
    pub fn solve(&self) -> Result<Assignment, SolveError> {
        let total = self.total.ok_or(SolveError::MissingTotal)?;

        for state in &self.variables {
            if let (Some(first), Some(second)) = (state.pinned, state.conflicting_pin) {
                return Err(SolveError::Overconstrained {
                    name: state.name.clone(),
                    first,
                    second,
                });
            }
            if state.min > state.max + EPSILON {
                return Err(SolveError::InvertedBounds {
                    name: state.name.clone(),
                    min: state.min,
                    max: state.max,
                });
            }
        }

        let min_sum: f64 = self
            .variables
            .iter()
            .map(|s| s.pinned.unwrap_or(s.min))
            .sum();
        if total < min_sum - EPSILON {
            return Err(SolveError::BelowMinimum {
                deficit: min_sum - total,
            });
        }

        let max_sum: f64 = self
            .variables
            .iter()
            .map(|s| s.pinned.unwrap_or(s.max))
            .sum();
        if total > max_sum + EPSILON {
            return Err(SolveError::AboveMaximum {
                surplus: total - max_sum,
            });
        }

        let mut values: Vec<Option<f64>> = self.variables.iter().map(|s| s.pinned).collect();
        let mut slack = total
            - values
                .iter()
                .filter_map(|v| *v)
                .sum::<f64>();

        // Waterfill: give every unresolved variable an equal share, clamp the
        // ones whose bounds reject it, repeat with the rest. Each round
        // resolves at least one variable, so this terminates.
        loop {
            let free: Vec<usize> = (0..values.len()).filter(|i| values[*i].is_none()).collect();
            if free.is_empty() {
                break;
            }
            let share = slack / free.len() as f64;

            let below: Vec<usize> = free
                .iter()
                .copied()
                .filter(|i| share < self.variables[*i].min - EPSILON)
                .collect();
            if !below.is_empty() {
                for i in below {
                    values[i] = Some(self.variables[i].min);
                    slack -= self.variables[i].min;
                }
                continue;
            }

            let above: Vec<usize> = free
                .iter()
                .copied()
                .filter(|i| share > self.variables[*i].max + EPSILON)
                .collect();
            if !above.is_empty() {
                for i in above {
                    values[i] = Some(self.variables[i].max);
                    slack -= self.variables[i].max;
                }
                continue;
            }

            for i in free {
                values[i] = Some(share);
            }
            break;
        }

        Ok(Assignment {
            values: values.into_iter().map(|v| v.unwrap_or(0.0)).collect(),
        })
    }
}
