use weft::geometry::Size;
use weft::layout::grid::solve_columns;
use weft::layout::solver::{SolveError, Solver};
use weft::layout::{Column, LayoutSpec};

const EPS: f64 = 1e-6;

#[test]
fn test_fixed_plus_flexible_resolves_remainder() {
    let columns = [Column::fixed(100.0), Column::flexible(50.0, 250.0)];
    let solution = solve_columns(&columns, 300.0, 10.0);
    assert!(solution.feasible);
    assert!((solution.columns[0].width - 100.0).abs() < EPS);
    assert!((solution.columns[1].width - 190.0).abs() < EPS);
    assert!((100.0 + 10.0 + solution.columns[1].width - 300.0).abs() < EPS);
}

#[test]
fn test_surplus_clamps_to_maximum_and_reports_infeasible() {
    let columns = [Column::fixed(100.0), Column::flexible(50.0, 150.0)];
    let solution = solve_columns(&columns, 300.0, 10.0);
    assert!(!solution.feasible);
    assert!((solution.columns[0].width - 100.0).abs() < EPS);
    assert!((solution.columns[1].width - 150.0).abs() < EPS);
}

#[test]
fn test_deficit_clamps_to_minimum_and_reports_infeasible() {
    let columns = [Column::fixed(280.0), Column::flexible(100.0, 200.0)];
    let solution = solve_columns(&columns, 300.0, 10.0);
    assert!(!solution.feasible);
    assert!((solution.columns[0].width - 280.0).abs() < EPS);
    assert!((solution.columns[1].width - 100.0).abs() < EPS);
}

#[test]
fn test_inverted_bounds_is_infeasible() {
    let columns = [Column::flexible(200.0, 100.0)];
    let solution = solve_columns(&columns, 300.0, 0.0);
    assert!(!solution.feasible);
    assert!((solution.columns[0].width - 200.0).abs() < EPS);
}

#[test]
fn test_equal_distribution_across_unbounded_columns() {
    let columns = [
        Column::flexible(0.0, f64::INFINITY),
        Column::flexible(0.0, f64::INFINITY),
        Column::flexible(0.0, f64::INFINITY),
    ];
    let solution = solve_columns(&columns, 320.0, 10.0);
    assert!(solution.feasible);
    for column in &solution.columns {
        assert!((column.width - 100.0).abs() < EPS);
    }
}

#[test]
fn test_saturated_column_does_not_starve_later_ones() {
    // The narrow column saturates at its max; the remainder flows to the
    // other, not preferentially to the earlier one.
    let columns = [
        Column::flexible(0.0, 50.0),
        Column::flexible(0.0, f64::INFINITY),
    ];
    let solution = solve_columns(&columns, 310.0, 10.0);
    assert!(solution.feasible);
    assert!((solution.columns[0].width - 50.0).abs() < EPS);
    assert!((solution.columns[1].width - 250.0).abs() < EPS);
}

#[test]
fn test_zero_columns_solves_to_empty() {
    let solution = solve_columns(&[], 300.0, 10.0);
    assert!(solution.feasible);
    assert!(solution.columns.is_empty());
    assert!(solution.slot_widths.is_empty());
}

#[test]
fn test_non_positive_width_clamps_to_minimums() {
    let columns = [Column::fixed(100.0), Column::adaptive(80.0, 120.0)];
    let solution = solve_columns(&columns, 0.0, 10.0);
    assert!(!solution.feasible);
    assert!((solution.columns[0].width - 100.0).abs() < EPS);
    assert!((solution.columns[1].width - 80.0).abs() < EPS);
}

#[test]
fn test_adaptive_subdivision() {
    let columns = [Column::adaptive(100.0, 400.0)];
    let solution = solve_columns(&columns, 320.0, 10.0);
    assert!(solution.feasible);
    let adaptive = &solution.columns[0];
    assert!((adaptive.width - 320.0).abs() < EPS);
    assert_eq!(adaptive.slot_count, 3);
    assert!((adaptive.slot_width - 100.0).abs() < EPS);
    assert_eq!(solution.slot_widths.len(), 3);
}

#[test]
fn test_adaptive_degrades_to_single_slot() {
    let columns = [Column::adaptive(500.0, 600.0)];
    let solution = solve_columns(&columns, 320.0, 10.0);
    assert!(!solution.feasible);
    assert_eq!(solution.columns[0].slot_count, 1);
    assert!((solution.columns[0].slot_width - 500.0).abs() < EPS);
}

#[test]
fn test_adaptive_slots_fill_column() {
    // Three slots plus two gaps span the column exactly.
    let columns = [Column::adaptive(100.0, 400.0)];
    let solution = solve_columns(&columns, 350.0, 10.0);
    let adaptive = &solution.columns[0];
    assert_eq!(adaptive.slot_count, 3);
    let spanned = adaptive.slot_width * 3.0 + 10.0 * 2.0;
    assert!((spanned - 350.0).abs() < EPS);
}

#[test]
fn test_mixed_fixed_flexible_adaptive() {
    let columns = [
        Column::fixed(60.0),
        Column::flexible(40.0, 80.0),
        Column::adaptive(50.0, 300.0),
    ];
    // total for variables: 400 - 2 * 10 = 380; fixed takes 60,
    // flexible saturates at 80, adaptive absorbs the remaining 240.
    let solution = solve_columns(&columns, 400.0, 10.0);
    assert!(solution.feasible);
    assert!((solution.columns[0].width - 60.0).abs() < EPS);
    assert!((solution.columns[1].width - 80.0).abs() < EPS);
    assert!((solution.columns[2].width - 240.0).abs() < EPS);
    // Adaptive: floor((240 + 10) / (50 + 10)) = 4 slots.
    assert_eq!(solution.columns[2].slot_count, 4);
    assert_eq!(solution.slot_widths.len(), 6);
}

#[test]
fn test_solver_overconstrained_pin() {
    let mut solver = Solver::new();
    let var = solver.add_variable("column0");
    solver.require_equal(var, 100.0);
    solver.require_equal(var, 200.0);
    solver.require_total(300.0);
    assert!(matches!(
        solver.solve(),
        Err(SolveError::Overconstrained { .. })
    ));
}

#[test]
fn test_solver_reports_deficit() {
    let mut solver = Solver::new();
    let a = solver.add_variable("column0");
    solver.require_at_least(a, 100.0);
    solver.require_total(40.0);
    match solver.solve() {
        Err(SolveError::BelowMinimum { deficit }) => assert!((deficit - 60.0).abs() < EPS),
        other => panic!("expected BelowMinimum, got {other:?}"),
    }
}

#[test]
fn test_solver_requires_total() {
    let mut solver = Solver::new();
    solver.add_variable("column0");
    assert!(matches!(solver.solve(), Err(SolveError::MissingTotal)));
}

#[test]
fn test_structural_hash_detects_parameter_changes() {
    let a = LayoutSpec::columns(5, 16.0);
    let b = LayoutSpec::columns(5, 16.0);
    let c = LayoutSpec::columns(4, 16.0);
    assert_eq!(a.structural_hash(), b.structural_hash());
    assert_ne!(a.structural_hash(), c.structural_hash());

    let g1 = LayoutSpec::grid(vec![Column::adaptive(100.0, 200.0)], None);
    let g2 = LayoutSpec::grid(vec![Column::adaptive(100.0, 200.0)], Some(8.0));
    assert_ne!(g1.structural_hash(), g2.structural_hash());
    assert_ne!(a.structural_hash(), LayoutSpec::Table.structural_hash());
}

#[test]
fn test_fixed_size_layout_fits_whole_items() {
    let spec = LayoutSpec::fixed_size(Size::new(200.0, 200.0), 16.0);
    let geometry = spec.resolve(Size::new(650.0, 400.0));
    // floor((650 + 16) / (200 + 16)) = 3 items per row.
    assert_eq!(geometry.slots_per_row(), 3);
    assert_eq!(geometry.slot_height, Some(200.0));
}

#[test]
fn test_grid_layout_applies_default_insets_and_spacing() {
    let spec = LayoutSpec::grid(vec![Column::flexible(0.0, f64::INFINITY)], None);
    let geometry = spec.resolve(Size::new(432.0, 400.0));
    // 432 - 2 * 16 insets = 400 content width for the single column.
    assert!((geometry.content_size.width - 400.0).abs() < EPS);
    assert!((geometry.slot_widths[0] - 400.0).abs() < EPS);
    assert!((geometry.item_spacing - 8.0).abs() < EPS);
}

#[test]
fn test_table_layout_resolves_empty() {
    let spec = LayoutSpec::Table;
    assert!(spec.is_table());
    let geometry = spec.resolve(Size::new(400.0, 300.0));
    assert_eq!(geometry.slots_per_row(), 0);
}
