use heatloop_layout::{
    calculate_length, generate_path, split_path, stamp_obstacles, CellRegion, GenerationOptions,
    Grid, Point, Strategy,
};
use proptest::prelude::*;
use std::collections::HashSet;

fn strategy_from(index: usize) -> Strategy {
    Strategy::ALL[index % Strategy::ALL.len()]
}

fn edge_sum(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_paths_avoid_obstacles_and_never_repeat(
        cols in 2usize..24,
        rows in 2usize..24,
        ox in 0i32..24,
        oy in 0i32..24,
        ow in 0i32..8,
        oh in 0i32..8,
        spacing in 1u32..4,
        which in 0usize..3,
    ) {
        let grid = stamp_obstacles(&Grid::new(rows, cols), &[CellRegion::new(ox, oy, ow, oh)]);
        let opts = GenerationOptions::new(strategy_from(which)).with_loop_spacing(spacing);
        let report = generate_path(&grid, &opts).unwrap();

        let mut seen = HashSet::new();
        for p in &report.path {
            let cell = p.as_grid_point().unwrap();
            prop_assert!(grid.is_routable(cell));
            prop_assert!(seen.insert(cell));
        }
    }

    #[test]
    fn reported_length_is_edge_sum(
        cols in 2usize..20,
        rows in 2usize..20,
        cap in proptest::option::of(0.1f64..5.0),
        which in 0usize..3,
    ) {
        let grid = Grid::new(rows, cols);
        let mut opts = GenerationOptions::new(strategy_from(which));
        opts.max_pipe_length_m = cap;
        let report = generate_path(&grid, &opts).unwrap();

        let expected = edge_sum(&report.path) * opts.grid_resolution_m;
        prop_assert!((report.total_length_m - expected).abs() < 1e-9);
        prop_assert!((calculate_length(&report.path, 0.1) - expected).abs() < 1e-9);
        if let Some(cap) = cap {
            prop_assert!(report.total_length_m <= cap + 1e-9);
        }
    }

    #[test]
    fn split_segments_respect_limit_and_total(
        coords in proptest::collection::vec((0.0f64..50.0, 0.0f64..50.0), 2..40),
        limit in 0.5f64..30.0,
    ) {
        let points: Vec<Point> = coords.iter().map(|&(x, y)| Point::new(x, y)).collect();
        let total = edge_sum(&points);
        let segments = split_path(&points, limit, 1.0).unwrap();

        let sum: f64 = segments.iter().map(|s| s.length_m).sum();
        prop_assert!((sum - total).abs() <= 1e-6 * total.max(1.0));
        for s in &segments {
            prop_assert!(s.length_m <= limit + 1e-6);
        }
        if let Some((last, full)) = segments.split_last() {
            for s in full {
                prop_assert!((s.length_m - limit).abs() < 1e-6);
            }
            let (end, goal) = (last.end().unwrap(), points[points.len() - 1]);
            prop_assert!(end.distance_to(&goal) < 1e-6);
        }
    }
}
