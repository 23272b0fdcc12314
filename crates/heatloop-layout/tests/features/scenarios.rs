use heatloop_layout::{
    build_grid, generate_path, split_path, stamp_obstacles, CellRegion, GenerationOptions,
    GridPoint, LayoutError, Point, Room, Strategy,
};
use std::collections::HashSet;

#[test]
fn test_open_room_boustrophedon_from_corner() {
    let grid = build_grid(&Room::new(5.0, 5.0), 0.1).unwrap();
    let opts = GenerationOptions::new(Strategy::Boustrophedon)
        .with_loop_spacing(1)
        .with_start(GridPoint::new(0, 0));
    let report = generate_path(&grid, &opts).unwrap();

    assert_eq!(report.path.len(), 2500);
    assert_eq!(report.path[0], Point::new(0.0, 0.0));
    // 50 rows of 5 m, within one cell per row.
    assert!((report.total_length_m - 250.0).abs() <= 50.0 * 0.1);
    assert!(!report.truncated);
    assert!(report.warnings.is_empty());
    assert_eq!(report.elbow_estimate, 2498);
    // Two turns per row change.
    assert_eq!(report.turn_count(), 98);
}

#[test]
fn test_double_spiral_avoids_central_obstacle() {
    let grid = build_grid(&Room::new(3.0, 3.0), 0.1).unwrap();
    let obstacle = CellRegion::from_meters(1.0, 1.0, 1.0, 1.0, 0.1);
    let grid = stamp_obstacles(&grid, &[obstacle]);
    let report = generate_path(&grid, &GenerationOptions::default()).unwrap();

    assert!(!report.is_empty());
    for p in &report.path {
        let inside = p.x >= 10.0 && p.x < 20.0 && p.y >= 10.0 && p.y < 20.0;
        assert!(!inside, "point {} lies on the obstacle", p);
    }
}

#[test]
fn test_length_cap_interpolates_last_point() {
    // 21 x 8 cells; the full serpentine is 25.05 m.
    let grid = build_grid(&Room::new(3.15, 1.2), 0.15).unwrap();
    assert_eq!((grid.cols(), grid.rows()), (21, 8));
    let full = generate_path(
        &grid,
        &GenerationOptions::new(Strategy::Boustrophedon).with_resolution(0.15),
    )
    .unwrap();
    assert!((full.total_length_m - 25.05).abs() < 1e-9);

    let opts = GenerationOptions::new(Strategy::Boustrophedon)
        .with_resolution(0.15)
        .with_max_length(10.0);
    let report = generate_path(&grid, &opts).unwrap();
    assert!(report.truncated);
    assert!(report.total_length_m <= 10.0 + 1e-9);
    assert!((report.total_length_m - 10.0).abs() < 1e-6);

    // Row 3 runs right to left; the cut lands between (17, 3) and (16, 3).
    let n = report.path.len();
    assert_eq!(report.path[n - 2], Point::new(17.0, 3.0));
    let last = report.path[n - 1];
    assert!((last.x - (17.0 - 2.0 / 3.0)).abs() < 1e-6);
    assert_eq!(last.y, 3.0);
}

#[test]
fn test_straight_path_splits_into_ten_ten_seven() {
    let path = [Point::new(0.0, 0.0), Point::new(27.0, 0.0)];
    let zones = split_path(&path, 10.0, 1.0).unwrap();
    let lengths: Vec<f64> = zones.iter().map(|z| z.length_m).collect();
    assert_eq!(lengths.len(), 3);
    for (got, want) in lengths.iter().zip([10.0, 10.0, 7.0]) {
        assert!((got - want).abs() < 1e-9);
    }
}

#[test]
fn test_start_outside_grid_is_rejected() {
    let grid = build_grid(&Room::new(2.0, 1.0), 0.1).unwrap();
    let opts = GenerationOptions::default().with_start(GridPoint::new(20, 3));
    assert_eq!(
        generate_path(&grid, &opts),
        Err(LayoutError::OutOfBounds {
            point: GridPoint::new(20, 3),
            cols: 20,
            rows: 10,
        })
    );
}

#[test]
fn test_spiral_paths_have_unique_cells() {
    let grid = build_grid(&Room::new(2.3, 1.7), 0.1).unwrap();
    for strategy in [Strategy::SingleSpiral, Strategy::DoubleSpiral] {
        for spacing in 1..=3 {
            let opts = GenerationOptions::new(strategy).with_loop_spacing(spacing);
            let report = generate_path(&grid, &opts).unwrap();
            let cells: HashSet<_> = report
                .path
                .iter()
                .map(|p| (p.x as i64, p.y as i64))
                .collect();
            assert_eq!(cells.len(), report.path.len(), "{} spacing {}", strategy, spacing);
        }
    }
}

#[test]
fn test_wider_spacing_uses_less_pipe() {
    let grid = build_grid(&Room::new(3.0, 3.0), 0.1).unwrap();
    let tight = generate_path(&grid, &GenerationOptions::new(Strategy::SingleSpiral)).unwrap();
    let loose = generate_path(
        &grid,
        &GenerationOptions::new(Strategy::SingleSpiral).with_loop_spacing(3),
    )
    .unwrap();
    assert!(loose.total_length_m < tight.total_length_m);
}

#[test]
fn test_same_input_same_output() {
    let grid = build_grid(&Room::new(4.0, 3.0), 0.1).unwrap();
    let grid = stamp_obstacles(&grid, &[CellRegion::new(12, 8, 7, 5)]);
    for strategy in Strategy::ALL {
        let opts = GenerationOptions::new(strategy)
            .with_start(GridPoint::new(0, 0))
            .with_end(GridPoint::new(0, 29))
            .with_max_length(80.0);
        let a = generate_path(&grid, &opts).unwrap();
        let b = generate_path(&grid, &opts).unwrap();
        assert_eq!(a, b);
    }
}
