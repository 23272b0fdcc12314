use heatloop_layout::{
    build_grid, generate_path, stamp_obstacles, CellRegion, GenerationOptions, GridPoint,
    LayoutWarning, Point, Room, Strategy,
};

#[test]
fn test_end_point_joined_with_adjacent_steps() {
    let grid = build_grid(&Room::new(1.2, 1.2), 0.1).unwrap();
    // Spacing 2 leaves every other ring free; (3, 6) is on the ring just
    // outside the innermost supply lap.
    let end = GridPoint::new(3, 6);
    let opts = GenerationOptions::new(Strategy::DoubleSpiral)
        .with_loop_spacing(2)
        .with_start(GridPoint::new(0, 0))
        .with_end(end);
    let report = generate_path(&grid, &opts).unwrap();

    assert_eq!(report.path.first(), Some(&Point::new(0.0, 0.0)));
    assert_eq!(report.path.last().and_then(Point::as_grid_point), Some(end));
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);
}

#[test]
fn test_boxed_in_end_point_keeps_open_path() {
    let grid = build_grid(&Room::new(1.0, 1.0), 0.1).unwrap();
    // Ring of obstacles around (5, 5).
    let grid = stamp_obstacles(
        &grid,
        &[
            CellRegion::new(4, 4, 3, 1),
            CellRegion::new(4, 6, 3, 1),
            CellRegion::new(4, 5, 1, 1),
            CellRegion::new(6, 5, 1, 1),
        ],
    );
    let opts = GenerationOptions::new(Strategy::Boustrophedon).with_end(GridPoint::new(5, 5));
    let report = generate_path(&grid, &opts).unwrap();

    match report.warnings.as_slice() {
        [LayoutWarning::ReconnectionFailed { target, .. }] => {
            assert_eq!(*target, GridPoint::new(5, 5))
        }
        other => panic!("unexpected warnings {:?}", other),
    }
    assert!(report.path.iter().all(|p| *p != Point::new(5.0, 5.0)));
    assert_eq!(report.path.len(), 100 - 8 - 1);
}

#[test]
fn test_closed_loop_without_start_returns_to_first_cell() {
    let grid = build_grid(&Room::new(0.6, 0.2), 0.1).unwrap();
    let opts = GenerationOptions::new(Strategy::Boustrophedon).with_close_loop(true);
    let report = generate_path(&grid, &opts).unwrap();
    // The second row ends right under the first cell.
    assert_eq!(report.path.first(), report.path.last());
    assert!(report.warnings.is_empty());
}
