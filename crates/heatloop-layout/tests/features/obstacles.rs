use heatloop_layout::{
    build_grid, generate_path, stamp_no_pipe_zones, stamp_obstacles, stamp_passageways, CellRegion,
    CellState, GenerationOptions, GridPoint, Passageway, Room, RoomLayout, Side, Strategy,
};

#[test]
fn test_stamping_leaves_input_grid_untouched() {
    let base = build_grid(&Room::new(1.0, 1.0), 0.1).unwrap();
    let stamped = stamp_obstacles(&base, &[CellRegion::new(2, 2, 3, 3)]);
    assert_eq!(base.routable_count(), 100);
    assert_eq!(stamped.routable_count(), 91);
    assert_eq!(stamped.get(3, 3), Some(CellState::Obstacle));
    assert_eq!(base.get(3, 3), Some(CellState::Empty));
}

#[test]
fn test_regions_are_clipped() {
    let base = build_grid(&Room::new(1.0, 1.0), 0.1).unwrap();
    let grid = stamp_obstacles(&base, &[CellRegion::new(-3, 8, 5, 10)]);
    // Columns 0..2, rows 8..10.
    assert_eq!(grid.blocked_cells().len(), 4);
    let grid = stamp_obstacles(&base, &[CellRegion::new(4, 4, 0, 3)]);
    assert_eq!(grid.routable_count(), 100);
}

#[test]
fn test_passageway_survives_later_stamps() {
    let room = Room::new(2.0, 1.0);
    let base = build_grid(&room, 0.1).unwrap();
    let grid = stamp_obstacles(&base, &[CellRegion::new(0, 0, 20, 1)]);
    let grid = stamp_passageways(&grid, &[Passageway::new(Side::Top, 0.5, 0.2)], &room, 0.1);
    let grid = stamp_no_pipe_zones(&grid, &[CellRegion::new(0, 0, 20, 2)]);

    for col in 5..=7 {
        assert_eq!(grid.get(0, col), Some(CellState::Passageway), "col {}", col);
    }
    assert_eq!(grid.get(0, 4), Some(CellState::NoPipeZone));
    assert_eq!(grid.get(1, 6), Some(CellState::NoPipeZone));
}

#[test]
fn test_passageways_on_each_wall() {
    let room = Room::new(1.0, 0.8);
    let base = build_grid(&room, 0.1).unwrap();
    let passages = [
        Passageway::new(Side::Bottom, 0.0, 0.1),
        Passageway::new(Side::Left, 0.3, 0.0),
        Passageway::new(Side::Right, 0.7, 0.05),
    ];
    let grid = stamp_passageways(&base, &passages, &room, 0.1);
    assert_eq!(grid.get(7, 0), Some(CellState::Passageway));
    assert_eq!(grid.get(7, 1), Some(CellState::Passageway));
    assert_eq!(grid.get(3, 0), Some(CellState::Passageway));
    assert_eq!(grid.get(7, 9), Some(CellState::Passageway));
}

#[test]
fn test_generated_path_avoids_no_pipe_zone() {
    let layout = RoomLayout::new(Room::new(2.0, 2.0))
        .with_no_pipe_zone(CellRegion::new(0, 0, 6, 20))
        .with_obstacle(CellRegion::new(14, 14, 6, 6));
    let grid = layout.build_grid(0.1).unwrap();
    for strategy in Strategy::ALL {
        let report = generate_path(&grid, &GenerationOptions::new(strategy)).unwrap();
        assert!(!report.is_empty());
        for p in &report.path {
            let cell = p.as_grid_point().unwrap();
            assert!(grid.is_routable(cell), "{} routed over {}", strategy, cell);
        }
    }
}

#[test]
fn test_start_on_no_pipe_zone_is_rejected() {
    let layout = RoomLayout::new(Room::new(1.0, 1.0)).with_no_pipe_zone(CellRegion::new(0, 0, 2, 2));
    let grid = layout.build_grid(0.1).unwrap();
    let opts = GenerationOptions::default().with_start(GridPoint::new(1, 1));
    assert!(generate_path(&grid, &opts).is_err());
}
