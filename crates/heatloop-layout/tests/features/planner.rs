use heatloop_layout::{
    plan_layout, CellRegion, GenerationOptions, LayoutPlan, Passageway, Room, RoomLayout, Side,
    Strategy, DEFAULT_CIRCUIT_MAX_M,
};

fn kitchen() -> RoomLayout {
    RoomLayout::new(Room::new(4.0, 3.5))
        .with_obstacle(CellRegion::from_meters(0.0, 0.0, 1.2, 0.6, 0.1))
        .with_passageway(Passageway::new(Side::Bottom, 1.5, 0.9))
        .with_no_pipe_zone(CellRegion::from_meters(3.0, 2.5, 1.0, 1.0, 0.1))
}

#[test]
fn test_kitchen_plan_circuits_respect_limit() {
    let opts = GenerationOptions::new(Strategy::DoubleSpiral).with_loop_spacing(2);
    let plan = plan_layout(&kitchen(), &opts, Some(30.0)).unwrap();

    assert_eq!((plan.cols, plan.rows), (40, 35));
    assert!(plan.zone_count() >= 2);
    for zone in &plan.zones {
        assert!(zone.length_m <= 30.0 + 1e-6);
    }
    let sum: f64 = plan.zones.iter().map(|z| z.length_m).sum();
    assert!((sum - plan.total_length_m()).abs() <= 1e-6 * plan.total_length_m());
}

#[test]
fn test_consecutive_zones_share_cut_point() {
    let opts = GenerationOptions::new(Strategy::Boustrophedon);
    let plan = plan_layout(&kitchen(), &opts, Some(DEFAULT_CIRCUIT_MAX_M)).unwrap();
    assert!(plan.zone_count() > 1);
    for pair in plan.zones.windows(2) {
        assert_eq!(pair[0].end(), pair[1].start());
    }
}

#[test]
fn test_plan_serializes_for_presentation_layer() {
    let plan = plan_layout(&kitchen(), &GenerationOptions::default(), None).unwrap();
    let json = serde_json::to_string(&plan).unwrap();
    let back: LayoutPlan = serde_json::from_str(&json).unwrap();
    assert_eq!(back.zone_count(), plan.zone_count());
    assert_eq!(back.report.path.len(), plan.report.path.len());
    assert!(json.contains("\"total_length_m\""));
}
