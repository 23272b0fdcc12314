use heatloop_layout::{route_feeders, PlacedRoom, Point};

fn house() -> Vec<PlacedRoom> {
    vec![
        PlacedRoom::new(2.0, 1.0, 4.0, 3.0),
        PlacedRoom::new(-8.0, 5.0, 6.0, 4.0),
        PlacedRoom::new(30.0, -20.0, 10.0, 10.0),
    ]
}

#[test]
fn test_every_room_is_reached() {
    let source = Point::new(0.0, 0.0);
    let rooms = house();
    let plan = route_feeders(source, &rooms, 100.0).unwrap();
    for (index, room) in rooms.iter().enumerate() {
        let last = plan.runs_for(index).last().unwrap();
        assert_eq!(last.end, room.centre());
        let first = plan.runs_for(index).next().unwrap();
        assert_eq!(first.start, source);
    }
    assert_eq!(plan.elbows.len(), 3);
}

#[test]
fn test_short_max_run_adds_couplings() {
    let source = Point::new(0.0, 0.0);
    let rooms = house();
    let loose = route_feeders(source, &rooms, 100.0).unwrap();
    let tight = route_feeders(source, &rooms, 5.0).unwrap();

    assert!(tight.runs.len() > loose.runs.len());
    assert!(tight.elbows.len() > loose.elbows.len());
    assert!(tight.runs.iter().all(|r| r.length_m <= 5.0 + 1e-9));
    assert!((tight.total_length_m() - loose.total_length_m()).abs() < 1e-9);
}

#[test]
fn test_feeder_plan_json_shape() {
    let plan = route_feeders(Point::new(1.0, 1.0), &house()[..1], 100.0).unwrap();
    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["runs"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["runs"][0]["room_index"], 0);
    assert_eq!(json["elbows"][0]["x"], 4.0);
}
