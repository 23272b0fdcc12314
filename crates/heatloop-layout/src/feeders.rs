//! Feeder leads from a heat source to each room.
//!
//! Each room gets an L-shaped lead: horizontally along the source row to
//! the room's centre column, then vertically to the centre. Legs longer
//! than the maximum run are divided into equal runs joined by couplings,
//! which are counted as elbows.

use crate::error::{LayoutError, LayoutResult};
use heatloop_core::{Point, EPSILON};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A room placed on the house plan, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedRoom {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PlacedRoom {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn centre(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// One straight piece of feeder pipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeederRun {
    pub room_index: usize,
    pub start: Point,
    pub end: Point,
    pub length_m: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeederPlan {
    pub runs: Vec<FeederRun>,
    pub elbows: Vec<Point>,
}

impl FeederPlan {
    pub fn total_length_m(&self) -> f64 {
        self.runs.iter().map(|r| r.length_m).sum()
    }

    pub fn runs_for(&self, room_index: usize) -> impl Iterator<Item = &FeederRun> {
        self.runs.iter().filter(move |r| r.room_index == room_index)
    }
}

/// Routes a lead from `source` to the centre of every room.
pub fn route_feeders(
    source: Point,
    rooms: &[PlacedRoom],
    max_run_m: f64,
) -> LayoutResult<FeederPlan> {
    if !(max_run_m.is_finite() && max_run_m > 0.0) {
        return Err(LayoutError::parameter(
            "max_run_m",
            format!("must be positive, got {}", max_run_m),
        ));
    }
    if let Some((index, room)) = rooms
        .iter()
        .enumerate()
        .find(|(_, r)| !(r.width.is_finite() && r.width > 0.0 && r.height.is_finite() && r.height > 0.0))
    {
        return Err(LayoutError::parameter(
            "rooms",
            format!("room {} has size {} x {}", index, room.width, room.height),
        ));
    }

    let mut plan = FeederPlan::default();
    for (index, room) in rooms.iter().enumerate() {
        let centre = room.centre();
        let corner = Point::new(centre.x, source.y);
        let horizontal = source.distance_to(&corner) > EPSILON;
        let vertical = corner.distance_to(&centre) > EPSILON;

        if horizontal && vertical {
            plan.elbows.push(corner);
        }
        for (start, end) in [(source, corner), (corner, centre)] {
            add_leg(&mut plan, index, start, end, max_run_m);
        }
    }

    debug!(
        "Routed {} feeder runs with {} elbows for {} rooms",
        plan.runs.len(),
        plan.elbows.len(),
        rooms.len()
    );
    Ok(plan)
}

/// Appends one straight leg, split into equal runs no longer than `max_run`.
fn add_leg(plan: &mut FeederPlan, room_index: usize, start: Point, end: Point, max_run: f64) {
    let length = start.distance_to(&end);
    if length <= EPSILON {
        return;
    }
    let pieces = if length > max_run + EPSILON {
        (length / max_run).ceil() as usize
    } else {
        1
    };
    for i in 0..pieces {
        let from = start.lerp(&end, i as f64 / pieces as f64);
        let to = start.lerp(&end, (i + 1) as f64 / pieces as f64);
        if i > 0 {
            plan.elbows.push(from);
        }
        plan.runs.push(FeederRun {
            room_index,
            start: from,
            end: to,
            length_m: length / pieces as f64,
        });
    }
}
