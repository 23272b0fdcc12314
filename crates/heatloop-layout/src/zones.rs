//! Splitting a long path into installable circuits.

use crate::error::{LayoutError, LayoutResult};
use heatloop_core::{path_length, DistanceMetric, Point, EPSILON};
use serde::{Deserialize, Serialize};

/// A contiguous piece of a path no longer than the circuit limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub points: Vec<Point>,
    pub length_m: f64,
}

impl Segment {
    /// Builds a segment, measuring its own points. `scale` is meters per point unit.
    pub fn from_points(points: Vec<Point>, scale: f64) -> Self {
        let length_m = path_length(&points, scale, DistanceMetric::Euclidean);
        Self { points, length_m }
    }

    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn end(&self) -> Option<Point> {
        self.points.last().copied()
    }
}

/// Cuts `points` into segments of at most `max_segment_length_m` meters.
///
/// `scale` converts point units to meters: 1.0 for metric points, the grid
/// resolution for grid points. Cut points are interpolated exactly on the
/// length boundary and shared by the segments on either side; an edge longer
/// than the limit is cut as many times as needed. Only the last segment may
/// be shorter than the limit.
pub fn split_path(
    points: &[Point],
    max_segment_length_m: f64,
    scale: f64,
) -> LayoutResult<Vec<Segment>> {
    if !(max_segment_length_m.is_finite() && max_segment_length_m > 0.0) {
        return Err(LayoutError::parameter(
            "max_segment_length_m",
            format!("must be positive, got {}", max_segment_length_m),
        ));
    }
    if !(scale.is_finite() && scale > 0.0) {
        return Err(LayoutError::parameter(
            "scale",
            format!("must be positive, got {}", scale),
        ));
    }
    if points.len() < 2 {
        return Ok(Vec::new());
    }

    let mut segments = Vec::new();
    let mut current = vec![points[0]];
    let mut used = 0.0;

    for edge in points.windows(2) {
        let end = edge[1];
        let mut start = edge[0];
        let mut edge_len = start.distance_to(&end) * scale;

        while used + edge_len > max_segment_length_m + EPSILON {
            let take = max_segment_length_m - used;
            if take > EPSILON {
                let cut = start.lerp(&end, take / edge_len);
                current.push(cut);
                start = cut;
                edge_len -= take;
            }
            let closed = std::mem::replace(&mut current, vec![start]);
            segments.push(Segment::from_points(closed, scale));
            used = 0.0;
        }

        if edge_len > EPSILON {
            current.push(end);
            used += edge_len;
        }
    }

    if current.len() > 1 {
        segments.push(Segment::from_points(current, scale));
    }
    Ok(segments)
}
