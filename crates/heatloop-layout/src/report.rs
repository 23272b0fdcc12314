//! Length and turn accounting for generated paths.

use crate::error::{LayoutResult, LayoutWarning};
use crate::zones::{split_path, Segment};
use heatloop_core::{path_length, path_to_draw_commands, scale_points, DistanceMetric, Point};
use serde::{Deserialize, Serialize};

/// Total pipe length in meters of a path given in grid units.
pub fn calculate_length(points: &[Point], resolution: f64) -> f64 {
    path_length(points, resolution, DistanceMetric::Euclidean)
}

/// Upper-bound elbow count: every interior vertex.
///
/// Collinear vertices are counted too; see [`count_direction_changes`] for
/// the exact number of turns.
pub fn estimate_elbows(points: &[Point]) -> usize {
    points.len().saturating_sub(2)
}

/// Number of interior vertices where the direction of travel changes.
pub fn count_direction_changes(points: &[Point]) -> usize {
    const TOLERANCE: f64 = 1e-9;
    let mut turns = 0;
    let mut previous: Option<(f64, f64)> = None;
    for w in points.windows(2) {
        let (dx, dy) = (w[1].x - w[0].x, w[1].y - w[0].y);
        let len = dx.hypot(dy);
        if len < TOLERANCE {
            continue;
        }
        let dir = (dx / len, dy / len);
        if let Some(prev) = previous {
            let cross = prev.0 * dir.1 - prev.1 * dir.0;
            let dot = prev.0 * dir.0 + prev.1 * dir.1;
            if cross.abs() > TOLERANCE || dot < 0.0 {
                turns += 1;
            }
        }
        previous = Some(dir);
    }
    turns
}

/// Result of one path generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathReport {
    /// Path in grid units.
    pub path: Vec<Point>,
    pub total_length_m: f64,
    pub elbow_estimate: usize,
    /// True when the length cap ended generation early.
    pub truncated: bool,
    #[serde(default)]
    pub warnings: Vec<LayoutWarning>,
    /// Meters per grid unit.
    pub resolution_m: f64,
}

impl PathReport {
    /// Measures `path` and packages it with its flags.
    pub fn new(
        path: Vec<Point>,
        resolution_m: f64,
        truncated: bool,
        warnings: Vec<LayoutWarning>,
    ) -> Self {
        Self {
            total_length_m: calculate_length(&path, resolution_m),
            elbow_estimate: estimate_elbows(&path),
            path,
            truncated,
            warnings,
            resolution_m,
        }
    }

    /// Nothing was routed.
    pub fn empty(resolution_m: f64) -> Self {
        Self::new(Vec::new(), resolution_m, false, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn turn_count(&self) -> usize {
        count_direction_changes(&self.path)
    }

    /// The path in meters.
    pub fn to_meters(&self) -> Vec<Point> {
        scale_points(&self.path, self.resolution_m, 0.0)
    }

    /// Drawing commands for the path in grid units.
    pub fn draw_commands(&self) -> String {
        path_to_draw_commands(&self.path)
    }

    /// Splits the path into circuits of at most `max_segment_length_m`.
    ///
    /// Segment points stay in grid units; lengths are in meters.
    pub fn split(&self, max_segment_length_m: f64) -> LayoutResult<Vec<Segment>> {
        split_path(&self.path, max_segment_length_m, self.resolution_m)
    }
}
