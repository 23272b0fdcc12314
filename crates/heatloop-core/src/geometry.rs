//! Point types and path geometry.
//!
//! Two coordinate flavours are used throughout Heatloop:
//! - [`GridPoint`]: an integer cell coordinate (`x` = column, `y` = row).
//! - [`Point`]: a real coordinate, either in grid units or in meters.
//!   Grid units multiplied by the grid resolution give meters; callers
//!   track which one they hold.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A real-valued 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given X and Y coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Calculates the grid-axis (Manhattan) distance to another point.
    pub fn manhattan_distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Linear interpolation towards `other`; `t = 0` is `self`, `t = 1` is `other`.
    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Returns the cell this point sits on exactly, if it is grid aligned.
    pub fn as_grid_point(&self) -> Option<GridPoint> {
        let rx = self.x.round();
        let ry = self.y.round();
        if (self.x - rx).abs() > crate::EPSILON || (self.y - ry).abs() > crate::EPSILON {
            return None;
        }
        if rx < i32::MIN as f64 || rx > i32::MAX as f64 || ry < i32::MIN as f64 || ry > i32::MAX as f64
        {
            return None;
        }
        Some(GridPoint::new(rx as i32, ry as i32))
    }
}

impl From<GridPoint> for Point {
    fn from(p: GridPoint) -> Self {
        p.to_point()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An integer grid cell coordinate: `x` is the column, `y` the row.
///
/// Signed so that out-of-range input (negative coordinates) can be
/// represented and rejected instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn to_point(self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }

    /// Cardinal neighbours in right, down, left, up order.
    pub fn neighbors4(self) -> [GridPoint; 4] {
        [
            GridPoint::new(self.x + 1, self.y),
            GridPoint::new(self.x, self.y + 1),
            GridPoint::new(self.x - 1, self.y),
            GridPoint::new(self.x, self.y - 1),
        ]
    }

    /// True when `other` shares an edge with this cell.
    pub fn is_adjacent(self, other: GridPoint) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// How the distance between two consecutive path points is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Straight-line distance.
    #[default]
    Euclidean,
    /// Sum of axis-aligned offsets, as run by pipe that only turns at right angles.
    Manhattan,
}

impl DistanceMetric {
    pub fn distance(self, a: &Point, b: &Point) -> f64 {
        match self {
            Self::Euclidean => a.distance_to(b),
            Self::Manhattan => a.manhattan_distance_to(b),
        }
    }
}

/// Sums the distances between consecutive points and multiplies by `scale`.
///
/// `scale` converts point units into the unit of the result, e.g. the grid
/// resolution in meters for paths expressed in grid cells.
pub fn path_length(points: &[Point], scale: f64, metric: DistanceMetric) -> f64 {
    points
        .windows(2)
        .map(|w| metric.distance(&w[0], &w[1]))
        .sum::<f64>()
        * scale
}

/// Serializes a point sequence as move/line drawing commands: `M x y L x y ...`.
///
/// Returns an empty string for an empty sequence.
pub fn path_to_draw_commands(points: &[Point]) -> String {
    let mut commands = Vec::with_capacity(points.len());
    for (i, p) in points.iter().enumerate() {
        let token = if i == 0 { "M" } else { "L" };
        commands.push(format!("{} {} {}", token, p.x, p.y));
    }
    commands.join(" ")
}

/// Maps points with `p * factor + offset`, applied to both axes.
///
/// With `factor` = resolution and `offset` = 0 this converts grid units to
/// meters; with `factor` = cell size in pixels and `offset` = half a cell it
/// places points on cell centres for a renderer.
pub fn scale_points(points: &[Point], factor: f64, offset: f64) -> Vec<Point> {
    points
        .iter()
        .map(|p| Point::new(p.x * factor + offset, p.y * factor + offset))
        .collect()
}
