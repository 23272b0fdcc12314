//! Room geometry and the regions stamped onto its grid.

use crate::error::LayoutResult;
use crate::grid::{build_grid, stamp_no_pipe_zones, stamp_obstacles, stamp_passageways, Grid};
use heatloop_core::EPSILON;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A rectangular room, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub width_m: f64,
    pub length_m: f64,
}

impl Room {
    pub fn new(width_m: f64, length_m: f64) -> Self {
        Self { width_m, length_m }
    }

    /// Number of grid columns, `ceil(width / resolution)`.
    pub fn grid_cols(&self, resolution: f64) -> usize {
        cell_count(self.width_m, resolution)
    }

    /// Number of grid rows, `ceil(length / resolution)`.
    pub fn grid_rows(&self, resolution: f64) -> usize {
        cell_count(self.length_m, resolution)
    }
}

/// Snaps `value` to the nearest integer when float division left it a hair off.
fn snap(value: f64) -> f64 {
    let rounded = value.round();
    if (value - rounded).abs() < EPSILON {
        rounded
    } else {
        value
    }
}

/// `ceil(meters / resolution)`, treating 5.0 / 0.1 as exactly 50.
pub(crate) fn cell_count(meters: f64, resolution: f64) -> usize {
    let cells = snap(meters / resolution).ceil();
    if cells <= 0.0 {
        0
    } else {
        cells as usize
    }
}

/// `floor(meters / resolution)` with the same snapping as [`cell_count`].
pub(crate) fn cell_index(meters: f64, resolution: f64) -> i64 {
    snap(meters / resolution).floor() as i64
}

/// An axis-aligned block of cells, in grid coordinates.
///
/// Used for obstacles and no-pipe zones. Regions may extend past the grid;
/// stamping clips them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRegion {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl CellRegion {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a region from a rectangle in meters, covering every cell it touches.
    pub fn from_meters(x_m: f64, y_m: f64, width_m: f64, height_m: f64, resolution: f64) -> Self {
        let x0 = cell_index(x_m, resolution);
        let y0 = cell_index(y_m, resolution);
        let x1 = snap((x_m + width_m) / resolution).ceil() as i64;
        let y1 = snap((y_m + height_m) / resolution).ceil() as i64;
        Self {
            x: saturate(x0),
            y: saturate(y0),
            width: saturate(x1.saturating_sub(x0)),
            height: saturate(y1.saturating_sub(y0)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn contains(&self, col: i32, row: i32) -> bool {
        let (col, row) = (i64::from(col), i64::from(row));
        let (x, y) = (i64::from(self.x), i64::from(self.y));
        col >= x && col < x + i64::from(self.width) && row >= y && row < y + i64::from(self.height)
    }
}

fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// The wall a passageway opens through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => write!(f, "top"),
            Self::Bottom => write!(f, "bottom"),
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// An opening in a wall where pipe may leave or enter the room.
///
/// `position_m` is measured along the wall from the left (top/bottom walls)
/// or from the top (left/right walls).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Passageway {
    pub side: Side,
    pub position_m: f64,
    pub width_m: f64,
}

impl Passageway {
    pub fn new(side: Side, position_m: f64, width_m: f64) -> Self {
        Self {
            side,
            position_m,
            width_m,
        }
    }

    /// Inclusive cell-index range along the wall.
    pub fn cell_range(&self, resolution: f64) -> (i64, i64) {
        (
            cell_index(self.position_m, resolution),
            cell_index(self.position_m + self.width_m, resolution),
        )
    }
}

/// Everything the presentation layer supplies about a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomLayout {
    pub room: Room,
    #[serde(default)]
    pub obstacles: Vec<CellRegion>,
    #[serde(default)]
    pub passageways: Vec<Passageway>,
    #[serde(default)]
    pub no_pipe_zones: Vec<CellRegion>,
}

impl RoomLayout {
    pub fn new(room: Room) -> Self {
        Self {
            room,
            obstacles: Vec::new(),
            passageways: Vec::new(),
            no_pipe_zones: Vec::new(),
        }
    }

    pub fn with_obstacle(mut self, region: CellRegion) -> Self {
        self.obstacles.push(region);
        self
    }

    pub fn with_passageway(mut self, passageway: Passageway) -> Self {
        self.passageways.push(passageway);
        self
    }

    pub fn with_no_pipe_zone(mut self, region: CellRegion) -> Self {
        self.no_pipe_zones.push(region);
        self
    }

    /// Builds the occupancy grid: obstacles, then passageways, then no-pipe zones.
    pub fn build_grid(&self, resolution: f64) -> LayoutResult<Grid> {
        let grid = build_grid(&self.room, resolution)?;
        let grid = stamp_obstacles(&grid, &self.obstacles);
        let grid = stamp_passageways(&grid, &self.passageways, &self.room, resolution);
        Ok(stamp_no_pipe_zones(&grid, &self.no_pipe_zones))
    }
}
