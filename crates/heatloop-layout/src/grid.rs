//! Occupancy grid model.
//!
//! The grid stores one [`CellState`] per cell in a flat row-major buffer
//! behind an `Arc`. Grids are values: every stamping function returns a new
//! grid and the buffer is only copied when a stamp actually writes to it
//! (`Arc::make_mut`), so a stamped grid never aliases the one it came from.

use crate::error::{LayoutError, LayoutResult};
use crate::room::{CellRegion, Passageway, Room, Side};
use heatloop_core::GridPoint;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    #[default]
    Empty,
    Obstacle,
    Passageway,
    NoPipeZone,
}

impl CellState {
    /// Pipe may be laid on empty cells and passageways.
    pub fn is_routable(self) -> bool {
        matches!(self, Self::Empty | Self::Passageway)
    }
}

/// A `rows x cols` occupancy grid indexed by `(row, col)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Arc<Vec<CellState>>,
}

impl Grid {
    /// Creates a grid with every cell `Empty`.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: Arc::new(vec![CellState::Empty; rows * cols]),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn in_bounds(&self, p: GridPoint) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.cols && (p.y as usize) < self.rows
    }

    /// Flat index of an in-bounds cell.
    pub fn index_of(&self, p: GridPoint) -> Option<usize> {
        if self.in_bounds(p) {
            Some(p.y as usize * self.cols + p.x as usize)
        } else {
            None
        }
    }

    pub fn point_at(&self, index: usize) -> GridPoint {
        GridPoint::new((index % self.cols) as i32, (index / self.cols) as i32)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<CellState> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn state_at(&self, p: GridPoint) -> Option<CellState> {
        self.index_of(p).map(|i| self.cells[i])
    }

    /// Out-of-bounds cells are never routable.
    pub fn is_routable(&self, p: GridPoint) -> bool {
        self.state_at(p).is_some_and(CellState::is_routable)
    }

    pub fn routable_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_routable()).count()
    }

    /// All cells that are not routable, in row-major order.
    pub fn blocked_cells(&self) -> Vec<GridPoint> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_routable())
            .map(|(i, _)| self.point_at(i))
            .collect()
    }

    /// Writes `state` to every in-bounds cell of `region` for which `keep`
    /// returns false.
    fn fill_region(
        &mut self,
        region: &CellRegion,
        state: CellState,
        keep: impl Fn(CellState) -> bool,
    ) {
        if region.is_empty() {
            return;
        }
        let x0 = i64::from(region.x).max(0);
        let y0 = i64::from(region.y).max(0);
        let x1 = (i64::from(region.x) + i64::from(region.width)).min(self.cols as i64);
        let y1 = (i64::from(region.y) + i64::from(region.height)).min(self.rows as i64);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let cols = self.cols;
        let cells = Arc::make_mut(&mut self.cells);
        for row in y0 as usize..y1 as usize {
            for col in x0 as usize..x1 as usize {
                let cell = &mut cells[row * cols + col];
                if !keep(*cell) {
                    *cell = state;
                }
            }
        }
    }
}

/// Builds an all-`Empty` grid for `room` at `resolution` meters per cell.
pub fn build_grid(room: &Room, resolution: f64) -> LayoutResult<Grid> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !valid(room.width_m) || !valid(room.length_m) || !valid(resolution) {
        return Err(LayoutError::InvalidDimensions {
            width: room.width_m,
            length: room.length_m,
            resolution,
        });
    }

    let rows = room.grid_rows(resolution);
    let cols = room.grid_cols(resolution);
    debug!("Building {}x{} grid at {} m per cell", cols, rows, resolution);
    Ok(Grid::new(rows, cols))
}

/// Marks obstacle regions. Passageway cells stay routable.
pub fn stamp_obstacles(grid: &Grid, obstacles: &[CellRegion]) -> Grid {
    let mut out = grid.clone();
    for region in obstacles {
        out.fill_region(region, CellState::Obstacle, |c| c == CellState::Passageway);
    }
    out
}

/// Opens passageways along the room border.
///
/// Each passageway covers the inclusive cell range
/// `floor(position / resolution) ..= floor((position + width) / resolution)`
/// on the first/last row (top/bottom) or first/last column (left/right).
pub fn stamp_passageways(
    grid: &Grid,
    passageways: &[Passageway],
    room: &Room,
    resolution: f64,
) -> Grid {
    let mut out = grid.clone();
    if out.is_empty() || !(resolution.is_finite() && resolution > 0.0) {
        return out;
    }

    let rows = out.rows as i64;
    let cols = out.cols as i64;
    for passage in passageways {
        let (wall_m, wall_cells) = match passage.side {
            Side::Top | Side::Bottom => (room.width_m, cols),
            Side::Left | Side::Right => (room.length_m, rows),
        };
        if passage.position_m >= wall_m {
            debug!("Passageway on {} wall starts past its end, ignored", passage.side);
            continue;
        }
        let (start, end) = passage.cell_range(resolution);
        if end < start || end < 0 || start >= wall_cells {
            continue;
        }
        let start = start.max(0);
        let end = end.min(wall_cells - 1);
        // Both ends lie on the wall, so the span fits the grid.
        let span = (end - start + 1) as i32;
        let start = start as i32;
        let region = match passage.side {
            Side::Top => CellRegion::new(start, 0, span, 1),
            Side::Bottom => CellRegion::new(start, (rows - 1) as i32, span, 1),
            Side::Left => CellRegion::new(0, start, 1, span),
            Side::Right => CellRegion::new((cols - 1) as i32, start, 1, span),
        };
        out.fill_region(&region, CellState::Passageway, |_| false);
    }
    out
}

/// Marks no-pipe zones. Passageway cells stay routable.
pub fn stamp_no_pipe_zones(grid: &Grid, zones: &[CellRegion]) -> Grid {
    let mut out = grid.clone();
    for region in zones {
        out.fill_region(region, CellState::NoPipeZone, |c| c == CellState::Passageway);
    }
    out
}
