//! Incremental path construction shared by every strategy.

use crate::grid::Grid;
use heatloop_core::{GridPoint, Point, EPSILON};

/// Outcome of offering one candidate cell to a [`PathBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Accepted,
    /// Out of bounds, unroutable or already visited. Not counted.
    Rejected,
    /// The length cap was reached; nothing more will be accepted.
    Halted,
}

/// Accumulates a path under the acceptance rules and the length cap.
///
/// Lengths are tracked in grid units; the cap is given in the same units.
pub(crate) struct PathBuilder<'a> {
    grid: &'a Grid,
    visited: Vec<bool>,
    points: Vec<Point>,
    last_cell: Option<GridPoint>,
    length: f64,
    cap: Option<f64>,
    halted: bool,
}

impl<'a> PathBuilder<'a> {
    pub(crate) fn new(grid: &'a Grid, cap: Option<f64>) -> Self {
        Self {
            grid,
            visited: vec![false; grid.len()],
            points: Vec::new(),
            last_cell: None,
            length: 0.0,
            cap,
            halted: false,
        }
    }

    /// Marks a cell as taken so traversal leaves it for the final connection.
    pub(crate) fn reserve(&mut self, cell: GridPoint) {
        if let Some(i) = self.grid.index_of(cell) {
            self.visited[i] = true;
        }
    }

    pub(crate) fn push(&mut self, cell: GridPoint) -> Step {
        self.offer(cell, false)
    }

    /// Like [`push`](Self::push) but accepts a cell that is already visited
    /// or reserved. Used for the final cell of a reconnection.
    pub(crate) fn push_target(&mut self, cell: GridPoint) -> Step {
        self.offer(cell, true)
    }

    fn offer(&mut self, cell: GridPoint, allow_revisit: bool) -> Step {
        if self.halted {
            return Step::Halted;
        }
        let Some(index) = self.grid.index_of(cell) else {
            return Step::Rejected;
        };
        if !self.grid.is_routable(cell) || (self.visited[index] && !allow_revisit) {
            return Step::Rejected;
        }

        let next = cell.to_point();
        let edge = self
            .points
            .last()
            .map(|last| last.distance_to(&next))
            .unwrap_or(0.0);

        if let Some(cap) = self.cap {
            if self.length + edge > cap + EPSILON {
                let remaining = cap - self.length;
                if remaining > EPSILON {
                    if let Some(last) = self.points.last().copied() {
                        self.points.push(last.lerp(&next, remaining / edge));
                        self.length = cap;
                    }
                }
                self.halted = true;
                return Step::Halted;
            }
        }

        self.visited[index] = true;
        self.points.push(next);
        self.last_cell = Some(cell);
        self.length += edge;
        Step::Accepted
    }

    /// Offers every cell in order. Returns false once the cap halts the path.
    pub(crate) fn extend<I: IntoIterator<Item = GridPoint>>(&mut self, cells: I) -> bool {
        for cell in cells {
            if self.push(cell) == Step::Halted {
                return false;
            }
        }
        true
    }

    pub(crate) fn is_visited(&self, cell: GridPoint) -> bool {
        self.grid.index_of(cell).is_some_and(|i| self.visited[i])
    }

    pub(crate) fn visited(&self) -> &[bool] {
        &self.visited
    }

    pub(crate) fn first_cell(&self) -> Option<GridPoint> {
        self.points.first().and_then(Point::as_grid_point)
    }

    /// Last emitted point, which may be an interpolated cutoff.
    pub(crate) fn last_point(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Last grid-aligned cell accepted. Stays put after an interpolated cutoff.
    pub(crate) fn last_cell(&self) -> Option<GridPoint> {
        self.last_cell
    }

    pub(crate) fn is_halted(&self) -> bool {
        self.halted
    }

    pub(crate) fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns the points and whether the cap cut the path short.
    pub(crate) fn finish(self) -> (Vec<Point>, bool) {
        (self.points, self.halted)
    }
}
