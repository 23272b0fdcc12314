//! Path generation over an occupancy grid.
//!
//! [`generate_path`] runs one [`Strategy`] to propose cells, feeds them
//! through the shared acceptance rules (bounds, routability, no revisits,
//! length cap), optionally bridges a manifold start point to the first run,
//! and joins the open end to a required end point with the reconnector.

mod builder;
mod strategy;

pub use strategy::Strategy;

use crate::error::{LayoutError, LayoutResult, LayoutWarning};
use crate::grid::Grid;
use crate::reconnect::shortest_chain;
use crate::report::PathReport;
use builder::{PathBuilder, Step};
use heatloop_core::GridPoint;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Tuning parameters for one generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    /// Meters per grid cell.
    pub grid_resolution_m: f64,
    /// Grid units between adjacent parallel runs.
    pub loop_spacing: u32,
    /// Manifold supply connection; emitted as the first point.
    pub start_point: Option<GridPoint>,
    /// Manifold return connection; the path is joined to it at the end.
    pub end_point: Option<GridPoint>,
    /// Longest pipe a single run may use. `None` is unbounded.
    pub max_pipe_length_m: Option<f64>,
    pub strategy: Strategy,
    /// Join the path back to its first point when no end point is given.
    pub close_loop: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            grid_resolution_m: 0.1,
            loop_spacing: 1,
            start_point: None,
            end_point: None,
            max_pipe_length_m: None,
            strategy: Strategy::default(),
            close_loop: false,
        }
    }
}

impl GenerationOptions {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    pub fn with_resolution(mut self, meters: f64) -> Self {
        self.grid_resolution_m = meters;
        self
    }

    pub fn with_loop_spacing(mut self, spacing: u32) -> Self {
        self.loop_spacing = spacing;
        self
    }

    pub fn with_start(mut self, start: GridPoint) -> Self {
        self.start_point = Some(start);
        self
    }

    pub fn with_end(mut self, end: GridPoint) -> Self {
        self.end_point = Some(end);
        self
    }

    pub fn with_max_length(mut self, meters: f64) -> Self {
        self.max_pipe_length_m = Some(meters);
        self
    }

    pub fn with_close_loop(mut self, close: bool) -> Self {
        self.close_loop = close;
        self
    }

    /// Checks the scalar parameters.
    pub fn validate(&self) -> LayoutResult<()> {
        if !(self.grid_resolution_m.is_finite() && self.grid_resolution_m > 0.0) {
            return Err(LayoutError::parameter(
                "grid_resolution_m",
                format!("must be positive, got {}", self.grid_resolution_m),
            ));
        }
        if self.loop_spacing == 0 {
            return Err(LayoutError::parameter("loop_spacing", "must be at least 1"));
        }
        if let Some(max) = self.max_pipe_length_m {
            if !(max.is_finite() && max > 0.0) {
                return Err(LayoutError::parameter(
                    "max_pipe_length_m",
                    format!("must be positive, got {}", max),
                ));
            }
        }
        Ok(())
    }

    /// Checks the start and end points against `grid`.
    fn validate_points(&self, grid: &Grid) -> LayoutResult<()> {
        let out_of_bounds = |point: GridPoint| LayoutError::OutOfBounds {
            point,
            cols: grid.cols(),
            rows: grid.rows(),
        };
        if let Some(start) = self.start_point {
            if !grid.in_bounds(start) {
                return Err(out_of_bounds(start));
            }
            if !grid.is_routable(start) {
                return Err(LayoutError::InvalidStartPoint { point: start });
            }
        }
        if let Some(end) = self.end_point {
            if !grid.in_bounds(end) {
                return Err(out_of_bounds(end));
            }
            if !grid.is_routable(end) {
                return Err(LayoutError::InvalidEndPoint { point: end });
            }
        }
        Ok(())
    }
}

/// Generates a space-filling path over `grid`.
///
/// Fails only on invalid input. A room too small for two runs
/// `loop_spacing` apart yields an empty report; a capped path is returned
/// with `truncated` set; a failed reconnection leaves the path open and
/// adds a warning.
pub fn generate_path(grid: &Grid, options: &GenerationOptions) -> LayoutResult<PathReport> {
    options.validate()?;
    options.validate_points(grid)?;

    let resolution = options.grid_resolution_m;
    let spacing = options.loop_spacing;
    if grid.rows().min(grid.cols()) < spacing as usize + 1 {
        debug!(
            "{}x{} grid has no room for loop spacing {}",
            grid.cols(),
            grid.rows(),
            spacing
        );
        return Ok(PathReport::empty(resolution));
    }

    let candidates = options.strategy.candidates(grid.cols(), grid.rows(), spacing);
    debug!(
        "{} proposed {} candidate cells on a {}x{} grid",
        options.strategy,
        candidates.len(),
        grid.cols(),
        grid.rows()
    );

    let cap = options.max_pipe_length_m.map(|m| m / resolution);
    let mut builder = PathBuilder::new(grid, cap);
    let mut warnings = Vec::new();

    if let Some(end) = options.end_point {
        builder.reserve(end);
    }

    if let Some(start) = options.start_point {
        builder.push_target(start);
        lead_in(&mut builder, grid, start, &candidates, &mut warnings);
    }

    builder.extend(candidates);

    let target = options.end_point.or_else(|| {
        if options.close_loop {
            options.start_point.or_else(|| builder.first_cell())
        } else {
            None
        }
    });
    if let Some(target) = target {
        reconnect(&mut builder, grid, target, &mut warnings);
    }

    let (path, truncated) = builder.finish();
    Ok(PathReport::new(path, resolution, truncated, warnings))
}

/// Bridges the start point to the strategy's first usable cell when they
/// are not neighbours.
fn lead_in(
    builder: &mut PathBuilder<'_>,
    grid: &Grid,
    start: GridPoint,
    candidates: &[GridPoint],
    warnings: &mut Vec<LayoutWarning>,
) {
    let Some(first) = candidates
        .iter()
        .copied()
        .find(|&c| grid.is_routable(c) && !builder.is_visited(c))
    else {
        return;
    };
    if start.is_adjacent(first) {
        return;
    }

    match shortest_chain(grid, builder.visited(), start, first) {
        Some(chain) => {
            // The strategy emits `first` itself.
            let bridge = &chain[..chain.len().saturating_sub(1)];
            debug!("Lead-in from {} to {} over {} cells", start, first, bridge.len());
            builder.extend(bridge.iter().copied());
        }
        None => {
            warn!("Start point {} cannot reach first run at {}", start, first);
            warnings.push(LayoutWarning::LeadInFailed { start, first });
        }
    }
}

/// Joins the open end of the path to `target`.
fn reconnect(
    builder: &mut PathBuilder<'_>,
    grid: &Grid,
    target: GridPoint,
    warnings: &mut Vec<LayoutWarning>,
) {
    let Some(last) = builder.last_cell() else {
        return;
    };
    if builder.is_halted() {
        warn!("Length cap reached before connecting to {}", target);
        warnings.push(LayoutWarning::ReconnectionSkipped {
            last: builder.last_point().unwrap_or_else(|| last.to_point()),
            target,
        });
        return;
    }
    if last == target && builder.len() > 1 {
        return;
    }

    match shortest_chain(grid, builder.visited(), last, target) {
        Some(chain) => {
            let Some((&goal, body)) = chain.split_last() else {
                return;
            };
            let step = if builder.extend(body.iter().copied()) {
                builder.push_target(goal)
            } else {
                Step::Halted
            };
            match step {
                Step::Accepted => {}
                Step::Rejected => warn!("Reconnection target {} was rejected", goal),
                Step::Halted => {
                    warn!("Length cap reached while connecting to {}", target);
                    warnings.push(LayoutWarning::ReconnectionSkipped {
                        last: builder.last_point().unwrap_or_else(|| last.to_point()),
                        target,
                    });
                }
            }
        }
        None => {
            warn!("No free route from {} to {}", last, target);
            warnings.push(LayoutWarning::ReconnectionFailed { from: last, target });
        }
    }
}
