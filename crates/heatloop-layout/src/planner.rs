//! One-call layout of a single room.

use crate::error::{LayoutError, LayoutResult};
use crate::generator::{generate_path, GenerationOptions};
use crate::report::PathReport;
use crate::room::RoomLayout;
use crate::zones::Segment;
use heatloop_core::EPSILON;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Everything computed for one room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutPlan {
    pub cols: usize,
    pub rows: usize,
    pub report: PathReport,
    /// Installable circuits. Points in grid units.
    pub zones: Vec<Segment>,
}

impl LayoutPlan {
    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    pub fn total_length_m(&self) -> f64 {
        self.report.total_length_m
    }

    /// Length of the longest circuit in meters.
    pub fn longest_zone_m(&self) -> f64 {
        self.zones.iter().map(|z| z.length_m).fold(0.0, f64::max)
    }
}

/// Builds the grid for `layout`, generates the path, and splits it into
/// circuits when it is longer than `circuit_max_m`.
///
/// A path that fits in one circuit is returned as a single zone.
pub fn plan_layout(
    layout: &RoomLayout,
    options: &GenerationOptions,
    circuit_max_m: Option<f64>,
) -> LayoutResult<LayoutPlan> {
    options.validate()?;
    if let Some(max) = circuit_max_m {
        if !(max.is_finite() && max > 0.0) {
            return Err(LayoutError::parameter(
                "circuit_max_m",
                format!("must be positive, got {}", max),
            ));
        }
    }

    let resolution = options.grid_resolution_m;
    let grid = layout.build_grid(resolution)?;
    let report = generate_path(&grid, options)?;

    let zones = match circuit_max_m {
        Some(max) if report.total_length_m > max + EPSILON => report.split(max)?,
        _ if report.path.len() >= 2 => {
            vec![Segment::from_points(report.path.clone(), resolution)]
        }
        _ => Vec::new(),
    };

    info!(
        "Planned {}x{} m room with {}: {:.2} m of pipe in {} circuit(s), {} warning(s)",
        layout.room.width_m,
        layout.room.length_m,
        options.strategy,
        report.total_length_m,
        zones.len(),
        report.warnings.len()
    );

    Ok(LayoutPlan {
        cols: grid.cols(),
        rows: grid.rows(),
        report,
        zones,
    })
}
