//! Error types for the layout engine.
//!
//! Only invalid input is an error. Length-cap truncation, empty rooms and
//! failed reconnections are reported through [`LayoutWarning`] and flags on
//! the result instead, so callers can tell "nothing to route" from
//! "routing failed".

use heatloop_core::{GridPoint, Point};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that abort a layout operation before any grid work starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Room width, length or grid resolution is zero, negative or not finite.
    #[error("Invalid dimensions: width {width} m, length {length} m, resolution {resolution} m")]
    InvalidDimensions {
        width: f64,
        length: f64,
        resolution: f64,
    },

    /// The requested start point lies on an obstacle or no-pipe cell.
    #[error("Start point {point} is not on a routable cell")]
    InvalidStartPoint { point: GridPoint },

    /// The requested end point lies on an obstacle or no-pipe cell.
    #[error("End point {point} is not on a routable cell")]
    InvalidEndPoint { point: GridPoint },

    /// A point lies outside `[0, cols) x [0, rows)`.
    #[error("Point {point} is outside the {cols}x{rows} grid")]
    OutOfBounds {
        point: GridPoint,
        cols: usize,
        rows: usize,
    },

    /// A tuning parameter is out of its valid range.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },
}

impl LayoutError {
    pub(crate) fn parameter(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Recoverable conditions reported alongside a usable result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutWarning {
    /// No chain of free cells joins the open end of the path to the target.
    ReconnectionFailed { from: GridPoint, target: GridPoint },

    /// The length cap was reached before the path could be joined to the target.
    ReconnectionSkipped { last: Point, target: GridPoint },

    /// The start point could not be bridged to the first run without a jump.
    LeadInFailed { start: GridPoint, first: GridPoint },
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReconnectionFailed { from, target } => {
                write!(f, "no free route from {} to {}", from, target)
            }
            Self::ReconnectionSkipped { last, target } => write!(
                f,
                "length cap reached at {}, {} not connected",
                last, target
            ),
            Self::LeadInFailed { start, first } => {
                write!(f, "start {} could not be joined to {}", start, first)
            }
        }
    }
}
