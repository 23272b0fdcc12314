//! # Heatloop Core
//!
//! Core types and utilities shared by the Heatloop crates.
//! Provides the point types used for both grid-cell and metric coordinates,
//! the distance metrics the layout engine measures pipe with, and the
//! draw-command serialization handed to renderers.

pub mod geometry;
pub mod units;

pub use geometry::{
    path_length, path_to_draw_commands, scale_points, DistanceMetric, GridPoint, Point,
};
pub use units::{format_length, parse_length, LengthUnit};

/// Tolerance used when comparing lengths and coordinates.
pub const EPSILON: f64 = 1e-9;
