//! # Heatloop Layout
//!
//! Radiant floor-heating pipe layout engine.
//!
//! ## Pipeline
//!
//! - **Room and grid model**: rooms are discretized into an occupancy grid;
//!   obstacles, wall passageways and no-pipe zones are stamped onto it
//! - **Path generator**: boustrophedon, single spiral and double spiral
//!   (counterflow) strategies sharing one set of acceptance rules and an
//!   optional length cap
//! - **Reconnector**: breadth-first search joining the open end of a path to
//!   a manifold end point
//! - **Reporter**: pipe length and elbow estimates
//! - **Zone splitter**: cuts an oversized path into circuits no longer than
//!   the installable maximum
//!
//! The [`planner`] module runs the whole pipeline for one room. [`bifilar`]
//! and [`feeders`] produce continuous outlines and house-level feeder leads
//! in meters without a grid.
//!
//! Every operation is a pure function of its inputs.

pub mod bifilar;
pub mod error;
pub mod feeders;
pub mod generator;
pub mod grid;
pub mod planner;
pub mod reconnect;
pub mod report;
pub mod room;
pub mod zones;

pub use bifilar::generate_bifilar_outline;
pub use error::{LayoutError, LayoutResult, LayoutWarning};
pub use feeders::{route_feeders, FeederPlan, FeederRun, PlacedRoom};
pub use generator::{generate_path, GenerationOptions, Strategy};
pub use grid::{
    build_grid, stamp_no_pipe_zones, stamp_obstacles, stamp_passageways, CellState, Grid,
};
pub use planner::{plan_layout, LayoutPlan};
pub use reconnect::shortest_chain;
pub use report::{calculate_length, count_direction_changes, estimate_elbows, PathReport};
pub use room::{CellRegion, Passageway, Room, RoomLayout, Side};
pub use zones::{split_path, Segment};

pub use heatloop_core::{GridPoint, Point};

/// Default per-circuit pipe length limit in meters.
pub const DEFAULT_CIRCUIT_MAX_M: f64 = 100.0;
