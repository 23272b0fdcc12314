//! # Heatloop
//!
//! Radiant floor-heating pipe layout planner.
//!
//! ## Architecture
//!
//! Heatloop is organized as a workspace with multiple crates:
//!
//! 1. **heatloop-core** - Points, distance metrics, draw commands, length units
//! 2. **heatloop-layout** - Grid model, path generation, reconnection, circuit splitting
//! 3. **heatloop-settings** - Configuration files and defaults
//! 4. **heatloop** - Logging setup, output formatting and the `heatloop` command
//!
//! ## Features
//!
//! - **Strategies**: serpentine rows, single inward spiral, counterflow double spiral
//! - **Room features**: obstacles, wall passageways, no-pipe zones
//! - **Manifold points**: lead-in from a supply point, reconnection to a return point
//! - **Circuits**: pipe length cap and splitting into installable circuits
//! - **House level**: bifilar outlines and feeder leads from a heat source

pub mod render;

pub use heatloop_core::{
    format_length, parse_length, path_length, path_to_draw_commands, scale_points, DistanceMetric,
    GridPoint, LengthUnit, Point,
};

pub use heatloop_layout::{
    build_grid, generate_bifilar_outline, generate_path, plan_layout, route_feeders, split_path,
    CellRegion, CellState, FeederPlan, FeederRun, GenerationOptions, Grid, LayoutError,
    LayoutPlan, LayoutResult, LayoutWarning, Passageway, PathReport, PlacedRoom, Room,
    RoomLayout, Segment, Side, Strategy,
};

pub use heatloop_settings::{Config, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, so stdout stays machine-readable
/// - RUST_LOG environment variable support, `warn` otherwise
/// - Target, level and line numbers on every event
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
