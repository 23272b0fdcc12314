//! Heatloop Settings Crate
//!
//! Configuration file handling for the layout engine and its front ends.

pub mod config;
pub mod error;

pub use config::{Config, GenerationSettings, RenderingSettings, ZoningSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
