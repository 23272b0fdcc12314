//! Configuration and settings management for Heatloop
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML files, stored by default in the platform configuration directory.
//!
//! Configuration is organized into logical sections:
//! - Generation defaults (resolution, loop spacing, strategy, length cap)
//! - Zoning (per-circuit pipe limit)
//! - Rendering hints for front ends (pipe width, cell size, zone colors)

use crate::error::{ConfigError, SettingsError, SettingsResult};
use heatloop_core::{GridPoint, LengthUnit};
use heatloop_layout::{GenerationOptions, Strategy, DEFAULT_CIRCUIT_MAX_M};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Defaults for path generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Meters per grid cell
    pub grid_resolution_m: f64,
    /// Grid units between parallel runs
    pub loop_spacing: u32,
    pub strategy: Strategy,
    /// Cap on a single generated run, unbounded when absent
    pub max_pipe_length_m: Option<f64>,
    pub close_loop: bool,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        let options = GenerationOptions::default();
        Self {
            grid_resolution_m: options.grid_resolution_m,
            loop_spacing: options.loop_spacing,
            strategy: options.strategy,
            max_pipe_length_m: None,
            close_loop: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoningSettings {
    /// Longest installable circuit in meters
    pub max_circuit_length_m: f64,
}

impl Default for ZoningSettings {
    fn default() -> Self {
        Self {
            max_circuit_length_m: DEFAULT_CIRCUIT_MAX_M,
        }
    }
}

/// Hints for renderers. Not used by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingSettings {
    /// Pipe outer diameter in mm, used for stroke width
    pub pipe_diameter_mm: f64,
    /// Pixels per grid cell
    pub cell_size_px: f64,
    /// One color per circuit, reused cyclically
    pub zone_colors: Vec<String>,
    pub length_unit: LengthUnit,
}

impl Default for RenderingSettings {
    fn default() -> Self {
        Self {
            pipe_diameter_mm: 16.0,
            cell_size_px: 10.0,
            zone_colors: ["#e6194b", "#3cb44b", "#4363d8", "#f58231", "#911eb4", "#46f0f0"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            length_unit: LengthUnit::Meters,
        }
    }
}

impl RenderingSettings {
    /// Color for circuit `index`.
    pub fn zone_color(&self, index: usize) -> &str {
        if self.zone_colors.is_empty() {
            return "#000000";
        }
        &self.zone_colors[index % self.zone_colors.len()]
    }
}

/// Complete configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub generation: GenerationSettings,
    pub zoning: ZoningSettings,
    pub rendering: RenderingSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config dir>/heatloop/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| SettingsError::ConfigDirectory("no config directory".to_string()))?;
        path.push("heatloop");
        path.push("config.toml");
        Ok(path)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Like [`load_from_file`](Self::load_from_file) but returns defaults
    /// when the file does not exist.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML), creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => self.to_toml_string()?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e)))?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }

    pub fn to_toml_string(&self) -> SettingsResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;

        let g = &self.generation;
        if !positive(g.grid_resolution_m) {
            return Err(SettingsError::invalid(
                "generation.grid_resolution_m",
                "must be > 0",
            ));
        }
        if g.loop_spacing == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "generation.loop_spacing".to_string(),
                value: g.loop_spacing.to_string(),
            }
            .into());
        }
        if g.max_pipe_length_m.is_some_and(|m| !positive(m)) {
            return Err(SettingsError::invalid(
                "generation.max_pipe_length_m",
                "must be > 0",
            ));
        }

        if !positive(self.zoning.max_circuit_length_m) {
            return Err(SettingsError::invalid(
                "zoning.max_circuit_length_m",
                "must be > 0",
            ));
        }

        let r = &self.rendering;
        if !positive(r.pipe_diameter_mm) || !positive(r.cell_size_px) {
            return Err(SettingsError::invalid(
                "rendering",
                "pipe diameter and cell size must be > 0",
            ));
        }
        if r.zone_colors.is_empty() {
            return Err(SettingsError::invalid(
                "rendering.zone_colors",
                "at least one color is required",
            ));
        }

        Ok(())
    }

    /// Engine options from the generation defaults plus manifold points.
    pub fn generation_options(
        &self,
        start: Option<GridPoint>,
        end: Option<GridPoint>,
    ) -> GenerationOptions {
        let g = &self.generation;
        GenerationOptions {
            grid_resolution_m: g.grid_resolution_m,
            loop_spacing: g.loop_spacing,
            start_point: start,
            end_point: end,
            max_pipe_length_m: g.max_pipe_length_m,
            strategy: g.strategy,
            close_loop: g.close_loop,
        }
    }
}
