//! Length unit utilities
//!
//! Pipe lengths are computed in meters. These helpers format and parse them
//! for people who order tubing by the foot.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const METERS_PER_FOOT: f64 = 0.3048;

/// Display unit for pipe lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Meters (m)
    #[default]
    Meters,
    /// Feet (ft)
    Feet,
}

impl LengthUnit {
    /// Short label ("m" or "ft")
    pub fn label(self) -> &'static str {
        match self {
            Self::Meters => "m",
            Self::Feet => "ft",
        }
    }

    /// Converts a value in meters into this unit.
    pub fn from_meters(self, meters: f64) -> f64 {
        match self {
            Self::Meters => meters,
            Self::Feet => meters / METERS_PER_FOOT,
        }
    }

    /// Converts a value in this unit into meters.
    pub fn to_meters(self, value: f64) -> f64 {
        match self {
            Self::Meters => value,
            Self::Feet => value * METERS_PER_FOOT,
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Meters => write!(f, "Meters"),
            Self::Feet => write!(f, "Feet"),
        }
    }
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "meters" | "metres" | "m" => Ok(Self::Meters),
            "feet" | "foot" | "ft" => Ok(Self::Feet),
            _ => Err(format!("Unknown length unit: {}", s)),
        }
    }
}

/// Format a length for display, e.g. `"12.35 m"`.
///
/// * `meters` - Value in meters
/// * `unit` - Target unit
pub fn format_length(meters: f64, unit: LengthUnit) -> String {
    format!("{:.2} {}", unit.from_meters(meters), unit.label())
}

/// Parse a length string in the given unit to meters.
///
/// A trailing unit label (`"30 ft"`, `"12m"`) overrides `unit`.
pub fn parse_length(input: &str, unit: LengthUnit) -> Result<f64, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty length".to_string());
    }

    let split = input
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(input.len());
    let (number, label) = input.split_at(split);
    let unit = if label.trim().is_empty() {
        unit
    } else {
        label.trim().parse::<LengthUnit>()?
    };

    let value = number.trim().parse::<f64>().map_err(|e| e.to_string())?;
    Ok(unit.to_meters(value))
}
