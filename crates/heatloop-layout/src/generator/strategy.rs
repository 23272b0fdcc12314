//! Candidate sequences for the routing strategies.
//!
//! A strategy only decides the order in which cells are proposed. Bounds,
//! obstacles, revisits and the length cap are enforced by the path builder,
//! so these walkers emit raw coordinates, including blocked cells.

use heatloop_core::GridPoint;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Routing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Serpentine rows, alternating direction.
    #[serde(alias = "snake")]
    Boustrophedon,
    /// One spiral from the walls inward.
    #[serde(alias = "singleSpiral")]
    SingleSpiral,
    /// Interleaved supply and return spirals (counterflow).
    #[default]
    #[serde(alias = "doubleSpiral", alias = "counterflow")]
    DoubleSpiral,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::Boustrophedon,
        Strategy::SingleSpiral,
        Strategy::DoubleSpiral,
    ];

    /// Loop spacing that suits the strategy when none is configured.
    pub fn recommended_loop_spacing(self) -> u32 {
        match self {
            Self::Boustrophedon | Self::SingleSpiral => 1,
            Self::DoubleSpiral => 2,
        }
    }

    /// Raw candidate cells for a `cols x rows` grid.
    pub(crate) fn candidates(self, cols: usize, rows: usize, spacing: u32) -> Vec<GridPoint> {
        let cols = cols as i32;
        let rows = rows as i32;
        let spacing = spacing.max(1) as i32;
        match self {
            Self::Boustrophedon => boustrophedon(cols, rows, spacing),
            Self::SingleSpiral => spiral_laps(cols, rows, 0, spacing),
            Self::DoubleSpiral => double_spiral(cols, rows, spacing),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boustrophedon => write!(f, "boustrophedon"),
            Self::SingleSpiral => write!(f, "single_spiral"),
            Self::DoubleSpiral => write!(f, "double_spiral"),
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "boustrophedon" | "snake" => Ok(Self::Boustrophedon),
            "single_spiral" | "singlespiral" | "spiral" => Ok(Self::SingleSpiral),
            "double_spiral" | "doublespiral" | "counterflow" => Ok(Self::DoubleSpiral),
            _ => Err(format!("Unknown strategy: {}", s)),
        }
    }
}

/// Rows `0, s, 2s, ...`, left to right on even steps and right to left on odd.
fn boustrophedon(cols: i32, rows: i32, spacing: i32) -> Vec<GridPoint> {
    let mut out = Vec::new();
    for (step, y) in (0..rows).step_by(spacing as usize).enumerate() {
        if step % 2 == 0 {
            out.extend((0..cols).map(|x| GridPoint::new(x, y)));
        } else {
            out.extend((0..cols).rev().map(|x| GridPoint::new(x, y)));
        }
    }
    out
}

/// One lap around the rectangle `left..=right` x `top..=bottom`: right along
/// the top, down the right side, left along the bottom, up the left side.
fn walk_lap(out: &mut Vec<GridPoint>, left: i32, right: i32, top: i32, bottom: i32) {
    out.extend((left..=right).map(|x| GridPoint::new(x, top)));
    out.extend((top + 1..=bottom).map(|y| GridPoint::new(right, y)));
    if bottom > top {
        out.extend((left..right).rev().map(|x| GridPoint::new(x, bottom)));
    }
    if right > left {
        out.extend((top + 1..bottom).rev().map(|y| GridPoint::new(left, y)));
    }
}

/// Concentric laps starting `inset` cells from the walls, each lap `step`
/// cells inside the previous one, until the boundaries cross.
fn spiral_laps(cols: i32, rows: i32, inset: i32, step: i32) -> Vec<GridPoint> {
    let mut out = Vec::new();
    let (mut left, mut right) = (inset, cols - 1 - inset);
    let (mut top, mut bottom) = (inset, rows - 1 - inset);
    while left <= right && top <= bottom {
        walk_lap(&mut out, left, right, top, bottom);
        left += step;
        right -= step;
        top += step;
        bottom -= step;
    }
    out
}

/// Supply laps at insets `0, 2s, 4s, ...` and return laps at `s, 3s, ...`.
///
/// The return sequence is reversed (innermost lap first, walked backwards)
/// and alternated point by point with the supply sequence.
fn double_spiral(cols: i32, rows: i32, spacing: i32) -> Vec<GridPoint> {
    let lap_step = spacing * 2;
    let supply = spiral_laps(cols, rows, 0, lap_step);
    let mut ret = spiral_laps(cols, rows, lap_step / 2, lap_step);
    ret.reverse();

    let mut out = Vec::with_capacity(supply.len() + ret.len());
    let mut supply = supply.into_iter();
    let mut ret = ret.into_iter();
    loop {
        match (supply.next(), ret.next()) {
            (None, None) => break,
            (s, r) => out.extend(s.into_iter().chain(r)),
        }
    }
    out
}
