//! Continuous bifilar outline in meters.
//!
//! A coarse counterflow centreline for a rectangular area, computed directly
//! from the wall boundaries instead of a grid. The supply run spirals inward
//! at twice the pipe spacing, leaving the gaps for the return run.

use crate::error::{LayoutError, LayoutResult};
use heatloop_core::{Point, EPSILON};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Heading {
    Right,
    Down,
    Left,
    Up,
}

impl Heading {
    fn turn(self) -> Self {
        match self {
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
            Self::Up => Self::Right,
        }
    }
}

struct Bounds {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl Bounds {
    fn is_open(&self) -> bool {
        self.min_x < self.max_x && self.min_y < self.max_y
    }

    fn crossed(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }
}

/// Generates the outline for a `width_m x length_m` area with pipes
/// `spacing_m` apart.
///
/// Returns an empty path when two spacings do not fit across either side.
pub fn generate_bifilar_outline(
    width_m: f64,
    length_m: f64,
    spacing_m: f64,
) -> LayoutResult<Vec<Point>> {
    if !(width_m.is_finite() && width_m > 0.0 && length_m.is_finite() && length_m > 0.0) {
        return Err(LayoutError::InvalidDimensions {
            width: width_m,
            length: length_m,
            resolution: spacing_m,
        });
    }
    if !(spacing_m.is_finite() && spacing_m > 0.0) {
        return Err(LayoutError::parameter(
            "spacing_m",
            format!("must be positive, got {}", spacing_m),
        ));
    }
    let double = spacing_m * 2.0;
    if double > width_m || double > length_m {
        return Ok(Vec::new());
    }

    let half = spacing_m / 2.0;
    let mut bounds = Bounds {
        min_x: half,
        max_x: width_m - half,
        min_y: half,
        max_y: length_m - half,
    };
    let mut current = Point::new(bounds.min_x, bounds.min_y);
    let mut path = vec![current];
    let mut heading = Heading::Right;

    loop {
        // The open check only applies between full laps.
        if heading == Heading::Right && !bounds.is_open() {
            break;
        }
        match heading {
            Heading::Right => {
                if current.x < bounds.max_x {
                    current.x = bounds.max_x;
                    path.push(current);
                }
                bounds.min_y += double;
            }
            Heading::Down => {
                if current.y < bounds.max_y {
                    current.y = bounds.max_y;
                    path.push(current);
                }
                bounds.max_x -= double;
            }
            Heading::Left => {
                if current.x > bounds.min_x {
                    current.x = bounds.min_x;
                    path.push(current);
                }
                bounds.max_y -= double;
            }
            Heading::Up => {
                if current.y > bounds.min_y {
                    current.y = bounds.min_y;
                    path.push(current);
                }
                bounds.min_x += double;
            }
        }
        if bounds.crossed() {
            break;
        }
        heading = heading.turn();
    }

    if let Some(stub) = inward_stub(&path, spacing_m) {
        path.push(stub);
    }
    Ok(path)
}

/// A final point one spacing inward from the last run, when that run was
/// longer than one spacing.
fn inward_stub(path: &[Point], spacing: f64) -> Option<Point> {
    let [.., prev, last] = path else {
        return None;
    };
    let (dx, dy) = (last.x - prev.x, last.y - prev.y);
    if dy.abs() < EPSILON && dx.abs() > spacing + EPSILON {
        // Along the top heading right turns down; along the bottom heading left turns up.
        let y = if dx > 0.0 { last.y + spacing } else { last.y - spacing };
        Some(Point::new(last.x, y))
    } else if dx.abs() < EPSILON && dy.abs() > spacing + EPSILON {
        let x = if dy > 0.0 { last.x - spacing } else { last.x + spacing };
        Some(Point::new(x, last.y))
    } else {
        None
    }
}
