//! Planar coordinates used for generated geometry

use std::fmt;

use super::angle::Angle;

/// Components closer to zero than this are stored as exactly 0.0
pub const SNAP_EPSILON: f64 = 0.01;

/// A point in the plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    x: f64,
    y: f64,
}

impl Coordinates {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: snap_to_zero(x),
            y: snap_to_zero(y),
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Move the point `distance` units in the direction of `angle`
    ///
    /// Angle 0 points towards negative y, 90 towards negative x.
    pub fn move_by_distance(&self, angle: Angle, distance: f64) -> Coordinates {
        let radians = angle.to_radians();
        Coordinates::new(
            self.x - distance * radians.sin(),
            self.y - distance * radians.cos(),
        )
    }

    pub fn distance(&self, other: &Coordinates) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint(&self, other: &Coordinates) -> Coordinates {
        Coordinates::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl Default for Coordinates {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.x, self.y)
    }
}

fn snap_to_zero(value: f64) -> f64 {
    if value < SNAP_EPSILON && value > -SNAP_EPSILON {
        0.0
    } else {
        value
    }
}
