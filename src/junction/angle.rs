//! Circular integer angle in whole degrees

use std::fmt;

use super::error::{JunctionError, Result};

/// Number of whole degrees in a full turn
pub const FULL_TURN: u16 = 360;

/// An angle in [0, 360)
///
/// Construction never clamps: values outside the range are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Angle(u16);

impl Angle {
    pub fn new(value: i64) -> Result<Self> {
        if !(0..FULL_TURN as i64).contains(&value) {
            return Err(JunctionError::InvalidAngle(value));
        }
        Ok(Self(value as u16))
    }

    pub fn value(&self) -> u16 {
        self.0
    }

    /// Adds a non-negative number of degrees, wrapping around 360
    pub fn add(&self, delta: i64) -> Result<Angle> {
        if delta < 0 {
            return Err(JunctionError::NegativeAngleDelta(delta));
        }
        let wrapped = (self.0 as i64 + delta % FULL_TURN as i64) % FULL_TURN as i64;
        Ok(Angle(wrapped as u16))
    }

    /// The angle pointing the other way
    pub fn opposite(&self) -> Angle {
        Angle((self.0 + FULL_TURN / 2) % FULL_TURN)
    }

    /// One degree further counter-clockwise (increasing value)
    pub(crate) fn next(&self) -> Angle {
        Angle((self.0 + 1) % FULL_TURN)
    }

    /// One degree further clockwise (decreasing value)
    pub(crate) fn previous(&self) -> Angle {
        Angle((self.0 + FULL_TURN - 1) % FULL_TURN)
    }

    /// Whether the angle lies in the closed range [from, to]
    pub fn within(&self, from: u16, to: u16) -> bool {
        self.0 >= from && self.0 <= to
    }

    pub fn to_radians(&self) -> f64 {
        (self.0 as f64).to_radians()
    }
}

impl TryFrom<i64> for Angle {
    type Error = JunctionError;

    fn try_from(value: i64) -> Result<Self> {
        Angle::new(value)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}
