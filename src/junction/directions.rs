//! Turning movements permitted for a lane, signal group or leg

use serde::{Deserialize, Serialize};
use std::fmt;

/// A subset of {straight, left, right, back}
///
/// Lanes are ordered by [`Directions::sorting_index`]; the same index also
/// classifies how many turns a lane serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Directions {
    pub straight: bool,
    pub left: bool,
    pub right: bool,
    pub back: bool,
}

impl Directions {
    pub const NONE: Directions = Directions::new(false, false, false, false);

    pub const fn new(straight: bool, left: bool, right: bool, back: bool) -> Self {
        Self {
            straight,
            left,
            right,
            back,
        }
    }

    pub const fn straight_left_right() -> Self {
        Self::new(true, true, true, false)
    }

    pub const fn straight_only() -> Self {
        Self::new(true, false, false, false)
    }

    pub const fn left_only() -> Self {
        Self::new(false, true, false, false)
    }

    pub const fn right_only() -> Self {
        Self::new(false, false, true, false)
    }

    pub fn is_straight_left_right(&self) -> bool {
        self.straight && self.left && self.right
    }

    pub fn is_straight_left(&self) -> bool {
        self.straight && self.left
    }

    pub fn is_straight_right(&self) -> bool {
        self.straight && self.right
    }

    pub fn is_left_only(&self) -> bool {
        self.left && !self.straight && !self.right
    }

    pub fn is_right_only(&self) -> bool {
        self.right && !self.straight && !self.left
    }

    pub fn is_left_right_only(&self) -> bool {
        self.left && self.right && !self.straight
    }

    /// True if neither straight, left nor right is permitted
    pub fn has_no_direction(&self) -> bool {
        !self.straight && !self.left && !self.right
    }

    /// Number of outgoing connections a lane with these directions produces
    pub fn connections_count(&self) -> usize {
        if self.is_straight_left_right() {
            3
        } else if self.is_straight_left() || self.is_straight_right() {
            2
        } else {
            1
        }
    }

    /// Priority used to order lanes from the leftmost to the rightmost
    pub fn sorting_index(&self) -> u8 {
        if self.is_straight_left_right() {
            6
        } else if self.is_left_only() {
            1
        } else if self.is_straight_left() {
            2
        } else if self.straight && !self.right {
            3
        } else if self.is_straight_right() {
            4
        } else if self.is_right_only() {
            5
        } else {
            0
        }
    }

    /// Union of both sets of movements
    pub fn merged(&self, other: &Directions) -> Directions {
        Directions::new(
            self.straight || other.straight,
            self.left || other.left,
            self.right || other.right,
            self.back || other.back,
        )
    }
}

impl fmt::Display for Directions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = [
            (self.straight, 'S'),
            (self.left, 'L'),
            (self.right, 'R'),
            (self.back, 'B'),
        ];
        let mut any = false;
        for (set, letter) in flags {
            if set {
                write!(f, "{}", letter)?;
                any = true;
            }
        }
        if !any {
            write!(f, "-")?;
        }
        Ok(())
    }
}
