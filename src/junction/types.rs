//! Core identifier types for the junction engine
//!
//! Small wrappers that keep the different kinds of ids apart.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw signal code as it appears in a signal program sequence
pub type SignalCode = i32;

/// Suffix appended to a leg id to name the edge entering the intersection
pub const INCOMING_EDGE_SUFFIX: &str = "si";

/// Suffix appended to a leg id to name the edge leaving the intersection
pub const OUTGOING_EDGE_SUFFIX: &str = "o";

/// A wrapper type for intersection IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IntersectionId(pub u32);

/// Position of a leg inside its intersection's angle-ordered leg list
///
/// Adjacency between legs is stored as these indices, never as owned legs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LegIndex(pub usize);

/// A wrapper type for signal group IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SignalGroupId(pub u32);

/// A wrapper type for lane IDs (dense within a signal group)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LaneId(pub u32);

/// A wrapper type for signal program IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProgramId(pub u32);

impl fmt::Display for IntersectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for SignalGroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for LaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cell of the editing grid an intersection is placed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell in the given direction
    pub fn neighbour(&self, direction: GridDirection) -> GridPosition {
        match direction {
            GridDirection::Bottom => GridPosition::new(self.x, self.y - 1),
            GridDirection::Left => GridPosition::new(self.x - 1, self.y),
            GridDirection::Top => GridPosition::new(self.x, self.y + 1),
            GridDirection::Right => GridPosition::new(self.x + 1, self.y),
        }
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Direction from one grid cell to a neighbouring one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridDirection {
    Bottom,
    Left,
    Top,
    Right,
}

impl GridDirection {
    /// Every direction, in the order neighbours are visited
    pub const ALL: [GridDirection; 4] = [
        GridDirection::Bottom,
        GridDirection::Left,
        GridDirection::Top,
        GridDirection::Right,
    ];
}
