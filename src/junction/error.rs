//! Error taxonomy for the junction engine

use std::fmt;

use super::types::{GridPosition, SignalCode};

/// Result alias used throughout the junction engine
pub type Result<T> = std::result::Result<T, JunctionError>;

/// Lane layouts rejected by leg validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneConflict {
    /// A straight+left+right lane shares its leg with other lanes
    AllDirectionsNotAlone,
    /// A left+right lane shares its leg with other lanes
    LeftRightNotAlone,
    /// More than two pure left lanes
    TooManyLeftOnly,
    /// More than two pure right lanes
    TooManyRightOnly,
}

impl fmt::Display for LaneConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaneConflict::AllDirectionsNotAlone => {
                write!(f, "a straight-left-right lane has to be the only lane of its leg")
            }
            LaneConflict::LeftRightNotAlone => {
                write!(f, "a left-right lane has to be the only lane of its leg")
            }
            LaneConflict::TooManyLeftOnly => write!(f, "there can be only 2 pure left lanes"),
            LaneConflict::TooManyRightOnly => write!(f, "there can be only 2 pure right lanes"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum JunctionError {
    #[error("Angle has to be a number between 0 and 359, was {0}")]
    InvalidAngle(i64),
    #[error("Angle addition has to be a non-negative number, was {0}")]
    NegativeAngleDelta(i64),
    #[error("Leg {leg} failed validation: {conflict}")]
    LegValidation { leg: String, conflict: LaneConflict },
    #[error("Lane operation rejected: {0}")]
    LaneOperation(String),
    #[error("Infrastructure element not found: {0}")]
    ElementNotFound(String),
    #[error("Unknown signal number {code:?} at tick {tick}")]
    UnknownSignalNumber {
        code: Option<SignalCode>,
        tick: usize,
    },
    #[error("Grid position {0} is already occupied")]
    OccupiedGridPosition(GridPosition),
    #[error("No valid routes in situation")]
    NoValidRoutes,
    #[error("Sequence covers {actual} ticks, program needs {expected}")]
    SequenceLength { expected: usize, actual: usize },
}
