//! Intersection topology and signal phase derivation
//!
//! This module contains the core of the engine: turn resolution between the
//! legs of an intersection, lane validation and editing, and the compression
//! of signal sequences into timed phases. It does no I/O apart from the
//! layout and configuration loaders.

mod angle;
mod config;
mod coordinates;
mod directions;
mod error;
mod intersection;
mod lane;
mod lane_operation;
mod layout;
mod leg;
mod phase;
mod sequence;
mod signal_group;
mod signal_program;
mod situation;
mod turns;
mod types;

pub use angle::{Angle, FULL_TURN};
pub use config::{Config, ConfigError, SignalLetter};
pub use coordinates::{Coordinates, SNAP_EPSILON};
pub use directions::Directions;
pub use error::{JunctionError, LaneConflict, Result};
pub use intersection::{Intersection, LEG_ORDER_START};
pub use lane::Lane;
pub use lane_operation::LaneOperation;
pub use layout::{load_situation, parse_situation, LayoutFile};
pub use leg::{Leg, MAX_SINGLE_TURN_LANES};
pub use phase::{
    Compression, PhaseCompressor, SignalLetterRenderer, StateRenderer, TimedPhase, TrailingPhase,
    DEFAULT_SIGNAL_LETTERS,
};
pub use sequence::Sequence;
pub use signal_group::{Detector, SignalGroup, Signalisation};
pub use signal_program::{ProgramPhase, SignalProgram};
pub use situation::{Flow, IntersectionConnection, LaneGraph, LegRef, Situation, ValidRoute};
pub use turns::{left_most, resolve_turns, right_most, TurnResolution, TurnSlot, Turns};
pub use types::{
    GridDirection, GridPosition, IntersectionId, LaneId, LegIndex, ProgramId, SignalCode,
    SignalGroupId, INCOMING_EDGE_SUFFIX, OUTGOING_EDGE_SUFFIX,
};
