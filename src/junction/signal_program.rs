//! Signal programs and the phases they are authored with

use serde::{Deserialize, Serialize};

use super::phase::TimedPhase;
use super::types::ProgramId;

/// A phase of a signal program as authored, before compression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramPhase {
    pub id: u32,
    pub min_duration: u32,
    pub max_duration: u32,
}

/// A fixed-length signal program of an intersection
#[derive(Debug, Clone)]
pub struct SignalProgram {
    pub id: ProgramId,
    /// Name the program is exported under
    pub program_id: String,
    /// Length of the program in ticks
    pub duration: usize,
    pub activation_offset: u32,
    pub phases: Vec<ProgramPhase>,
    /// Result of the last compression run
    pub timed_phases: Vec<TimedPhase>,
}

impl SignalProgram {
    pub fn new(id: ProgramId, program_id: impl Into<String>, duration: usize) -> Self {
        Self {
            id,
            program_id: program_id.into(),
            duration,
            activation_offset: 0,
            phases: Vec::new(),
            timed_phases: Vec::new(),
        }
    }

    pub fn phase(&self, phase_id: u32) -> Option<&ProgramPhase> {
        self.phases.iter().find(|phase| phase.id == phase_id)
    }
}
