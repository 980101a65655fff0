//! Per-tick signal codes of one signal group within one program

use super::signal_program::ProgramPhase;
use super::types::SignalCode;

/// Signal codes of one signal group for every tick of a program
///
/// Ticks that were never assigned stay `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    signals: Vec<Option<SignalCode>>,
    phases: Vec<Option<ProgramPhase>>,
}

impl Sequence {
    /// An unset sequence covering `duration` ticks
    pub fn new(duration: usize) -> Self {
        Self {
            signals: vec![None; duration],
            phases: vec![None; duration],
        }
    }

    /// A sequence with every tick set and no phase references
    pub fn from_codes(codes: &[SignalCode]) -> Self {
        Self {
            signals: codes.iter().copied().map(Some).collect(),
            phases: vec![None; codes.len()],
        }
    }

    /// Assign the code and phase of a tick; ticks past the end are ignored
    pub fn set(&mut self, tick: usize, code: SignalCode, phase: Option<ProgramPhase>) {
        if let (Some(signal), Some(slot)) = (self.signals.get_mut(tick), self.phases.get_mut(tick)) {
            *signal = Some(code);
            *slot = phase;
        }
    }

    pub fn signal_at(&self, tick: usize) -> Option<SignalCode> {
        self.signals.get(tick).copied().flatten()
    }

    pub fn phase_at(&self, tick: usize) -> Option<&ProgramPhase> {
        self.phases.get(tick).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// True if no tick is left unset
    pub fn is_complete(&self) -> bool {
        self.signals.iter().all(Option::is_some)
    }
}
