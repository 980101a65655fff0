//! Compression of per-tick signal sequences into timed phases
//!
//! A new phase starts at every tick where any sequence changes its signal
//! code. The phase that is still running when the program ends is left open
//! unless [`TrailingPhase::Close`] is requested.

use log::{debug, info};
use std::collections::BTreeMap;

use super::error::{JunctionError, Result};
use super::sequence::Sequence;
use super::signal_program::ProgramPhase;
use super::types::SignalCode;

/// Conventional signal letters used when no table is configured
pub const DEFAULT_SIGNAL_LETTERS: [(SignalCode, char); 7] = [
    (1, 'r'), // red
    (2, 'u'), // red-amber
    (3, 'G'), // green
    (4, 'y'), // amber
    (5, 'g'), // permissive green
    (6, 'o'), // flashing amber
    (7, 'O'), // off
];

/// A compressed phase: a state string held for `duration` ticks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedPhase {
    /// Sequential id in emission order
    pub id: usize,
    pub duration: usize,
    /// One signal letter per controlled lane connection
    pub state: String,
    /// Program phase active just before the boundary that closed this phase
    pub source: Option<ProgramPhase>,
}

/// What happens to the phase still running when the program ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingPhase {
    /// Not emitted; only phases closed by a signal change are returned
    #[default]
    Open,
    /// Emitted with the remaining ticks as duration
    Close,
}

/// Renders the signal state of all sequences at one tick
pub trait StateRenderer {
    /// One character per entry of `sequences`
    fn render(&self, tick: usize, sequences: &[&Sequence]) -> Result<String>;
}

/// Renderer mapping signal codes to letters through a lookup table
#[derive(Debug, Clone)]
pub struct SignalLetterRenderer {
    letters: BTreeMap<SignalCode, char>,
}

impl SignalLetterRenderer {
    pub fn new(letters: impl IntoIterator<Item = (SignalCode, char)>) -> Self {
        Self {
            letters: letters.into_iter().collect(),
        }
    }

    pub fn letter(&self, code: SignalCode) -> Option<char> {
        self.letters.get(&code).copied()
    }
}

impl Default for SignalLetterRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_SIGNAL_LETTERS)
    }
}

impl StateRenderer for SignalLetterRenderer {
    fn render(&self, tick: usize, sequences: &[&Sequence]) -> Result<String> {
        sequences
            .iter()
            .map(|sequence| {
                let code = sequence.signal_at(tick);
                code.and_then(|code| self.letter(code))
                    .ok_or(JunctionError::UnknownSignalNumber { code, tick })
            })
            .collect()
    }
}

/// Result of a compression run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Compression {
    pub phases: Vec<TimedPhase>,
    /// Tick where the phase left open at the end of the program starts
    ///
    /// `None` when the trailing phase was closed or the program is empty.
    pub open_phase_start: Option<usize>,
}

impl Compression {
    /// Sum of all emitted phase durations
    pub fn total_duration(&self) -> usize {
        self.phases.iter().map(|phase| phase.duration).sum()
    }
}

/// Compresses sequences into timed phases
pub struct PhaseCompressor<'a, R: StateRenderer> {
    renderer: &'a R,
    trailing: TrailingPhase,
}

impl<'a, R: StateRenderer> PhaseCompressor<'a, R> {
    pub fn new(renderer: &'a R, trailing: TrailingPhase) -> Self {
        Self { renderer, trailing }
    }

    pub fn trailing(&self) -> TrailingPhase {
        self.trailing
    }

    /// Compress `sequences` over a program of `duration` ticks
    pub fn compress(&self, sequences: &[&Sequence], duration: usize) -> Result<Compression> {
        if let Some(short) = sequences.iter().find(|sequence| sequence.len() < duration) {
            return Err(JunctionError::SequenceLength {
                expected: duration,
                actual: short.len(),
            });
        }
        if duration == 0 {
            return Ok(Compression::default());
        }

        let mut phases = Vec::new();
        let mut phase_start = 0;
        let mut state = self.renderer.render(0, sequences)?;

        for tick in 1..duration {
            let mut boundary = false;
            let mut source = None;
            for sequence in sequences {
                if sequence.signal_at(tick) != sequence.signal_at(tick - 1) {
                    boundary = true;
                    source = sequence.phase_at(tick - 1).copied();
                }
            }

            if boundary {
                debug!("Phase boundary at tick {}: {}", tick, state);
                phases.push(TimedPhase {
                    id: phases.len(),
                    duration: tick - phase_start,
                    state,
                    source,
                });
                phase_start = tick;
                state = self.renderer.render(tick, sequences)?;
            }
        }

        let open_phase_start = match self.trailing {
            TrailingPhase::Open => Some(phase_start),
            TrailingPhase::Close => {
                let source = sequences
                    .iter()
                    .rev()
                    .find_map(|sequence| sequence.phase_at(duration - 1))
                    .copied();
                phases.push(TimedPhase {
                    id: phases.len(),
                    duration: duration - phase_start,
                    state,
                    source,
                });
                None
            }
        };

        info!(
            "Compressed {} ticks of {} sequences into {} phases",
            duration,
            sequences.len(),
            phases.len()
        );

        Ok(Compression {
            phases,
            open_phase_start,
        })
    }
}
