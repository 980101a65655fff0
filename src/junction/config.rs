//! Engine configuration loaded from TOML

use serde::{Deserialize, Serialize};

use super::phase::{SignalLetterRenderer, TrailingPhase, DEFAULT_SIGNAL_LETTERS};
use super::types::SignalCode;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Error parsing TOML: {0}")]
    TomlParsing(#[from] toml::de::Error),
    #[error("Error serializing TOML: {0}")]
    TomlSerializing(#[from] toml::ser::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Letter emitted for one signal code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalLetter {
    pub code: SignalCode,
    pub letter: char,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Distance between the centres of neighbouring grid cells
    pub distance_between_intersections: f64,
    /// Distance from an intersection's centre to the start of its legs
    pub leg_length: f64,
    /// Emit the phase still running when a program ends
    pub close_final_phase: bool,
    pub signal_letters: Vec<SignalLetter>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            distance_between_intersections: 500.0,
            leg_length: 50.0,
            close_final_phase: false,
            signal_letters: DEFAULT_SIGNAL_LETTERS
                .iter()
                .map(|&(code, letter)| SignalLetter { code, letter })
                .collect(),
        }
    }
}

impl Config {
    pub fn load(data: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(data)?)
    }

    pub fn load_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        Self::load(&std::fs::read_to_string(path)?)
    }

    pub fn dump(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    pub fn trailing_phase(&self) -> TrailingPhase {
        if self.close_final_phase {
            TrailingPhase::Close
        } else {
            TrailingPhase::Open
        }
    }

    pub fn renderer(&self) -> SignalLetterRenderer {
        SignalLetterRenderer::new(
            self.signal_letters
                .iter()
                .map(|signal| (signal.code, signal.letter)),
        )
    }
}
