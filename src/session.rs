use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Test mode. Only `Time` puts a ceiling on the clock.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    Time,
    Words,
    Quote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub mode: Mode,
    /// Seconds for `Time`, word count for `Words`; informational otherwise.
    pub mode_option: u32,
}

impl SessionConfig {
    pub fn new(mode: Mode, mode_option: u32) -> Self {
        Self { mode, mode_option }
    }

    /// Clock ceiling in seconds, if this mode is time-bounded.
    pub fn ceiling(&self) -> Option<u32> {
        match self.mode {
            Mode::Time => Some(self.mode_option),
            Mode::Words | Mode::Quote => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Completed,
}
