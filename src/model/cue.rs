//! Timed caption cue.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A timed text fragment with a stable sequence number.
///
/// Field names serialize in camelCase (`startTime`, `endTime`) to match the
/// cue arrays produced by caption parsers.
///
/// # Invariants
/// - Within a store, cues are ascending by `start_time`.
/// - `sequence` is unique and is the externally visible index.
/// - `end_time >= start_time`.
///
/// None of these are validated; a violation shows up as wrong resolution
/// output, never as a panic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cue {
    /// Externally visible index of this cue.
    pub sequence: u32,
    /// Start of the cue interval in milliseconds.
    pub start_time: u64,
    /// End of the cue interval in milliseconds (inclusive).
    pub end_time: u64,
    /// Caption text. May contain the literal `\n` paragraph marker.
    pub text: String,
}

impl Cue {
    /// Create a new cue.
    pub fn new(sequence: u32, start_time: u64, end_time: u64, text: impl Into<String>) -> Self {
        Self {
            sequence,
            start_time,
            end_time,
            text: text.into(),
        }
    }

    /// Whether `time` falls inside `[start_time, end_time]`.
    pub fn contains(&self, time: u64) -> bool {
        self.start_time <= time && time <= self.end_time
    }

    /// Playback position to seek to when this cue is selected.
    pub fn start(&self) -> Duration {
        Duration::from_millis(self.start_time)
    }
}
