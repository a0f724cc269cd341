//! Filler-word records supplied by the transcription collaborator

use serde::{Deserialize, Serialize};

/// A disfluency ("um", "uh", "like") located in the audio timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillerWord {
    /// The filler as transcribed
    pub word: String,

    /// Start time in seconds
    pub start: f32,

    /// End time in seconds
    pub end: f32,

    /// Recognizer confidence in [0, 1]
    pub confidence: f32,
}

impl FillerWord {
    /// Create a filler record
    pub fn new(word: impl Into<String>, start: f32, end: f32, confidence: f32) -> Self {
        Self {
            word: word.into(),
            start,
            end,
            confidence,
        }
    }

    /// Non-empty word, finite non-inverted timestamps, confidence in [0, 1]
    pub fn is_well_formed(&self) -> bool {
        !self.word.trim().is_empty()
            && self.start.is_finite()
            && self.end.is_finite()
            && self.start >= 0.0
            && self.end >= self.start
            && (0.0..=1.0).contains(&self.confidence)
    }
}

/// Drop malformed filler records
///
/// Records failing [`FillerWord::is_well_formed`] are removed before
/// scoring so they never reach rates, markers or advice.
///
/// # Returns
///
/// The kept fillers in input order, and how many were dropped
pub fn sanitize_fillers(fillers: &[FillerWord]) -> (Vec<FillerWord>, usize) {
    let kept: Vec<FillerWord> = fillers
        .iter()
        .filter(|f| f.is_well_formed())
        .cloned()
        .collect();

    let dropped = fillers.len() - kept.len();
    if dropped > 0 {
        log::warn!("Dropped {} malformed filler records", dropped);
    }

    (kept, dropped)
}
