//! Period estimation
//!
//! Converts an onset train into tempo candidates via FFT autocorrelation.

pub mod autocorrelation;

/// BPM candidate with confidence
#[derive(Debug, Clone, PartialEq)]
pub struct BpmCandidate {
    /// BPM estimate
    pub bpm: f32,

    /// Confidence score (0.0-1.0)
    pub confidence: f32,
}
