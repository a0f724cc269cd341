//! Analysis result types

use super::fillers::FillerWord;
use super::markers::TimelineMarker;
use super::metrics::ProsodyMetrics;
use super::scoring::AnalysisScores;
use super::semantic::FusionMode;
use crate::config::Locale;
use serde::{Deserialize, Serialize};

/// Conditions worth surfacing alongside the scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisFlag {
    /// No frame carried a usable pitch, so pitch statistics are zero
    NoVoicedFrames,
    /// No periodicity in the onset train, so tempo is zero
    NoRhythm,
    /// No speaking time or no syllables, so speech rate is zero
    NoSpeechDetected,
    /// Some filler records were malformed and ignored
    MalformedFillersDropped,
}

impl AnalysisFlag {
    /// Flags implied by a set of metrics and the filler sanitizer
    pub fn collect(metrics: &ProsodyMetrics, dropped_filler_count: usize) -> Vec<AnalysisFlag> {
        let mut flags = Vec::new();
        if metrics.pitch_mean == 0.0 {
            flags.push(AnalysisFlag::NoVoicedFrames);
        }
        if metrics.tempo_bpm == 0.0 {
            flags.push(AnalysisFlag::NoRhythm);
        }
        if metrics.speech_rate_wpm == 0 {
            flags.push(AnalysisFlag::NoSpeechDetected);
        }
        if dropped_filler_count > 0 {
            flags.push(AnalysisFlag::MalformedFillersDropped);
        }
        flags
    }
}

/// Analysis metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Processing time in milliseconds
    pub processing_time_ms: f32,

    /// Algorithm version
    pub algorithm_version: String,

    /// Locale the text was rendered in
    pub locale: Locale,

    /// Number of malformed filler records ignored
    pub dropped_filler_count: usize,

    /// Degenerate-input flags
    pub flags: Vec<AnalysisFlag>,
}

/// Post-metrics coaching output: scores, markers and advice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachingReport {
    /// The four coaching scores
    pub scores: AnalysisScores,

    /// Timeline markers, sorted by start
    pub timeline_markers: Vec<TimelineMarker>,

    /// Recommendations in presentation order
    pub recommendations: Vec<String>,

    /// Evidence the scores were fused from
    pub fusion: FusionMode,
}

/// Complete analysis of one utterance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechAnalysis {
    /// Prosodic measurements
    pub metrics: ProsodyMetrics,

    /// The four coaching scores
    pub scores: AnalysisScores,

    /// Timeline markers, sorted by start
    pub timeline_markers: Vec<TimelineMarker>,

    /// Recommendations in presentation order
    pub recommendations: Vec<String>,

    /// Sanitized filler records
    pub filler_words: Vec<FillerWord>,

    /// Audio duration in seconds
    pub duration_seconds: f32,

    /// Evidence the scores were fused from
    pub fusion: FusionMode,

    /// Transcript, when the caller supplied one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,

    /// Analysis metadata
    pub metadata: AnalysisMetadata,
}

impl SpeechAnalysis {
    /// The coaching portion of the analysis
    pub fn report(&self) -> CoachingReport {
        CoachingReport {
            scores: self.scores,
            timeline_markers: self.timeline_markers.clone(),
            recommendations: self.recommendations.clone(),
            fusion: self.fusion,
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, crate::AnalysisError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_metrics() -> ProsodyMetrics {
        ProsodyMetrics {
            pitch_mean: 0.0,
            pitch_std: 0.0,
            tempo_bpm: 0.0,
            pause_count: 0,
            pause_locations: vec![],
            energy_variance: 0.0,
            speech_rate_wpm: 0,
        }
    }

    #[test]
    fn test_flags_for_silence() {
        let flags = AnalysisFlag::collect(&zero_metrics(), 2);
        assert_eq!(
            flags,
            vec![
                AnalysisFlag::NoVoicedFrames,
                AnalysisFlag::NoRhythm,
                AnalysisFlag::NoSpeechDetected,
                AnalysisFlag::MalformedFillersDropped,
            ]
        );
    }

    #[test]
    fn test_flags_for_healthy_metrics() {
        let metrics = ProsodyMetrics {
            pitch_mean: 150.0,
            tempo_bpm: 100.0,
            speech_rate_wpm: 135,
            ..zero_metrics()
        };
        assert!(AnalysisFlag::collect(&metrics, 0).is_empty());
    }
}
