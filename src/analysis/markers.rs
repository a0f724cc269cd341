//! Timeline markers
//!
//! Visual annotations over the audio timeline: one marker per filler word
//! and one per detected pause.

use super::fillers::FillerWord;
use super::messages;
use super::metrics::ProsodyMetrics;
use super::scoring::rate_per_minute;
use crate::config::{Locale, MarkerConfig};
use serde::{Deserialize, Serialize};

/// Marker category
///
/// Only `Filler` and `Pause` are emitted; the rest are reserved for
/// presentation layers that annotate segments themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerType {
    /// Filler word
    Filler,
    /// Long pause
    Pause,
    /// Segment spoken too fast
    Fast,
    /// Segment spoken too slowly
    Slow,
    /// Confident segment
    Confident,
    /// Nervous segment
    Nervous,
}

impl MarkerType {
    /// Display color token for this marker type
    pub fn color(&self) -> &'static str {
        match self {
            MarkerType::Filler => "#FFB800",
            MarkerType::Pause => "#FF6B6B",
            MarkerType::Fast => "#FF8C42",
            MarkerType::Slow => "#4ECDC4",
            MarkerType::Confident => "#95E1D3",
            MarkerType::Nervous => "#F38181",
        }
    }
}

/// How strongly a marker should be highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational
    Low,
    /// Worth attention
    Medium,
    /// Needs work
    High,
}

/// An annotated span of the audio timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineMarker {
    /// Start time in seconds
    pub start: f32,
    /// End time in seconds (`>= start`)
    pub end: f32,
    /// Marker category
    #[serde(rename = "type")]
    pub marker_type: MarkerType,
    /// Highlight strength
    pub severity: Severity,
    /// Color token keyed by `marker_type`
    pub color: String,
    /// Short caption
    pub label: String,
    /// Explanation shown on hover
    pub reason: String,
}

impl TimelineMarker {
    fn new(
        start: f32,
        end: f32,
        marker_type: MarkerType,
        severity: Severity,
        label: String,
        reason: String,
    ) -> Self {
        Self {
            start,
            end,
            marker_type,
            severity,
            color: marker_type.color().to_string(),
            label,
            reason,
        }
    }
}

/// Severity of every filler marker, from the overall filler rate
pub fn filler_severity(filler_rate: f32, config: &MarkerConfig) -> Severity {
    if filler_rate > config.filler_rate_high {
        Severity::High
    } else if filler_rate > config.filler_rate_medium {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Severity of every pause marker, from the total pause count
pub fn pause_severity(pause_count: u32, config: &MarkerConfig) -> Severity {
    if pause_count > config.excessive_pause_count {
        Severity::High
    } else if pause_count > config.excessive_pause_count / 2 {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Build filler and pause markers, stable-sorted by start time
///
/// Markers with equal start keep generation order: fillers first, then
/// pauses. Overlapping markers are not merged.
pub fn generate_markers(
    metrics: &ProsodyMetrics,
    fillers: &[FillerWord],
    duration_seconds: f32,
    config: &MarkerConfig,
    locale: Locale,
) -> Vec<TimelineMarker> {
    let filler_rate = rate_per_minute(fillers.len(), duration_seconds);
    let filler_level = filler_severity(filler_rate, config);
    let pause_level = pause_severity(metrics.pause_count, config);

    let filler_markers = fillers.iter().map(|filler| {
        TimelineMarker::new(
            filler.start,
            filler.end,
            MarkerType::Filler,
            filler_level,
            messages::filler_label(locale, &filler.word),
            messages::filler_reason(locale, filler.confidence, filler_rate),
        )
    });

    let pause_markers = metrics.pause_locations.iter().map(|&start| {
        TimelineMarker::new(
            start,
            start + config.long_pause_duration,
            MarkerType::Pause,
            pause_level,
            messages::pause_label(locale),
            messages::pause_reason(locale, start, metrics.pause_count),
        )
    });

    let mut markers: Vec<TimelineMarker> = filler_markers.chain(pause_markers).collect();
    markers.sort_by(|a, b| a.start.total_cmp(&b.start));

    log::debug!(
        "Generated {} timeline markers ({} fillers, {} pauses)",
        markers.len(),
        fillers.len(),
        metrics.pause_locations.len()
    );

    markers
}
