//! Recommendation engine
//!
//! Ordered rule groups; each group contributes at most one piece of advice,
//! taking the most severe matching case. The filler and pace groups always
//! speak, the others only when something stands out.

use super::fillers::FillerWord;
use super::messages::Advice;
use super::metrics::ProsodyMetrics;
use super::scoring::{rate_per_minute, AnalysisScores};
use crate::config::{Locale, ScoringThresholds};

/// Select advice for one analysis, in presentation order
pub fn select_advice(
    metrics: &ProsodyMetrics,
    fillers: &[FillerWord],
    duration_seconds: f32,
    scores: &AnalysisScores,
    t: &ScoringThresholds,
) -> Vec<Advice> {
    let filler_rate = rate_per_minute(fillers.len(), duration_seconds);
    let pause_rate = rate_per_minute(metrics.pause_count as usize, duration_seconds);
    let count = fillers.len();

    let filler_advice = if filler_rate > t.filler_rate_moderate {
        Advice::FillersSevere { count, rate: filler_rate }
    } else if filler_rate > t.filler_rate_good {
        Advice::FillersModerate { count, rate: filler_rate }
    } else if filler_rate > t.filler_rate_excellent {
        Advice::FillersGood { count }
    } else {
        Advice::FillersExcellent
    };

    let wpm = metrics.speech_rate_wpm;
    let rate = wpm as f32;
    let min = t.optimal_wpm_min.round() as u32;
    let max = t.optimal_wpm_max.round() as u32;
    let pace_advice = if rate < t.slow_wpm_threshold {
        Advice::PaceVerySlow { wpm, min, max }
    } else if rate < t.optimal_wpm_min {
        Advice::PaceSlow { wpm, min, max }
    } else if rate > t.fast_wpm_threshold {
        Advice::PaceVeryFast { wpm, min, max }
    } else if rate > t.optimal_wpm_max {
        Advice::PaceFast { wpm }
    } else {
        Advice::PaceOptimal { wpm }
    };

    let pitch_advice = if metrics.pitch_std > t.pitch_std_high {
        Some(Advice::PitchUnstable)
    } else if metrics.pitch_std < t.pitch_std_low {
        Some(Advice::PitchFlat)
    } else {
        None
    };

    let energy_advice = if metrics.energy_variance < t.energy_flat_threshold {
        Some(Advice::EnergyMonotone)
    } else if metrics.energy_variance > t.energy_erratic_threshold {
        Some(Advice::EnergyErratic)
    } else {
        None
    };

    let pause_advice = (pause_rate > t.excessive_pause_rate).then_some(Advice::PausesExcessive {
        count: metrics.pause_count,
    });

    let confidence_advice = if scores.confidence < t.low_confidence_score {
        Some(Advice::ConfidenceLow)
    } else if scores.confidence >= t.high_score {
        Some(Advice::ConfidenceHigh)
    } else {
        None
    };

    let clarity_advice = (scores.clarity >= t.high_score).then_some(Advice::ClarityHigh);

    [
        Some(filler_advice),
        Some(pace_advice),
        pitch_advice,
        energy_advice,
        pause_advice,
        confidence_advice,
        clarity_advice,
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Render the selected advice as strings in `locale`
pub fn generate_recommendations(
    metrics: &ProsodyMetrics,
    fillers: &[FillerWord],
    duration_seconds: f32,
    scores: &AnalysisScores,
    thresholds: &ScoringThresholds,
    locale: Locale,
) -> Vec<String> {
    let advice = select_advice(metrics, fillers, duration_seconds, scores, thresholds);
    log::debug!("Selected {} recommendations: {:?}", advice.len(), advice);
    advice.iter().map(|a| a.render(locale)).collect()
}
