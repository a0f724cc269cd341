//! Prosody aggregation
//!
//! Runs every feature extractor over one waveform and packs the results into
//! a single immutable `ProsodyMetrics` record.

use crate::config::ProsodyConfig;
use crate::error::AnalysisError;
use crate::features::energy::analyze_energy;
use crate::features::onset::detect_energy_flux_onsets;
use crate::features::pauses::detect_pauses;
use crate::features::pitch::PitchTracker;
use crate::features::speech_rate::estimate_speech_rate;
use crate::features::tempo::estimate_tempo;
use crate::io::Waveform;
use crate::preprocessing::silence::SilenceDetector;
use serde::{Deserialize, Serialize};

/// Prosodic measurements for one utterance
///
/// Invariants: `pause_locations.len() == pause_count as usize`, locations
/// ascend, and every value is finite and non-negative. Degenerate input
/// (silence, very short audio) yields zeros rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProsodyMetrics {
    /// Mean F0 over voiced frames, in Hz
    pub pitch_mean: f32,

    /// Standard deviation of F0 over voiced frames, in Hz
    pub pitch_std: f32,

    /// Global tempo estimate, in BPM
    pub tempo_bpm: f32,

    /// Number of pauses of at least the minimum pause duration
    pub pause_count: u32,

    /// Pause start times in seconds, ascending
    pub pause_locations: Vec<f32>,

    /// Standard deviation of peak-normalized RMS energy
    pub energy_variance: f32,

    /// Estimated words per minute
    pub speech_rate_wpm: u32,
}

/// Extract all prosodic features from a waveform
///
/// # Arguments
///
/// * `waveform` - Validated mono signal
/// * `config` - Feature extraction parameters
///
/// # Errors
///
/// Returns `AnalysisError::ProcessingError` if a DSP stage rejects the
/// configured framing. Quiet or silent audio is not an error.
///
/// # Example
///
/// ```
/// use prosody_coach::analysis::metrics::analyze_prosody;
/// use prosody_coach::config::ProsodyConfig;
/// use prosody_coach::io::Waveform;
///
/// let samples = vec![0.0f32; 16000 * 2];
/// let waveform = Waveform::new(&samples, 16000)?;
/// let metrics = analyze_prosody(&waveform, &ProsodyConfig::default())?;
/// assert_eq!(metrics.pitch_mean, 0.0);
/// assert_eq!(metrics.speech_rate_wpm, 0);
/// # Ok::<(), prosody_coach::AnalysisError>(())
/// ```
pub fn analyze_prosody(
    waveform: &Waveform<'_>,
    config: &ProsodyConfig,
) -> Result<ProsodyMetrics, AnalysisError> {
    let samples = waveform.samples();
    let sample_rate = waveform.sample_rate();

    log::debug!(
        "Analyzing prosody: {} samples at {} Hz ({:.2}s)",
        samples.len(),
        sample_rate,
        waveform.duration_seconds()
    );

    let pitch = PitchTracker {
        fmin: config.pitch_fmin,
        fmax: config.pitch_fmax,
        frame_size: config.frame_size,
        hop_size: config.hop_size,
        peak_ratio: config.pitch_peak_ratio,
    }
    .track(samples, sample_rate)?;

    let onsets = detect_energy_flux_onsets(
        samples,
        config.onset_frame_size,
        config.onset_hop_size,
        config.onset_threshold_db,
    )?;

    let tempo_bpm = estimate_tempo(
        &onsets,
        sample_rate,
        config.onset_hop_size,
        config.min_bpm,
        config.max_bpm,
    )?;

    let silence = SilenceDetector {
        top_db: config.silence_top_db,
        frame_size: config.frame_size,
        hop_size: config.hop_size,
    };
    let (pause_count, pause_locations) =
        detect_pauses(samples, sample_rate, &silence, config.min_pause_duration)?;

    let energy_variance = analyze_energy(samples, config.frame_size, config.hop_size)?;

    let speech_rate_wpm = estimate_speech_rate(
        onsets.len(),
        waveform.duration_seconds(),
        pause_count,
        config.min_pause_duration,
        config.syllables_per_word,
    );

    let metrics = ProsodyMetrics {
        pitch_mean: finite_or_zero(pitch.mean),
        pitch_std: finite_or_zero(pitch.std),
        tempo_bpm: finite_or_zero(tempo_bpm),
        pause_count,
        pause_locations,
        energy_variance: finite_or_zero(energy_variance),
        speech_rate_wpm,
    };

    log::debug!(
        "Prosody: pitch={:.1}±{:.1} Hz, tempo={:.1} BPM, pauses={}, energy={:.3}, rate={} WPM",
        metrics.pitch_mean,
        metrics.pitch_std,
        metrics.tempo_bpm,
        metrics.pause_count,
        metrics.energy_variance,
        metrics.speech_rate_wpm
    );

    Ok(metrics)
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
