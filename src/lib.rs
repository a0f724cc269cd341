//! # Prosody Coach
//!
//! A speech delivery analysis engine for public-speaking practice, turning a
//! recorded utterance into prosodic measurements, coaching scores, timeline
//! markers and actionable recommendations.
//!
//! ## Features
//!
//! - **Prosody**: pitch statistics, tempo, pauses, energy variation and
//!   speaking rate from plain DSP (no acoustic model)
//! - **Scoring**: confidence, clarity, pacing and nervousness on a 0-10 scale,
//!   built from named rule tables
//! - **Semantic fusion**: optional content scores from a language model blend
//!   into confidence and clarity
//! - **Explainability**: filler and pause markers plus localized advice
//!   (English and Spanish)
//!
//! ## Quick Start
//!
//! ```no_run
//! use prosody_coach::{analyze_speech, AnalysisConfig, TranscriptInput};
//!
//! // Load audio samples (mono, f32, normalized)
//! let samples: Vec<f32> = vec![]; // Your audio data
//! let sample_rate = 16000;
//!
//! let result = analyze_speech(
//!     &samples,
//!     sample_rate,
//!     &TranscriptInput::default(),
//!     &AnalysisConfig::default(),
//! )?;
//!
//! println!("Pace: {} WPM (score {:.1})", result.metrics.speech_rate_wpm, result.scores.pacing);
//! for tip in &result.recommendations {
//!     println!("- {}", tip);
//! }
//! # Ok::<(), prosody_coach::AnalysisError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Waveform → Feature Extraction → ProsodyMetrics ┐
//!                      Fillers + Semantic scores ┴→ Scoring → Markers → Advice
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod io;
pub mod preprocessing;

// Re-export main types
pub use analysis::fillers::FillerWord;
pub use analysis::input::TranscriptInput;
pub use analysis::markers::{MarkerType, Severity, TimelineMarker};
pub use analysis::metrics::{analyze_prosody, ProsodyMetrics};
pub use analysis::result::{AnalysisFlag, AnalysisMetadata, CoachingReport, SpeechAnalysis};
pub use analysis::scoring::AnalysisScores;
pub use analysis::semantic::{FusionMode, SemanticAnalysis};
pub use config::{AnalysisConfig, Locale};
pub use error::AnalysisError;
pub use io::Waveform;

use analysis::fillers::sanitize_fillers;
use analysis::markers::generate_markers;
use analysis::recommendations::generate_recommendations;
use analysis::scoring::compute_scores;

/// Score, annotate and advise from precomputed metrics
///
/// Pure function of its arguments: the same inputs always give the same
/// report. Malformed filler records are dropped before they reach the
/// rates, markers or advice.
///
/// # Arguments
///
/// * `metrics` - Prosodic measurements
/// * `fillers` - Filler records, possibly unsanitized
/// * `duration_seconds` - Audio duration, for per-minute rates
/// * `semantic` - Optional content scores; `None` means acoustic-only
/// * `config` - Thresholds, marker parameters and locale
///
/// # Example
///
/// ```
/// use prosody_coach::{generate_report, AnalysisConfig, ProsodyMetrics};
///
/// let metrics = ProsodyMetrics {
///     pitch_mean: 150.0,
///     pitch_std: 30.0,
///     tempo_bpm: 100.0,
///     pause_count: 0,
///     pause_locations: vec![],
///     energy_variance: 0.35,
///     speech_rate_wpm: 135,
/// };
/// let report = generate_report(&metrics, &[], 60.0, None, &AnalysisConfig::default());
/// assert_eq!(report.scores.pacing, 10.0);
/// assert_eq!(report.scores.nervousness, 0.0);
/// ```
pub fn generate_report(
    metrics: &ProsodyMetrics,
    fillers: &[FillerWord],
    duration_seconds: f32,
    semantic: Option<&SemanticAnalysis>,
    config: &AnalysisConfig,
) -> CoachingReport {
    let (fillers, _) = sanitize_fillers(fillers);
    let fillers = fillers.as_slice();

    let (scores, fusion) = compute_scores(
        metrics,
        fillers,
        duration_seconds,
        semantic,
        &config.scoring,
    );
    let timeline_markers = generate_markers(
        metrics,
        fillers,
        duration_seconds,
        &config.markers,
        config.locale,
    );
    let recommendations = generate_recommendations(
        metrics,
        fillers,
        duration_seconds,
        &scores,
        &config.scoring,
        config.locale,
    );

    CoachingReport {
        scores,
        timeline_markers,
        recommendations,
        fusion,
    }
}

/// Main analysis function
///
/// Extracts prosody from the samples, then scores, annotates and advises.
///
/// # Arguments
///
/// * `samples` - Mono audio samples, normalized to [-1.0, 1.0]
/// * `sample_rate` - Sample rate in Hz (typically 16000 for speech)
/// * `input` - Fillers, transcript and semantic scores from collaborators
/// * `config` - Analysis configuration parameters
///
/// # Errors
///
/// - `AnalysisError::InvalidConfig` if `config` fails validation
/// - `AnalysisError::InvalidAudio` for empty samples, a zero sample rate or
///   non-finite samples
///
/// Silent or very short audio is not an error; it yields zero metrics.
///
/// # Example
///
/// ```
/// use prosody_coach::{analyze_speech, AnalysisConfig, TranscriptInput};
///
/// let samples = vec![0.0f32; 16000 * 3]; // 3 seconds of silence
/// let result = analyze_speech(&samples, 16000, &TranscriptInput::default(), &AnalysisConfig::default())?;
/// assert_eq!(result.metrics.speech_rate_wpm, 0);
/// # Ok::<(), prosody_coach::AnalysisError>(())
/// ```
pub fn analyze_speech(
    samples: &[f32],
    sample_rate: u32,
    input: &TranscriptInput,
    config: &AnalysisConfig,
) -> Result<SpeechAnalysis, AnalysisError> {
    use std::time::Instant;
    let start_time = Instant::now();

    log::debug!(
        "Starting speech analysis: {} samples at {} Hz, {} fillers, semantic={}, locale={}",
        samples.len(),
        sample_rate,
        input.fillers.len(),
        input.semantic.is_some(),
        config.locale.code()
    );

    config.validate()?;
    let waveform = Waveform::new(samples, sample_rate)?;
    let duration_seconds = waveform.duration_seconds();

    let metrics = analyze_prosody(&waveform, &config.prosody)?;

    let (fillers, dropped_filler_count) = sanitize_fillers(&input.fillers);
    if input.semantic.is_none() {
        log::debug!("No semantic scores supplied, using acoustic-only scoring");
    }

    let report = generate_report(
        &metrics,
        &fillers,
        duration_seconds,
        input.semantic.as_ref(),
        config,
    );

    let processing_time_ms = start_time.elapsed().as_secs_f32() * 1000.0;
    let flags = AnalysisFlag::collect(&metrics, dropped_filler_count);

    log::debug!(
        "Speech analysis finished in {:.1} ms ({} markers, {} recommendations)",
        processing_time_ms,
        report.timeline_markers.len(),
        report.recommendations.len()
    );

    Ok(SpeechAnalysis {
        metrics,
        scores: report.scores,
        timeline_markers: report.timeline_markers,
        recommendations: report.recommendations,
        filler_words: fillers,
        duration_seconds,
        fusion: report.fusion,
        transcription: input.transcription.clone(),
        metadata: AnalysisMetadata {
            sample_rate,
            processing_time_ms,
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            locale: config.locale,
            dropped_filler_count,
            flags,
        },
    })
}

/// One utterance in a batch
#[derive(Debug, Clone, Copy)]
pub struct AnalysisRequest<'a> {
    /// Mono audio samples
    pub samples: &'a [f32],
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Collaborator inputs for this utterance
    pub input: &'a TranscriptInput,
}

/// Analyze independent utterances, keeping request order
///
/// With the `parallel` feature (on by default) requests run on the rayon
/// thread pool; otherwise they run sequentially. One failing request does
/// not affect the others.
pub fn analyze_batch(
    requests: &[AnalysisRequest<'_>],
    config: &AnalysisConfig,
) -> Vec<Result<SpeechAnalysis, AnalysisError>> {
    log::debug!("Analyzing batch of {} utterances", requests.len());

    let run = |req: &AnalysisRequest<'_>| {
        analyze_speech(req.samples, req.sample_rate, req.input, config)
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        requests.par_iter().map(run).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        requests.iter().map(run).collect()
    }
}
