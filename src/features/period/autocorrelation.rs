//! Autocorrelation-based tempo estimation
//!
//! Finds periodicity in the onset train using FFT-accelerated autocorrelation.
//!
//! # Algorithm
//!
//! 1. Convert onset list to a binary frame signal
//! 2. Compute autocorrelation using FFT acceleration: `ACF = IFFT(|FFT(signal)|²)`
//! 3. Find peaks in the ACF inside the lag range of `[min_bpm, max_bpm]`
//! 4. Convert lag values to BPM: `BPM = (60 * sample_rate) / (lag * hop_size)`
//!
//! # Reference
//!
//! Ellis, D. P. W., & Pikrakis, A. (2006). Real-time Beat Induction.
//! *Proceedings of the International Conference on Music Information Retrieval*.

use super::BpmCandidate;
use crate::error::AnalysisError;
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

const EPSILON: f32 = 1e-10;

/// Minimum peak prominence as a fraction of the highest in-range ACF value
const MIN_PROMINENCE_RATIO: f32 = 0.1;

/// Peaks below this fraction of the zero-lag value are FFT noise, not periodicity
const MIN_PERIODICITY_RATIO: f32 = 0.05;

/// Estimate BPM candidates from onset periodicity
///
/// # Arguments
///
/// * `onsets` - Onset times in samples
/// * `sample_rate` - Sample rate in Hz
/// * `hop_size` - Hop size used for onset detection (samples per frame)
/// * `min_bpm` - Minimum BPM to consider
/// * `max_bpm` - Maximum BPM to consider
///
/// # Returns
///
/// BPM candidates ranked by confidence (highest first). Fewer than two
/// onsets, or no periodicity inside the range, gives an empty list.
///
/// # Errors
///
/// Returns `AnalysisError::ProcessingError` for a zero sample rate, zero hop
/// size, or an empty/inverted BPM range.
///
/// # Example
///
/// ```
/// use prosody_coach::features::period::autocorrelation::estimate_bpm_from_autocorrelation;
///
/// // One onset every 32 frames of 256 samples at 16 kHz
/// let onsets: Vec<usize> = (0..12).map(|k| k * 32 * 256).collect();
/// let candidates = estimate_bpm_from_autocorrelation(&onsets, 16000, 256, 60.0, 180.0)?;
/// assert!((candidates[0].bpm - 117.19).abs() < 0.1);
/// # Ok::<(), prosody_coach::AnalysisError>(())
/// ```
pub fn estimate_bpm_from_autocorrelation(
    onsets: &[usize],
    sample_rate: u32,
    hop_size: usize,
    min_bpm: f32,
    max_bpm: f32,
) -> Result<Vec<BpmCandidate>, AnalysisError> {
    log::debug!(
        "Estimating BPM from autocorrelation: {} onsets, {} Hz, hop={}, range=[{:.1}, {:.1}] BPM",
        onsets.len(),
        sample_rate,
        hop_size,
        min_bpm,
        max_bpm
    );

    if sample_rate == 0 {
        return Err(AnalysisError::ProcessingError(
            "Invalid sample rate: 0".to_string(),
        ));
    }

    if hop_size == 0 {
        return Err(AnalysisError::ProcessingError(
            "Invalid hop size: 0".to_string(),
        ));
    }

    if min_bpm <= 0.0 || min_bpm >= max_bpm {
        return Err(AnalysisError::ProcessingError(format!(
            "Invalid BPM range: [{:.1}, {:.1}]",
            min_bpm, max_bpm
        )));
    }

    if onsets.len() < 2 {
        log::debug!("Too few onsets for autocorrelation: {}", onsets.len());
        return Ok(Vec::new());
    }

    let signal_length = onsets.iter().max().copied().unwrap_or(0) / hop_size + 1;
    let mut onset_signal = vec![0.0f32; signal_length];
    for &onset_sample in onsets {
        onset_signal[onset_sample / hop_size] = 1.0;
    }

    let acf = compute_autocorrelation_fft(&onset_signal);

    // lag = (60 * sample_rate) / (BPM * hop_size)
    let frames_per_minute = 60.0 * sample_rate as f32 / hop_size as f32;
    let lag_min = (frames_per_minute / max_bpm).ceil() as usize;
    let lag_max = (frames_per_minute / min_bpm).floor() as usize;

    if lag_min == 0 || lag_min >= lag_max || lag_max >= acf.len() {
        log::debug!(
            "Lag range [{}, {}] does not fit ACF of length {}",
            lag_min,
            lag_max,
            acf.len()
        );
        return Ok(Vec::new());
    }

    // Include one lag either side so the range edges can still be local maxima
    let search_start = lag_min - 1;
    let search_end = (lag_max + 1).min(acf.len() - 1);
    let peaks = find_peaks_in_acf(&acf[search_start..=search_end], search_start);

    let max_in_range = acf[lag_min..=lag_max].iter().copied().fold(0.0f32, f32::max);
    let periodicity_floor = acf[0] * MIN_PERIODICITY_RATIO;

    let mut candidates: Vec<BpmCandidate> = peaks
        .into_iter()
        .filter(|&(lag, value)| lag >= lag_min && lag <= lag_max && value >= periodicity_floor)
        .map(|(lag, value)| BpmCandidate {
            bpm: frames_per_minute / lag as f32,
            confidence: if max_in_range > EPSILON {
                (value / max_in_range).min(1.0)
            } else {
                0.0
            },
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    log::debug!("Autocorrelation found {} BPM candidates", candidates.len());

    Ok(candidates)
}

/// Compute autocorrelation using FFT acceleration
///
/// Uses the identity: ACF = IFFT(|FFT(signal)|²), zero-padded to avoid
/// circular wrap-around.
fn compute_autocorrelation_fft(signal: &[f32]) -> Vec<f32> {
    let n = signal.len();
    let fft_size = (2 * n).next_power_of_two();

    let mut buffer: Vec<Complex<f32>> = signal.iter().map(|&x| Complex::new(x, 0.0)).collect();
    buffer.resize(fft_size, Complex::new(0.0, 0.0));

    let mut planner = FftPlanner::new();
    planner.plan_fft_forward(fft_size).process(&mut buffer);

    for x in buffer.iter_mut() {
        *x = *x * x.conj();
    }

    planner.plan_fft_inverse(fft_size).process(&mut buffer);

    let scale = 1.0 / fft_size as f32;
    buffer[..n].iter().map(|x| (x.re * scale).max(0.0)).collect()
}

/// Find strict local maxima with minimum prominence
///
/// Returns `(lag, value)` pairs where `lag = index + offset`.
fn find_peaks_in_acf(acf_slice: &[f32], offset: usize) -> Vec<(usize, f32)> {
    if acf_slice.len() < 3 {
        return Vec::new();
    }

    let max_value = acf_slice.iter().copied().fold(0.0f32, f32::max);
    if max_value < EPSILON {
        return Vec::new();
    }
    let min_prominence = max_value * MIN_PROMINENCE_RATIO;

    acf_slice
        .windows(3)
        .enumerate()
        .filter_map(|(i, w)| {
            let value = w[1];
            let is_peak = value > w[0] && value > w[2];
            let prominence = value - w[0].max(w[2]);
            (is_peak && prominence >= min_prominence).then_some((i + 1 + offset, value))
        })
        .collect()
}
