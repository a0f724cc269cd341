//! Global tempo estimate
//!
//! A single BPM value for the whole utterance, taken from the strongest
//! autocorrelation peak of the onset train. No banding and no outlier
//! rejection: in speech this is a proxy for rhythmic regularity, not a
//! musical tempo.

use super::period::autocorrelation::estimate_bpm_from_autocorrelation;
use crate::error::AnalysisError;

/// Estimate the tempo of an onset train
///
/// # Arguments
///
/// * `onsets` - Onset times in samples, as produced by the onset detector
/// * `sample_rate` - Sample rate in Hz
/// * `hop_size` - Hop size the onsets were detected with
/// * `min_bpm` / `max_bpm` - Search range
///
/// # Returns
///
/// BPM of the best candidate, or `0.0` when there is no periodicity to
/// measure (fewer than two onsets, or no peak in range)
pub fn estimate_tempo(
    onsets: &[usize],
    sample_rate: u32,
    hop_size: usize,
    min_bpm: f32,
    max_bpm: f32,
) -> Result<f32, AnalysisError> {
    let candidates =
        estimate_bpm_from_autocorrelation(onsets, sample_rate, hop_size, min_bpm, max_bpm)?;

    let bpm = candidates.first().map_or(0.0, |c| c.bpm);

    if candidates.is_empty() {
        log::debug!("No tempo candidates, tempo falls back to zero");
    } else {
        log::debug!(
            "Tempo: {:.1} BPM (best of {} candidates)",
            bpm,
            candidates.len()
        );
    }

    Ok(bpm)
}
