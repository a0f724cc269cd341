//! Short-time RMS framing
//!
//! Frames are centered: frame `i` covers samples
//! `[i * hop - frame_size / 2, i * hop + frame_size / 2)` with zeros outside
//! the signal, so a signal of `n` samples yields `1 + n / hop` frames and
//! frame `i` is timestamped at sample `i * hop`.

use crate::error::AnalysisError;

/// Compute centered short-time RMS energy
///
/// # Arguments
///
/// * `samples` - Audio samples (mono)
/// * `frame_size` - Frame length in samples (typically 2048)
/// * `hop_size` - Hop between frame centers (typically 512)
///
/// # Returns
///
/// One RMS value per frame. Empty input gives an empty vector.
///
/// # Errors
///
/// Returns `AnalysisError::ProcessingError` if `frame_size` or `hop_size` is 0
pub fn frame_rms(
    samples: &[f32],
    frame_size: usize,
    hop_size: usize,
) -> Result<Vec<f32>, AnalysisError> {
    if frame_size == 0 || hop_size == 0 {
        return Err(AnalysisError::ProcessingError(format!(
            "Invalid framing: frame={}, hop={}",
            frame_size, hop_size
        )));
    }

    if samples.is_empty() {
        return Ok(Vec::new());
    }

    let num_frames = 1 + samples.len() / hop_size;
    let half = frame_size / 2;
    let mut rms = Vec::with_capacity(num_frames);

    for i in 0..num_frames {
        let center = i * hop_size;
        // Window start may fall before the signal; those samples are zero padding
        let start = center.saturating_sub(half);
        let end = (center + frame_size - half).min(samples.len());

        let sum_sq: f32 = if start < end {
            samples[start..end].iter().map(|&x| x * x).sum()
        } else {
            0.0
        };

        rms.push((sum_sq / frame_size as f32).sqrt());
    }

    log::debug!(
        "Framed {} samples into {} RMS frames (frame={}, hop={})",
        samples.len(),
        rms.len(),
        frame_size,
        hop_size
    );

    Ok(rms)
}
