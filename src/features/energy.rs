//! Energy variation
//!
//! Peak-normalized short-time RMS, summarized by its standard deviation.
//! Higher values mean more volume variation; values near zero mean a
//! monotone delivery.

use crate::error::AnalysisError;
use crate::preprocessing::framing::frame_rms;

/// Added to the peak before normalizing so silence divides cleanly
const PEAK_EPSILON: f32 = 1e-6;

/// Compute the energy variance scalar
///
/// # Arguments
///
/// * `samples` - Audio samples (mono)
/// * `frame_size` - RMS frame size (default: 2048)
/// * `hop_size` - RMS hop size (default: 512)
///
/// # Returns
///
/// Population standard deviation of `rms / (max(rms) + 1e-6)`; `0.0` for
/// silence or empty input
pub fn analyze_energy(
    samples: &[f32],
    frame_size: usize,
    hop_size: usize,
) -> Result<f32, AnalysisError> {
    let rms = frame_rms(samples, frame_size, hop_size)?;
    if rms.is_empty() {
        return Ok(0.0);
    }

    let peak = rms.iter().copied().fold(0.0f32, f32::max) + PEAK_EPSILON;
    let n = rms.len() as f32;
    let mean = rms.iter().map(|&r| r / peak).sum::<f32>() / n;
    let variance = rms
        .iter()
        .map(|&r| (r / peak - mean).powi(2))
        .sum::<f32>()
        / n;

    let energy_variance = variance.sqrt();
    log::debug!(
        "Energy variance {:.4} over {} frames",
        energy_variance,
        rms.len()
    );

    Ok(energy_variance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(n: usize, amp: f32) -> Vec<f32> {
        (0..n)
            .map(|i| amp * (2.0 * std::f32::consts::PI * 200.0 * i as f32 / 16000.0).sin())
            .collect()
    }

    #[test]
    fn test_silence_is_zero() {
        assert_eq!(analyze_energy(&vec![0.0; 16000], 2048, 512).unwrap(), 0.0);
    }

    #[test]
    fn test_steady_tone_is_flat() {
        let samples = tone(16000 * 4, 0.5);
        let variance = analyze_energy(&samples, 2048, 512).unwrap();
        assert!(variance < 0.1, "steady tone should be near monotone, got {:.3}", variance);
    }

    #[test]
    fn test_alternating_loudness_varies() {
        let mut samples = Vec::new();
        for k in 0..8 {
            let amp = if k % 2 == 0 { 0.8 } else { 0.1 };
            samples.extend(tone(8000, amp));
        }
        let variance = analyze_energy(&samples, 2048, 512).unwrap();
        assert!(variance > 0.3, "alternating loudness should vary, got {:.3}", variance);
    }

    #[test]
    fn test_scale_invariant() {
        let quiet = analyze_energy(&tone(32000, 0.05), 2048, 512).unwrap();
        let loud = analyze_energy(&tone(32000, 0.9), 2048, 512).unwrap();
        assert!((quiet - loud).abs() < 1e-3);
    }
}
