//! Energy flux onset detection
//!
//! Detects onsets by finding peaks in the frame-by-frame energy derivative.
//!
//! Algorithm:
//! 1. Divide audio into overlapping frames (frame_size, hop_size)
//! 2. Compute RMS energy per frame
//! 3. Compute half-wave rectified flux: `E_flux[n] = max(0, E[n] - E[n-1])`
//! 4. Keep local maxima above a threshold relative to the strongest flux
//!
//! In speech each voiced syllable nucleus produces one energy attack, so the
//! onset count is a usable syllable estimate without any acoustic model.
//!
//! # Reference
//!
//! Bello, J. P., Daudet, L., Abdallah, S., Duxbury, C., Davies, M., & Sandler, M. B. (2005).
//! A Tutorial on Onset Detection in Music Signals.
//! *IEEE Transactions on Speech and Audio Processing*, 13(5), 1035-1047.

use crate::error::AnalysisError;

/// Numerical stability epsilon
const EPSILON: f32 = 1e-10;

/// Detect onsets using the energy flux method
///
/// # Arguments
///
/// * `samples` - Audio samples (mono, normalized to [-1.0, 1.0])
/// * `frame_size` - Frame size for analysis (typically 1024 for speech)
/// * `hop_size` - Hop size between frames (typically 256 for speech)
/// * `threshold_db` - Threshold in dB relative to maximum flux (typically -20 dB)
///
/// # Returns
///
/// Onset positions in samples, on hop boundaries and at least two hops apart
///
/// # Errors
///
/// Returns `AnalysisError::ProcessingError` if `frame_size` or `hop_size` is 0
///
/// # Example
///
/// ```
/// use prosody_coach::features::onset::detect_energy_flux_onsets;
///
/// let mut samples = vec![0.0f32; 16000];
/// for s in samples[8000..].iter_mut() {
///     *s = 0.5;
/// }
/// let onsets = detect_energy_flux_onsets(&samples, 1024, 256, -20.0)?;
/// assert_eq!(onsets.len(), 1);
/// # Ok::<(), prosody_coach::AnalysisError>(())
/// ```
pub fn detect_energy_flux_onsets(
    samples: &[f32],
    frame_size: usize,
    hop_size: usize,
    threshold_db: f32,
) -> Result<Vec<usize>, AnalysisError> {
    if frame_size == 0 || hop_size == 0 {
        return Err(AnalysisError::ProcessingError(format!(
            "Invalid onset framing: frame={}, hop={}",
            frame_size, hop_size
        )));
    }

    if samples.len() < frame_size {
        log::warn!(
            "Frame size ({}) larger than audio length ({}), returning empty onsets",
            frame_size,
            samples.len()
        );
        return Ok(Vec::new());
    }

    log::debug!(
        "Detecting energy flux onsets: {} samples, frame={}, hop={}, threshold={:.1} dB",
        samples.len(),
        frame_size,
        hop_size,
        threshold_db
    );

    let num_frames = (samples.len() - frame_size) / hop_size + 1;
    if num_frames < 2 {
        return Ok(Vec::new());
    }

    let frame_energies: Vec<f32> = (0..num_frames)
        .map(|i| {
            let frame = &samples[i * hop_size..i * hop_size + frame_size];
            let sum_sq: f32 = frame.iter().map(|&x| x * x).sum();
            (sum_sq / frame_size as f32).sqrt()
        })
        .collect();

    // flux[i] is the rise from frame i to frame i + 1
    let energy_flux: Vec<f32> = frame_energies
        .windows(2)
        .map(|w| (w[1] - w[0]).max(0.0))
        .collect();

    let max_flux = energy_flux.iter().copied().fold(0.0f32, f32::max);
    if max_flux <= EPSILON {
        log::debug!("All energy flux values are zero, no onsets detected");
        return Ok(Vec::new());
    }

    let threshold_linear = max_flux * 10.0_f32.powf(threshold_db / 20.0);

    log::debug!(
        "Energy flux: max={:.6}, threshold={:.6} ({:.1} dB)",
        max_flux,
        threshold_linear,
        threshold_db
    );

    let last = energy_flux.len() - 1;
    let mut onsets: Vec<usize> = Vec::new();

    for (i, &flux) in energy_flux.iter().enumerate() {
        if flux <= threshold_linear {
            continue;
        }
        // Strict rise on the left, plateau allowed on the right
        let rises = i == 0 || flux > energy_flux[i - 1];
        let holds = i == last || flux >= energy_flux[i + 1];
        if !(rises && holds) {
            continue;
        }

        // The attack lands at the start of frame i + 1
        let onset_sample = (i + 1) * hop_size;
        if onset_sample >= samples.len() {
            continue;
        }

        onsets.push(onset_sample);
    }

    log::debug!("Energy flux detected {} onsets", onsets.len());

    Ok(onsets)
}
