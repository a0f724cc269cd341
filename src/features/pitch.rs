//! Pitch (F0) tracking
//!
//! Short-time spectral peak picking inside the adult voice band.
//!
//! For each Hann-windowed STFT frame the bin with maximum magnitude between
//! `fmin` and `fmax` is selected and refined by parabolic interpolation.
//! Frames whose in-band peak is negligible, or weak compared to the frame's
//! strongest bin anywhere in the spectrum, are treated as unvoiced and
//! dropped. The tracker reports the mean and population standard deviation
//! of the surviving per-frame estimates.

use crate::error::AnalysisError;
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Numerical stability epsilon
const EPSILON: f32 = 1e-10;

/// Pitch statistics over the voiced frames of an utterance
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PitchStats {
    /// Mean F0 in Hz (0.0 when no frame is voiced)
    pub mean: f32,
    /// Population standard deviation of F0 in Hz
    pub std: f32,
    /// Number of voiced frames that contributed
    pub voiced_frames: usize,
}

/// Pitch tracker configuration
#[derive(Debug, Clone)]
pub struct PitchTracker {
    /// Lowest frequency considered, in Hz (default: 75.0)
    pub fmin: f32,

    /// Highest frequency considered, in Hz (default: 400.0)
    pub fmax: f32,

    /// STFT frame size (default: 2048)
    pub frame_size: usize,

    /// STFT hop size (default: 512)
    pub hop_size: usize,

    /// Minimum in-band peak relative to the frame's overall peak (default: 0.1)
    pub peak_ratio: f32,
}

impl Default for PitchTracker {
    fn default() -> Self {
        Self {
            fmin: 75.0,
            fmax: 400.0,
            frame_size: 2048,
            hop_size: 512,
            peak_ratio: 0.1,
        }
    }
}

impl PitchTracker {
    /// Estimate per-frame pitch and summarize it
    ///
    /// # Arguments
    ///
    /// * `samples` - Audio samples (mono)
    /// * `sample_rate` - Sample rate in Hz
    ///
    /// # Returns
    ///
    /// `PitchStats`; `(0.0, 0.0)` when no frame is voiced
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::ProcessingError` if the frame or hop size is 0
    ///
    /// # Example
    ///
    /// ```
    /// use prosody_coach::features::pitch::PitchTracker;
    ///
    /// let sr = 16000.0;
    /// let samples: Vec<f32> = (0..16000)
    ///     .map(|i| 0.5 * (2.0 * std::f32::consts::PI * 200.0 * i as f32 / sr).sin())
    ///     .collect();
    /// let stats = PitchTracker::default().track(&samples, 16000)?;
    /// assert!((stats.mean - 200.0).abs() < 5.0);
    /// # Ok::<(), prosody_coach::AnalysisError>(())
    /// ```
    pub fn track(&self, samples: &[f32], sample_rate: u32) -> Result<PitchStats, AnalysisError> {
        let estimates = self.frame_pitches(samples, sample_rate)?;

        if estimates.is_empty() {
            log::debug!("No voiced frames detected, pitch falls back to zero");
            return Ok(PitchStats::default());
        }

        let n = estimates.len() as f32;
        let mean = estimates.iter().sum::<f32>() / n;
        let variance = estimates.iter().map(|&p| (p - mean).powi(2)).sum::<f32>() / n;

        let stats = PitchStats {
            mean,
            std: variance.sqrt(),
            voiced_frames: estimates.len(),
        };

        log::debug!(
            "Pitch: mean={:.1} Hz, std={:.1} Hz over {} voiced frames",
            stats.mean,
            stats.std,
            stats.voiced_frames
        );

        Ok(stats)
    }

    /// Per-frame F0 estimates for voiced frames only
    pub fn frame_pitches(
        &self,
        samples: &[f32],
        sample_rate: u32,
    ) -> Result<Vec<f32>, AnalysisError> {
        if self.frame_size < 4 || self.hop_size == 0 {
            return Err(AnalysisError::ProcessingError(format!(
                "Invalid STFT framing: frame={}, hop={}",
                self.frame_size, self.hop_size
            )));
        }

        if samples.is_empty() || sample_rate == 0 {
            return Ok(Vec::new());
        }

        let bin_hz = sample_rate as f32 / self.frame_size as f32;
        let nyquist_bin = self.frame_size / 2;
        // Keep one bin of headroom on both sides for interpolation
        let bin_min = ((self.fmin / bin_hz).ceil() as usize).max(1);
        let bin_max = ((self.fmax / bin_hz).floor() as usize).min(nyquist_bin - 1);

        if bin_min > bin_max {
            log::warn!(
                "Pitch band [{:.1}, {:.1}] Hz holds no FFT bin at {:.2} Hz resolution",
                self.fmin,
                self.fmax,
                bin_hz
            );
            return Ok(Vec::new());
        }

        let num_frames = if samples.len() <= self.frame_size {
            1
        } else {
            (samples.len() - self.frame_size) / self.hop_size + 1
        };

        log::debug!(
            "Tracking pitch: {} frames, bins [{}, {}] at {:.2} Hz/bin",
            num_frames,
            bin_min,
            bin_max,
            bin_hz
        );

        let window = hann_window(self.frame_size);
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(self.frame_size);
        let mut buffer = vec![Complex::new(0.0f32, 0.0); self.frame_size];
        let mut magnitudes = vec![0.0f32; nyquist_bin + 1];
        let mut estimates = Vec::with_capacity(num_frames);

        for frame_idx in 0..num_frames {
            let start = frame_idx * self.hop_size;
            let end = (start + self.frame_size).min(samples.len());

            for (i, slot) in buffer.iter_mut().enumerate() {
                let x = if start + i < end { samples[start + i] } else { 0.0 };
                *slot = Complex::new(x * window[i], 0.0);
            }
            fft.process(&mut buffer);

            for (mag, bin) in magnitudes.iter_mut().zip(buffer.iter()) {
                *mag = bin.norm();
            }

            if let Some(pitch) = self.pick_peak(&magnitudes, bin_min, bin_max, bin_hz) {
                estimates.push(pitch);
            }
        }

        Ok(estimates)
    }

    /// Select the in-band peak of one magnitude spectrum, or `None` if unvoiced
    fn pick_peak(
        &self,
        magnitudes: &[f32],
        bin_min: usize,
        bin_max: usize,
        bin_hz: f32,
    ) -> Option<f32> {
        let frame_peak = magnitudes[1..].iter().copied().fold(0.0f32, f32::max);

        let (offset, &band_peak) = magnitudes[bin_min..=bin_max]
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))?;

        if band_peak <= EPSILON || band_peak < self.peak_ratio * frame_peak {
            return None;
        }

        let k = bin_min + offset;
        let (a, b, c) = (magnitudes[k - 1], band_peak, magnitudes[k + 1]);
        let denom = a - 2.0 * b + c;
        let delta = if denom.abs() > EPSILON {
            (0.5 * (a - c) / denom).clamp(-0.5, 0.5)
        } else {
            0.0
        };

        let pitch = (k as f32 + delta) * bin_hz;
        (pitch > 0.0).then_some(pitch)
    }
}

/// Periodic Hann window
fn hann_window(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| 0.5 - 0.5 * (2.0 * std::f32::consts::PI * i as f32 / size as f32).cos())
        .collect()
}
