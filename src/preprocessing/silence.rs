//! Silence detection
//!
//! Splits a signal into non-silent intervals. A frame is non-silent when its
//! RMS level is within `top_db` decibels of the loudest frame.

use super::framing::frame_rms;
use crate::error::AnalysisError;

/// Numerical stability epsilon
const EPSILON: f32 = 1e-10;

/// Silence detection configuration
#[derive(Debug, Clone)]
pub struct SilenceDetector {
    /// Threshold in dB below the peak frame (default: 20.0)
    pub top_db: f32,

    /// Frame size for analysis (default: 2048)
    pub frame_size: usize,

    /// Hop size for analysis (default: 512)
    pub hop_size: usize,
}

impl Default for SilenceDetector {
    fn default() -> Self {
        Self {
            top_db: 20.0,
            frame_size: 2048,
            hop_size: 512,
        }
    }
}

impl SilenceDetector {
    /// Find non-silent intervals
    ///
    /// # Arguments
    ///
    /// * `samples` - Audio samples (mono)
    ///
    /// # Returns
    ///
    /// `(start, end)` sample intervals, half-open, ascending and
    /// non-overlapping. An all-zero signal has no intervals.
    ///
    /// # Example
    ///
    /// ```
    /// use prosody_coach::preprocessing::silence::SilenceDetector;
    ///
    /// let mut samples = vec![0.0f32; 16000];
    /// for s in samples[4000..8000].iter_mut() {
    ///     *s = 0.5;
    /// }
    /// let intervals = SilenceDetector::default().split(&samples)?;
    /// assert_eq!(intervals.len(), 1);
    /// # Ok::<(), prosody_coach::AnalysisError>(())
    /// ```
    pub fn split(&self, samples: &[f32]) -> Result<Vec<(usize, usize)>, AnalysisError> {
        log::debug!(
            "Detecting silence in {} samples (top_db={:.1})",
            samples.len(),
            self.top_db
        );

        let rms = frame_rms(samples, self.frame_size, self.hop_size)?;
        let peak = rms.iter().copied().fold(0.0f32, f32::max);

        if peak <= EPSILON {
            log::debug!("Signal is entirely silent, no speech intervals");
            return Ok(Vec::new());
        }

        // 20 * log10(rms / peak) > -top_db  <=>  rms > peak * 10^(-top_db / 20)
        let threshold = peak * 10.0_f32.powf(-self.top_db / 20.0);

        let mut intervals = Vec::new();
        let mut run_start: Option<usize> = None;

        for (i, &level) in rms.iter().enumerate() {
            match (level > threshold, run_start) {
                (true, None) => run_start = Some(i),
                (false, Some(first)) => {
                    intervals.push(self.frames_to_samples(first, i, samples.len()));
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(first) = run_start {
            intervals.push(self.frames_to_samples(first, rms.len(), samples.len()));
        }

        log::debug!("Found {} non-silent intervals", intervals.len());

        Ok(intervals)
    }

    /// Convert a frame run `[first, end_exclusive)` to a sample interval
    fn frames_to_samples(&self, first: usize, end_exclusive: usize, len: usize) -> (usize, usize) {
        let start = (first * self.hop_size).min(len);
        let end = (end_exclusive * self.hop_size).min(len);
        (start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(samples: &mut [f32], sample_rate: f32, freq: f32, amp: f32) {
        for (i, s) in samples.iter_mut().enumerate() {
            *s = amp * (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate).sin();
        }
    }

    #[test]
    fn test_two_segments_with_gap() {
        let sr = 16000;
        let mut samples = vec![0.0f32; sr * 5];
        tone(&mut samples[..sr * 2], sr as f32, 220.0, 0.5);
        tone(&mut samples[sr * 3..], sr as f32, 220.0, 0.5);

        let intervals = SilenceDetector::default().split(&samples).unwrap();
        assert_eq!(intervals.len(), 2, "got {:?}", intervals);

        let (_, first_end) = intervals[0];
        let (second_start, _) = intervals[1];
        let gap = (second_start - first_end) as f32 / sr as f32;
        assert!(gap > 0.6 && gap < 1.0, "gap should be close to 1s, got {:.3}", gap);
    }

    #[test]
    fn test_silent_signal_has_no_intervals() {
        let samples = vec![0.0f32; 32000];
        assert!(SilenceDetector::default().split(&samples).unwrap().is_empty());
    }

    #[test]
    fn test_continuous_tone_is_single_interval() {
        let mut samples = vec![0.0f32; 32000];
        tone(&mut samples, 16000.0, 300.0, 0.3);
        let intervals = SilenceDetector::default().split(&samples).unwrap();
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].1, samples.len());
    }

    #[test]
    fn test_quiet_section_counts_as_silence() {
        let sr = 16000;
        let mut samples = vec![0.0f32; sr * 3];
        tone(&mut samples[..sr], sr as f32, 200.0, 0.8);
        // 40 dB down: below the 20 dB threshold
        tone(&mut samples[sr..sr * 2], sr as f32, 200.0, 0.008);
        tone(&mut samples[sr * 2..], sr as f32, 200.0, 0.8);

        let intervals = SilenceDetector::default().split(&samples).unwrap();
        assert_eq!(intervals.len(), 2);
    }
}
