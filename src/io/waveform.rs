//! Validated view of a decoded mono signal

use crate::error::AnalysisError;

/// Decoded mono waveform borrowed from the caller
///
/// Construction is the only place the input contract is checked: once a
/// `Waveform` exists, every extractor can assume a non-empty, finite signal
/// with a positive sample rate.
#[derive(Debug, Clone, Copy)]
pub struct Waveform<'a> {
    samples: &'a [f32],
    sample_rate: u32,
}

impl<'a> Waveform<'a> {
    /// Validate and wrap decoded samples
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidAudio` if the sample slice is empty,
    /// the sample rate is zero, or any sample is NaN or infinite.
    ///
    /// # Example
    ///
    /// ```
    /// use prosody_coach::io::Waveform;
    ///
    /// let samples = vec![0.0f32; 16000];
    /// let waveform = Waveform::new(&samples, 16000)?;
    /// assert_eq!(waveform.duration_seconds(), 1.0);
    /// # Ok::<(), prosody_coach::AnalysisError>(())
    /// ```
    pub fn new(samples: &'a [f32], sample_rate: u32) -> Result<Self, AnalysisError> {
        if samples.is_empty() {
            return Err(AnalysisError::InvalidAudio(
                "Empty audio samples".to_string(),
            ));
        }

        if sample_rate == 0 {
            return Err(AnalysisError::InvalidAudio(
                "Invalid sample rate: 0".to_string(),
            ));
        }

        if let Some(index) = samples.iter().position(|s| !s.is_finite()) {
            return Err(AnalysisError::InvalidAudio(format!(
                "Non-finite sample at index {}",
                index
            )));
        }

        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Samples, mono, nominally in [-1.0, 1.0]
    pub fn samples(&self) -> &'a [f32] {
        self.samples
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Total duration in seconds
    pub fn duration_seconds(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }
}
