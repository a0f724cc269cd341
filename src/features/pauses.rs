//! Pause detection
//!
//! A pause is a gap between two adjacent non-silent intervals that lasts at
//! least `min_pause_duration`. Its location is the gap *start*, the moment
//! speech stops, which is where a coaching marker belongs.

use crate::error::AnalysisError;
use crate::preprocessing::silence::SilenceDetector;

/// Detect pauses between speech intervals
///
/// # Arguments
///
/// * `samples` - Audio samples (mono)
/// * `sample_rate` - Sample rate in Hz
/// * `detector` - Silence segmentation parameters
/// * `min_pause_duration` - Minimum gap in seconds (default: 0.5)
///
/// # Returns
///
/// `(count, locations)` with `locations.len() == count` and locations in
/// ascending seconds
///
/// # Example
///
/// ```
/// use prosody_coach::features::pauses::detect_pauses;
/// use prosody_coach::preprocessing::silence::SilenceDetector;
///
/// let samples = vec![0.0f32; 16000];
/// let (count, locations) = detect_pauses(&samples, 16000, &SilenceDetector::default(), 0.5)?;
/// assert_eq!(count, 0);
/// assert!(locations.is_empty());
/// # Ok::<(), prosody_coach::AnalysisError>(())
/// ```
pub fn detect_pauses(
    samples: &[f32],
    sample_rate: u32,
    detector: &SilenceDetector,
    min_pause_duration: f32,
) -> Result<(u32, Vec<f32>), AnalysisError> {
    if sample_rate == 0 {
        return Err(AnalysisError::ProcessingError(
            "Invalid sample rate: 0".to_string(),
        ));
    }

    let intervals = detector.split(samples)?;
    let sr = sample_rate as f32;

    let locations: Vec<f32> = intervals
        .windows(2)
        .filter_map(|pair| {
            let gap_start = pair[0].1 as f32 / sr;
            let gap_end = pair[1].0 as f32 / sr;
            (gap_end - gap_start >= min_pause_duration).then_some(gap_start)
        })
        .collect();

    log::debug!(
        "Detected {} pauses >= {:.2}s across {} speech intervals",
        locations.len(),
        min_pause_duration,
        intervals.len()
    );

    Ok((locations.len() as u32, locations))
}
