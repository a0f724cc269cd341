//! Speech-rate estimate
//!
//! Words per minute from the onset count, with pause time removed. This is
//! deliberately approximate: without transcription there are no true word
//! boundaries, so onsets stand in for syllables and a fixed
//! syllables-per-word constant converts them to words.

/// Estimate words per minute
///
/// `speaking = total − pause_count × min_pause_duration`, then
/// `wpm = round(onset_count / syllables_per_word / speaking × 60)`.
///
/// # Returns
///
/// Rounded WPM, or `0` when no speaking time remains
///
/// # Example
///
/// ```
/// use prosody_coach::features::speech_rate::estimate_speech_rate;
///
/// // 30 syllables in 10 s, no pauses: 20 words in 10 s = 120 WPM
/// assert_eq!(estimate_speech_rate(30, 10.0, 0, 0.5, 1.5), 120);
/// ```
pub fn estimate_speech_rate(
    onset_count: usize,
    total_duration: f32,
    pause_count: u32,
    min_pause_duration: f32,
    syllables_per_word: f32,
) -> u32 {
    let speaking_duration = total_duration - pause_count as f32 * min_pause_duration;

    if speaking_duration <= 0.0 || syllables_per_word <= 0.0 {
        log::debug!(
            "No speaking time left ({:.2}s), speech rate falls back to zero",
            speaking_duration
        );
        return 0;
    }

    let word_count = onset_count as f32 / syllables_per_word;
    let wpm = (word_count / speaking_duration * 60.0).round();

    log::debug!(
        "Speech rate: {} onsets over {:.2}s speaking -> {} WPM",
        onset_count,
        speaking_duration,
        wpm
    );

    wpm.max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pause_time_is_removed() {
        // 10 s with 4 pauses of 0.5 s -> 8 s speaking; 24 onsets = 16 words
        assert_eq!(estimate_speech_rate(24, 10.0, 4, 0.5, 1.5), 120);
    }

    #[test]
    fn test_rounding() {
        // 10 onsets / 1.5 = 6.667 words in 3 s = 133.3 WPM
        assert_eq!(estimate_speech_rate(10, 3.0, 0, 0.5, 1.5), 133);
        // 11 onsets -> 146.67 WPM
        assert_eq!(estimate_speech_rate(11, 3.0, 0, 0.5, 1.5), 147);
    }

    #[test]
    fn test_no_speaking_time() {
        assert_eq!(estimate_speech_rate(10, 1.0, 2, 0.5, 1.5), 0);
        assert_eq!(estimate_speech_rate(10, 1.0, 5, 0.5, 1.5), 0);
        assert_eq!(estimate_speech_rate(10, 0.0, 0, 0.5, 1.5), 0);
    }

    #[test]
    fn test_no_onsets() {
        assert_eq!(estimate_speech_rate(0, 10.0, 0, 0.5, 1.5), 0);
    }
}
