//! Configuration parameters for speech analysis
//!
//! Thresholds are configuration, not behavior: every band edge, penalty and
//! cap the scoring engine uses lives here so it can be tuned per language
//! without touching the scoring logic. All structs deserialize with
//! `#[serde(default)]`, so a partial JSON document overrides only the fields
//! it names.

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};

/// Language used for marker labels and recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English
    #[default]
    En,
    /// Spanish
    Es,
}

impl Locale {
    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
        }
    }
}

/// Feature extraction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProsodyConfig {
    /// Frame size for STFT and RMS framing (default: 2048)
    pub frame_size: usize,

    /// Hop size for STFT and RMS framing (default: 512)
    pub hop_size: usize,

    /// Lowest pitch considered, in Hz (default: 75.0, low male voice)
    pub pitch_fmin: f32,

    /// Highest pitch considered, in Hz (default: 400.0, high female voice)
    pub pitch_fmax: f32,

    /// A frame is voiced only if its in-band peak reaches this fraction of
    /// the frame's overall spectral peak (default: 0.1)
    pub pitch_peak_ratio: f32,

    /// Silence threshold in dB below the loudest frame (default: 20.0)
    pub silence_top_db: f32,

    /// Minimum gap between speech intervals counted as a pause, in seconds
    /// (default: 0.5)
    pub min_pause_duration: f32,

    /// Frame size for onset detection (default: 1024)
    pub onset_frame_size: usize,

    /// Hop size for onset detection (default: 256)
    pub onset_hop_size: usize,

    /// Onset threshold in dB relative to the maximum energy flux (default: -20.0)
    pub onset_threshold_db: f32,

    /// Syllables per word used by the speech-rate proxy (default: 1.5)
    pub syllables_per_word: f32,

    /// Minimum tempo considered by the tempo estimator (default: 60.0)
    pub min_bpm: f32,

    /// Maximum tempo considered by the tempo estimator (default: 180.0)
    pub max_bpm: f32,
}

impl Default for ProsodyConfig {
    fn default() -> Self {
        Self {
            frame_size: 2048,
            hop_size: 512,
            pitch_fmin: 75.0,
            pitch_fmax: 400.0,
            pitch_peak_ratio: 0.1,
            silence_top_db: 20.0,
            min_pause_duration: 0.5,
            onset_frame_size: 1024,
            onset_hop_size: 256,
            onset_threshold_db: -20.0,
            syllables_per_word: 1.5,
            min_bpm: 60.0,
            max_bpm: 180.0,
        }
    }
}

/// Scoring thresholds and rule weights
///
/// Rates are per minute of audio. WPM values are compared as `f32`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringThresholds {
    // Pacing
    /// Lower edge of the optimal speaking window (default: 120)
    pub optimal_wpm_min: f32,
    /// Upper edge of the optimal speaking window (default: 150)
    pub optimal_wpm_max: f32,
    /// Below this the pace is "very slow" (default: 100)
    pub slow_wpm_threshold: f32,
    /// Above this the pace is "very fast" (default: 180)
    pub fast_wpm_threshold: f32,
    /// Pacing score reached at `slow_wpm_threshold` (default: 7.0)
    pub slow_pacing_floor: f32,
    /// Pacing score reached at `fast_wpm_threshold` (default: 7.0)
    pub fast_pacing_floor: f32,
    /// Points lost per WPM below `slow_wpm_threshold` (default: 0.2)
    pub very_slow_decay_per_wpm: f32,
    /// Points lost per WPM above `fast_wpm_threshold` (default: 0.15)
    pub very_fast_decay_per_wpm: f32,

    // Energy
    /// Energy variance below this is monotone (default: 0.2)
    pub energy_flat_threshold: f32,
    /// Energy variance above this is erratic (default: 0.5)
    pub energy_erratic_threshold: f32,
    /// Confidence penalty for monotone delivery (default: 2.5)
    pub energy_flat_penalty: f32,
    /// Confidence penalty for erratic volume (default: 1.0)
    pub energy_erratic_penalty: f32,
    /// Confidence bonus inside the optimal energy band (default: 0.5)
    pub energy_band_bonus: f32,
    /// Lower edge of the articulate energy sub-band (default: 0.25)
    pub articulate_energy_min: f32,
    /// Upper edge of the articulate energy sub-band (default: 0.40)
    pub articulate_energy_max: f32,
    /// Clarity bonus inside the articulate sub-band (default: 0.5)
    pub articulate_bonus: f32,

    // Pitch
    /// Pitch std below this is flat, in Hz (default: 20.0)
    pub pitch_std_low: f32,
    /// Pitch std above this is unstable, in Hz (default: 50.0)
    pub pitch_std_high: f32,
    /// Confidence penalty for flat pitch (default: 1.0)
    pub pitch_flat_penalty: f32,
    /// Confidence penalty for unstable pitch (default: 1.5)
    pub pitch_unstable_penalty: f32,
    /// Confidence bonus inside the natural pitch range (default: 0.5)
    pub pitch_natural_bonus: f32,

    // Pauses
    /// Pauses per minute considered excessive (default: 5.0)
    pub excessive_pause_rate: f32,
    /// Confidence penalty per pause/min above the excessive rate (default: 0.3)
    pub pause_penalty_per_excess: f32,
    /// Maximum confidence penalty from pauses (default: 2.0)
    pub pause_penalty_cap: f32,

    // Fillers (clarity bands, upper edges in fillers/min)
    /// Excellent band upper edge (default: 1.0)
    pub filler_rate_excellent: f32,
    /// Good band upper edge (default: 3.0)
    pub filler_rate_good: f32,
    /// Moderate band upper edge (default: 5.0)
    pub filler_rate_moderate: f32,
    /// Poor band upper edge (default: 8.0), severe beyond
    pub filler_rate_poor: f32,
    /// Clarity lost per filler/min in the excellent band (default: 0.5)
    pub clarity_slope_excellent: f32,
    /// Clarity lost per filler/min in the good band (default: 0.75)
    pub clarity_slope_good: f32,
    /// Clarity lost per filler/min in the moderate band (default: 1.0)
    pub clarity_slope_moderate: f32,
    /// Clarity lost per filler/min in the poor band (default: 0.8)
    pub clarity_slope_poor: f32,
    /// Clarity lost per filler/min in the severe band (default: 0.4)
    pub clarity_slope_severe: f32,
    /// Lowest clarity the filler bands can produce (default: 2.0)
    pub clarity_floor: f32,

    // Nervousness: each contribution is `base + slope * excess`, capped
    /// Nervousness added once pitch std passes `pitch_std_high` (default: 2.0)
    pub nervous_pitch_base: f32,
    /// Nervousness per Hz of pitch std above `pitch_std_high` (default: 0.05)
    pub nervous_pitch_slope: f32,
    /// Maximum nervousness from pitch instability (default: 3.0)
    pub nervous_pitch_cap: f32,
    /// Nervousness added once pauses pass `excessive_pause_rate` (default: 1.0)
    pub nervous_pause_base: f32,
    /// Nervousness per pause/min above `excessive_pause_rate` (default: 0.25)
    pub nervous_pause_slope: f32,
    /// Maximum nervousness from pauses (default: 2.5)
    pub nervous_pause_cap: f32,
    /// Fillers per minute above which nervousness rises (default: 5.0)
    pub nervous_filler_rate: f32,
    /// Nervousness added once fillers pass `nervous_filler_rate` (default: 1.0)
    pub nervous_filler_base: f32,
    /// Nervousness per filler/min above `nervous_filler_rate` (default: 0.25)
    pub nervous_filler_slope: f32,
    /// Maximum nervousness from fillers (default: 2.5)
    pub nervous_filler_cap: f32,
    /// Nervousness added once energy passes `energy_erratic_threshold` (default: 1.0)
    pub nervous_energy_base: f32,
    /// Nervousness per unit of energy variance above `energy_erratic_threshold` (default: 5.0)
    pub nervous_energy_slope: f32,
    /// Maximum nervousness from energy variance (default: 2.0)
    pub nervous_energy_cap: f32,

    // Semantic fusion
    /// Acoustic weight in fused confidence (default: 0.6)
    pub confidence_acoustic_weight: f32,
    /// Acoustic weight in fused clarity (default: 0.5)
    pub clarity_acoustic_weight: f32,
    /// Content score above which fused clarity is boosted (default: 8.0)
    pub content_boost_threshold: f32,
    /// Multiplicative clarity boost for strong content (default: 1.1)
    pub content_boost_factor: f32,

    // Recommendation bands
    /// Confidence below this triggers the low-confidence advice (default: 6.0)
    pub low_confidence_score: f32,
    /// Scores at or above this count as high (default: 8.5)
    pub high_score: f32,
}

impl Default for ScoringThresholds {
    fn default() -> Self {
        Self {
            optimal_wpm_min: 120.0,
            optimal_wpm_max: 150.0,
            slow_wpm_threshold: 100.0,
            fast_wpm_threshold: 180.0,
            slow_pacing_floor: 7.0,
            fast_pacing_floor: 7.0,
            very_slow_decay_per_wpm: 0.2,
            very_fast_decay_per_wpm: 0.15,
            energy_flat_threshold: 0.2,
            energy_erratic_threshold: 0.5,
            energy_flat_penalty: 2.5,
            energy_erratic_penalty: 1.0,
            energy_band_bonus: 0.5,
            articulate_energy_min: 0.25,
            articulate_energy_max: 0.40,
            articulate_bonus: 0.5,
            pitch_std_low: 20.0,
            pitch_std_high: 50.0,
            pitch_flat_penalty: 1.0,
            pitch_unstable_penalty: 1.5,
            pitch_natural_bonus: 0.5,
            excessive_pause_rate: 5.0,
            pause_penalty_per_excess: 0.3,
            pause_penalty_cap: 2.0,
            filler_rate_excellent: 1.0,
            filler_rate_good: 3.0,
            filler_rate_moderate: 5.0,
            filler_rate_poor: 8.0,
            clarity_slope_excellent: 0.5,
            clarity_slope_good: 0.75,
            clarity_slope_moderate: 1.0,
            clarity_slope_poor: 0.8,
            clarity_slope_severe: 0.4,
            clarity_floor: 2.0,
            nervous_pitch_base: 2.0,
            nervous_pitch_slope: 0.05,
            nervous_pitch_cap: 3.0,
            nervous_pause_base: 1.0,
            nervous_pause_slope: 0.25,
            nervous_pause_cap: 2.5,
            nervous_filler_rate: 5.0,
            nervous_filler_base: 1.0,
            nervous_filler_slope: 0.25,
            nervous_filler_cap: 2.5,
            nervous_energy_base: 1.0,
            nervous_energy_slope: 5.0,
            nervous_energy_cap: 2.0,
            confidence_acoustic_weight: 0.6,
            clarity_acoustic_weight: 0.5,
            content_boost_threshold: 8.0,
            content_boost_factor: 1.1,
            low_confidence_score: 6.0,
            high_score: 8.5,
        }
    }
}

/// Timeline marker parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// Displayed length of a pause marker, in seconds (default: 0.8)
    pub long_pause_duration: f32,

    /// Fillers per minute above which filler markers are high severity (default: 7.0)
    pub filler_rate_high: f32,

    /// Fillers per minute above which filler markers are medium severity (default: 4.0)
    pub filler_rate_medium: f32,

    /// Pause count above which pause markers are high severity (default: 10).
    /// Half of it is the medium threshold.
    pub excessive_pause_count: u32,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            long_pause_duration: 0.8,
            filler_rate_high: 7.0,
            filler_rate_medium: 4.0,
            excessive_pause_count: 10,
        }
    }
}

/// Analysis configuration parameters
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Feature extraction
    pub prosody: ProsodyConfig,

    /// Scoring thresholds
    pub scoring: ScoringThresholds,

    /// Timeline markers
    pub markers: MarkerConfig,

    /// Language for labels and recommendations (default: English)
    pub locale: Locale,
}

impl AnalysisConfig {
    /// Load a configuration from JSON, filling missing fields with defaults
    ///
    /// # Example
    ///
    /// ```
    /// use prosody_coach::{AnalysisConfig, Locale};
    ///
    /// let config = AnalysisConfig::from_json_str(
    ///     r#"{ "locale": "es", "scoring": { "optimal_wpm_min": 130.0, "optimal_wpm_max": 160.0 } }"#,
    /// )?;
    /// assert_eq!(config.locale, Locale::Es);
    /// assert_eq!(config.scoring.slow_wpm_threshold, 100.0);
    /// # Ok::<(), prosody_coach::AnalysisError>(())
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, AnalysisError> {
        let config: AnalysisConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that all parameters are usable together
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let p = &self.prosody;
        if p.frame_size == 0 || p.hop_size == 0 || p.onset_frame_size == 0 || p.onset_hop_size == 0
        {
            return Err(invalid("frame and hop sizes must be > 0"));
        }
        if p.hop_size > p.frame_size || p.onset_hop_size > p.onset_frame_size {
            return Err(invalid("hop size must not exceed frame size"));
        }
        if !(p.pitch_fmin > 0.0 && p.pitch_fmin < p.pitch_fmax) {
            return Err(invalid(&format!(
                "pitch band must satisfy 0 < fmin < fmax, got [{:.1}, {:.1}]",
                p.pitch_fmin, p.pitch_fmax
            )));
        }
        if !(0.0..=1.0).contains(&p.pitch_peak_ratio) {
            return Err(invalid("pitch_peak_ratio must be in [0, 1]"));
        }
        if p.silence_top_db <= 0.0 {
            return Err(invalid("silence_top_db must be > 0"));
        }
        if p.min_pause_duration <= 0.0 {
            return Err(invalid("min_pause_duration must be > 0"));
        }
        if p.syllables_per_word <= 0.0 {
            return Err(invalid("syllables_per_word must be > 0"));
        }
        if !(p.min_bpm > 0.0 && p.min_bpm < p.max_bpm) {
            return Err(invalid(&format!(
                "BPM range must satisfy 0 < min < max, got [{:.1}, {:.1}]",
                p.min_bpm, p.max_bpm
            )));
        }

        let s = &self.scoring;
        if !(s.slow_wpm_threshold < s.optimal_wpm_min
            && s.optimal_wpm_min <= s.optimal_wpm_max
            && s.optimal_wpm_max < s.fast_wpm_threshold)
        {
            return Err(invalid(
                "WPM thresholds must satisfy slow < optimal_min <= optimal_max < fast",
            ));
        }
        if s.energy_flat_threshold > s.energy_erratic_threshold {
            return Err(invalid("energy_flat_threshold must not exceed energy_erratic_threshold"));
        }
        if s.articulate_energy_min > s.articulate_energy_max {
            return Err(invalid("articulate energy band is inverted"));
        }
        if s.pitch_std_low > s.pitch_std_high {
            return Err(invalid("pitch_std_low must not exceed pitch_std_high"));
        }
        if !(0.0 < s.filler_rate_excellent
            && s.filler_rate_excellent < s.filler_rate_good
            && s.filler_rate_good < s.filler_rate_moderate
            && s.filler_rate_moderate < s.filler_rate_poor)
        {
            return Err(invalid("filler rate bands must be strictly ascending and positive"));
        }
        let nervous_terms = [
            s.nervous_pitch_base,
            s.nervous_pitch_slope,
            s.nervous_pause_base,
            s.nervous_pause_slope,
            s.nervous_filler_base,
            s.nervous_filler_slope,
            s.nervous_energy_base,
            s.nervous_energy_slope,
        ];
        if nervous_terms.iter().any(|v| !(*v >= 0.0)) {
            return Err(invalid("nervousness base and slope values must be >= 0"));
        }
        if !(0.0..=1.0).contains(&s.confidence_acoustic_weight)
            || !(0.0..=1.0).contains(&s.clarity_acoustic_weight)
        {
            return Err(invalid("fusion weights must be in [0, 1]"));
        }

        let m = &self.markers;
        if m.long_pause_duration <= 0.0 {
            return Err(invalid("long_pause_duration must be > 0"));
        }
        if m.filler_rate_medium > m.filler_rate_high {
            return Err(invalid("filler_rate_medium must not exceed filler_rate_high"));
        }

        Ok(())
    }
}

fn invalid(msg: &str) -> AnalysisError {
    AnalysisError::InvalidConfig(msg.to_string())
}
