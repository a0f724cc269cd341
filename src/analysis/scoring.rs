//! Scoring engine
//!
//! Turns prosodic metrics, filler counts and optional semantic scores into
//! four coaching scores on a 0-10 scale.
//!
//! Each score starts from a baseline and is adjusted by a table of named
//! rules. A rule is a predicate plus an adjustment; every rule whose
//! predicate holds adds its adjustment to the running score. The result is
//! clamped to [0, 10] and rounded to one decimal.
//!
//! Confidence and clarity can additionally be blended with semantic scores.
//! Pacing and nervousness are purely acoustic.

use super::fillers::FillerWord;
use super::metrics::ProsodyMetrics;
use super::semantic::{FusionMode, SemanticAnalysis};
use crate::config::ScoringThresholds;
use serde::{Deserialize, Serialize};

/// Upper bound of every score
pub const MAX_SCORE: f32 = 10.0;

/// The four coaching scores, each in [0, 10] with one decimal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisScores {
    /// Vocal assurance (higher is better)
    pub confidence: f32,
    /// Freedom from fillers and articulation (higher is better)
    pub clarity: f32,
    /// Closeness of speaking rate to the optimal window (higher is better)
    pub pacing: f32,
    /// Signs of nervousness (lower is better)
    pub nervousness: f32,
}

/// Everything a scoring rule may look at
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    /// Prosodic measurements
    pub metrics: &'a ProsodyMetrics,
    /// Threshold table
    pub thresholds: &'a ScoringThresholds,
    /// Fillers per minute
    pub filler_rate: f32,
    /// Pauses per minute
    pub pause_rate: f32,
}

impl<'a> ScoringContext<'a> {
    /// Build a context, deriving per-minute rates from `duration_seconds`
    pub fn new(
        metrics: &'a ProsodyMetrics,
        filler_count: usize,
        duration_seconds: f32,
        thresholds: &'a ScoringThresholds,
    ) -> Self {
        Self {
            metrics,
            thresholds,
            filler_rate: rate_per_minute(filler_count, duration_seconds),
            pause_rate: rate_per_minute(metrics.pause_count as usize, duration_seconds),
        }
    }

    fn wpm(&self) -> f32 {
        self.metrics.speech_rate_wpm as f32
    }
}

/// A named score adjustment
#[derive(Clone, Copy)]
pub struct ScoreRule {
    /// Stable identifier, used in logs and tests
    pub name: &'static str,
    /// Whether the rule fires for this context
    pub applies: fn(&ScoringContext<'_>) -> bool,
    /// Signed amount added to the score when the rule fires
    pub adjustment: fn(&ScoringContext<'_>) -> f32,
}

impl ScoreRule {
    /// The rule's adjustment if it fires
    pub fn evaluate(&self, ctx: &ScoringContext<'_>) -> Option<f32> {
        (self.applies)(ctx).then(|| (self.adjustment)(ctx))
    }
}

impl std::fmt::Debug for ScoreRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreRule").field("name", &self.name).finish()
    }
}

/// Confidence rules, applied to a baseline of 10
pub const CONFIDENCE_RULES: &[ScoreRule] = &[
    ScoreRule {
        name: "energy_flat",
        applies: |c| c.metrics.energy_variance < c.thresholds.energy_flat_threshold,
        adjustment: |c| -c.thresholds.energy_flat_penalty,
    },
    ScoreRule {
        name: "energy_erratic",
        applies: |c| c.metrics.energy_variance > c.thresholds.energy_erratic_threshold,
        adjustment: |c| -c.thresholds.energy_erratic_penalty,
    },
    ScoreRule {
        name: "energy_in_band",
        applies: |c| {
            c.metrics.energy_variance >= c.thresholds.energy_flat_threshold
                && c.metrics.energy_variance <= c.thresholds.energy_erratic_threshold
        },
        adjustment: |c| c.thresholds.energy_band_bonus,
    },
    ScoreRule {
        name: "pitch_flat",
        applies: |c| c.metrics.pitch_std < c.thresholds.pitch_std_low,
        adjustment: |c| -c.thresholds.pitch_flat_penalty,
    },
    ScoreRule {
        name: "pitch_unstable",
        applies: |c| c.metrics.pitch_std > c.thresholds.pitch_std_high,
        adjustment: |c| -c.thresholds.pitch_unstable_penalty,
    },
    ScoreRule {
        name: "pitch_natural",
        applies: |c| {
            c.metrics.pitch_std >= c.thresholds.pitch_std_low
                && c.metrics.pitch_std <= c.thresholds.pitch_std_high
        },
        adjustment: |c| c.thresholds.pitch_natural_bonus,
    },
    ScoreRule {
        name: "excessive_pauses",
        applies: |c| c.pause_rate > c.thresholds.excessive_pause_rate,
        adjustment: |c| {
            let excess = c.pause_rate - c.thresholds.excessive_pause_rate;
            -(excess * c.thresholds.pause_penalty_per_excess).min(c.thresholds.pause_penalty_cap)
        },
    },
];

/// Clarity rules, applied on top of the filler-band baseline
pub const CLARITY_RULES: &[ScoreRule] = &[ScoreRule {
    name: "articulate_energy",
    applies: |c| {
        c.metrics.energy_variance >= c.thresholds.articulate_energy_min
            && c.metrics.energy_variance <= c.thresholds.articulate_energy_max
    },
    adjustment: |c| c.thresholds.articulate_bonus,
}];

/// Pacing rules, applied to a baseline of 10
pub const PACING_RULES: &[ScoreRule] = &[
    ScoreRule {
        name: "slow",
        applies: |c| {
            c.wpm() >= c.thresholds.slow_wpm_threshold && c.wpm() < c.thresholds.optimal_wpm_min
        },
        adjustment: |c| {
            let t = c.thresholds;
            let span = t.optimal_wpm_min - t.slow_wpm_threshold;
            -(t.optimal_wpm_min - c.wpm()) / span * (MAX_SCORE - t.slow_pacing_floor)
        },
    },
    ScoreRule {
        name: "very_slow",
        applies: |c| c.wpm() < c.thresholds.slow_wpm_threshold,
        adjustment: |c| {
            let t = c.thresholds;
            -(MAX_SCORE - t.slow_pacing_floor)
                - (t.slow_wpm_threshold - c.wpm()) * t.very_slow_decay_per_wpm
        },
    },
    ScoreRule {
        name: "fast",
        applies: |c| {
            c.wpm() > c.thresholds.optimal_wpm_max && c.wpm() <= c.thresholds.fast_wpm_threshold
        },
        adjustment: |c| {
            let t = c.thresholds;
            let span = t.fast_wpm_threshold - t.optimal_wpm_max;
            -(c.wpm() - t.optimal_wpm_max) / span * (MAX_SCORE - t.fast_pacing_floor)
        },
    },
    ScoreRule {
        name: "very_fast",
        applies: |c| c.wpm() > c.thresholds.fast_wpm_threshold,
        adjustment: |c| {
            let t = c.thresholds;
            -(MAX_SCORE - t.fast_pacing_floor)
                - (c.wpm() - t.fast_wpm_threshold) * t.very_fast_decay_per_wpm
        },
    },
];

/// Nervousness contributions, applied to a baseline of 0
pub const NERVOUSNESS_RULES: &[ScoreRule] = &[
    ScoreRule {
        name: "pitch_instability",
        applies: |c| c.metrics.pitch_std > c.thresholds.pitch_std_high,
        adjustment: |c| {
            let t = c.thresholds;
            let excess = c.metrics.pitch_std - t.pitch_std_high;
            (t.nervous_pitch_base + t.nervous_pitch_slope * excess).min(t.nervous_pitch_cap)
        },
    },
    ScoreRule {
        name: "pause_frequency",
        applies: |c| c.pause_rate > c.thresholds.excessive_pause_rate,
        adjustment: |c| {
            let t = c.thresholds;
            let excess = c.pause_rate - t.excessive_pause_rate;
            (t.nervous_pause_base + t.nervous_pause_slope * excess).min(t.nervous_pause_cap)
        },
    },
    ScoreRule {
        name: "filler_frequency",
        applies: |c| c.filler_rate > c.thresholds.nervous_filler_rate,
        adjustment: |c| {
            let t = c.thresholds;
            let excess = c.filler_rate - t.nervous_filler_rate;
            (t.nervous_filler_base + t.nervous_filler_slope * excess).min(t.nervous_filler_cap)
        },
    },
    ScoreRule {
        name: "volume_instability",
        applies: |c| c.metrics.energy_variance > c.thresholds.energy_erratic_threshold,
        adjustment: |c| {
            let t = c.thresholds;
            let excess = c.metrics.energy_variance - t.energy_erratic_threshold;
            (t.nervous_energy_base + t.nervous_energy_slope * excess).min(t.nervous_energy_cap)
        },
    },
];

/// Occurrences per minute; 0 when the duration is not positive
pub fn rate_per_minute(count: usize, duration_seconds: f32) -> f32 {
    if duration_seconds > 0.0 && duration_seconds.is_finite() {
        count as f32 / (duration_seconds / 60.0)
    } else {
        0.0
    }
}

/// Fold every firing rule's adjustment into `baseline`
pub fn apply_rules(baseline: f32, rules: &[ScoreRule], ctx: &ScoringContext<'_>) -> f32 {
    rules.iter().fold(baseline, |score, rule| match rule.evaluate(ctx) {
        Some(delta) => {
            log::trace!("Rule {} fired: {:+.2}", rule.name, delta);
            score + delta
        }
        None => score,
    })
}

/// Clarity before the articulation bonus: piecewise-linear in filler rate
///
/// Each band continues from where the previous one ended, so the curve is
/// continuous; it never drops below `clarity_floor`.
pub fn filler_band_score(filler_rate: f32, t: &ScoringThresholds) -> f32 {
    let bands = [
        (t.filler_rate_excellent, t.clarity_slope_excellent),
        (t.filler_rate_good, t.clarity_slope_good),
        (t.filler_rate_moderate, t.clarity_slope_moderate),
        (t.filler_rate_poor, t.clarity_slope_poor),
    ];

    let rate = filler_rate.max(0.0);
    let mut score = MAX_SCORE;
    let mut lower = 0.0f32;

    for (upper, slope) in bands {
        if rate <= upper {
            return (score - slope * (rate - lower)).max(t.clarity_floor);
        }
        score -= slope * (upper - lower);
        lower = upper;
    }

    (score - t.clarity_slope_severe * (rate - lower)).max(t.clarity_floor)
}

/// Clamp to [0, 10] and round to one decimal
pub fn finalize(score: f32) -> f32 {
    if score.is_nan() {
        return 0.0;
    }
    (score.clamp(0.0, MAX_SCORE) * 10.0).round() / 10.0
}

/// Compute all four scores
///
/// # Arguments
///
/// * `metrics` - Prosodic measurements
/// * `fillers` - Sanitized filler records (only the count is used)
/// * `duration_seconds` - Audio duration, for per-minute rates
/// * `semantic` - Optional semantic scores; `None` means acoustic-only
/// * `thresholds` - Threshold table
///
/// # Returns
///
/// The scores and which evidence they were fused from
pub fn compute_scores(
    metrics: &ProsodyMetrics,
    fillers: &[FillerWord],
    duration_seconds: f32,
    semantic: Option<&SemanticAnalysis>,
    thresholds: &ScoringThresholds,
) -> (AnalysisScores, FusionMode) {
    let ctx = ScoringContext::new(metrics, fillers.len(), duration_seconds, thresholds);

    let acoustic_confidence = apply_rules(MAX_SCORE, CONFIDENCE_RULES, &ctx).clamp(0.0, MAX_SCORE);
    let acoustic_clarity = apply_rules(
        filler_band_score(ctx.filler_rate, thresholds),
        CLARITY_RULES,
        &ctx,
    )
    .clamp(0.0, MAX_SCORE);
    let pacing = apply_rules(MAX_SCORE, PACING_RULES, &ctx);
    let nervousness = apply_rules(0.0, NERVOUSNESS_RULES, &ctx);

    let (confidence, clarity, fusion) = match semantic.map(SemanticAnalysis::sanitized) {
        Some(sem) => {
            let wc = thresholds.confidence_acoustic_weight;
            let confidence = wc * acoustic_confidence + (1.0 - wc) * sem.semantic_confidence;

            let wl = thresholds.clarity_acoustic_weight;
            let mut clarity = wl * acoustic_clarity + (1.0 - wl) * sem.semantic_clarity;
            if sem.content_score > thresholds.content_boost_threshold {
                clarity = (clarity * thresholds.content_boost_factor).min(MAX_SCORE);
            }

            (confidence, clarity, FusionMode::SemanticFused)
        }
        None => (acoustic_confidence, acoustic_clarity, FusionMode::AcousticOnly),
    };

    let scores = AnalysisScores {
        confidence: finalize(confidence),
        clarity: finalize(clarity),
        pacing: finalize(pacing),
        nervousness: finalize(nervousness),
    };

    log::debug!(
        "Scores ({:?}): confidence={:.1}, clarity={:.1}, pacing={:.1}, nervousness={:.1} \
         (fillers {:.2}/min, pauses {:.2}/min)",
        fusion,
        scores.confidence,
        scores.clarity,
        scores.pacing,
        scores.nervousness,
        ctx.filler_rate,
        ctx.pause_rate
    );

    (scores, fusion)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(pitch_std: f32, pause_count: u32, energy_variance: f32, wpm: u32) -> ProsodyMetrics {
        ProsodyMetrics {
            pitch_mean: 150.0,
            pitch_std,
            tempo_bpm: 100.0,
            pause_count,
            pause_locations: (0..pause_count).map(|i| i as f32 * 2.0).collect(),
            energy_variance,
            speech_rate_wpm: wpm,
        }
    }

    fn fillers(n: usize) -> Vec<FillerWord> {
        (0..n)
            .map(|i| FillerWord::new("um", i as f32, i as f32 + 0.3, 0.9))
            .collect()
    }

    fn fired(rules: &[ScoreRule], ctx: &ScoringContext<'_>) -> Vec<&'static str> {
        rules
            .iter()
            .filter(|r| r.evaluate(ctx).is_some())
            .map(|r| r.name)
            .collect()
    }

    #[test]
    fn test_rate_per_minute() {
        assert_eq!(rate_per_minute(12, 60.0), 12.0);
        assert_eq!(rate_per_minute(3, 30.0), 6.0);
        assert_eq!(rate_per_minute(5, 0.0), 0.0);
        assert_eq!(rate_per_minute(5, -1.0), 0.0);
    }

    #[test]
    fn test_finalize_clamps_and_rounds() {
        assert_eq!(finalize(11.3), 10.0);
        assert_eq!(finalize(-4.0), 0.0);
        assert_eq!(finalize(7.26), 7.3);
        assert_eq!(finalize(f32::NAN), 0.0);
    }

    #[test]
    fn test_confidence_rules_natural_speaker() {
        let t = ScoringThresholds::default();
        let m = metrics(30.0, 0, 0.35, 135);
        let ctx = ScoringContext::new(&m, 0, 60.0, &t);
        assert_eq!(fired(CONFIDENCE_RULES, &ctx), vec!["energy_in_band", "pitch_natural"]);
    }

    #[test]
    fn test_confidence_rules_flat_and_unstable() {
        let t = ScoringThresholds::default();
        let m = metrics(60.0, 0, 0.1, 135);
        let ctx = ScoringContext::new(&m, 0, 60.0, &t);
        assert_eq!(fired(CONFIDENCE_RULES, &ctx), vec!["energy_flat", "pitch_unstable"]);
        assert!((apply_rules(MAX_SCORE, CONFIDENCE_RULES, &ctx) - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_pause_penalty_is_capped() {
        let t = ScoringThresholds::default();
        // 40 pauses in one minute: 35 over the limit, 10.5 uncapped
        let m = metrics(30.0, 40, 0.35, 135);
        let ctx = ScoringContext::new(&m, 0, 60.0, &t);
        let rule = CONFIDENCE_RULES
            .iter()
            .find(|r| r.name == "excessive_pauses")
            .unwrap();
        assert_eq!(rule.evaluate(&ctx), Some(-2.0));
    }

    #[test]
    fn test_filler_band_score_is_continuous() {
        let t = ScoringThresholds::default();
        assert_eq!(filler_band_score(0.0, &t), 10.0);
        assert!((filler_band_score(1.0, &t) - 9.5).abs() < 1e-5);
        assert!((filler_band_score(3.0, &t) - 8.0).abs() < 1e-5);
        assert!((filler_band_score(5.0, &t) - 6.0).abs() < 1e-5);
        assert!((filler_band_score(8.0, &t) - 3.6).abs() < 1e-5);
        assert!((filler_band_score(12.0, &t) - 2.0).abs() < 1e-5);
        assert_eq!(filler_band_score(100.0, &t), t.clarity_floor);

        let mut prev = filler_band_score(0.0, &t);
        for i in 1..200 {
            let score = filler_band_score(i as f32 * 0.1, &t);
            assert!(score <= prev + 1e-6, "clarity must not rise with filler rate");
            prev = score;
        }
    }

    #[test]
    fn test_pacing_curve() {
        let t = ScoringThresholds::default();
        let pacing = |wpm| {
            let m = metrics(30.0, 0, 0.35, wpm);
            compute_scores(&m, &[], 60.0, None, &t).0.pacing
        };

        assert_eq!(pacing(120), 10.0);
        assert_eq!(pacing(135), 10.0);
        assert_eq!(pacing(150), 10.0);
        assert_eq!(pacing(110), 8.5);
        assert_eq!(pacing(100), 7.0);
        assert_eq!(pacing(90), 5.0);
        assert_eq!(pacing(165), 8.5);
        assert_eq!(pacing(180), 7.0);
        assert_eq!(pacing(200), 4.0);
        assert_eq!(pacing(0), 0.0);
    }

    #[test]
    fn test_nervousness_contributions() {
        let t = ScoringThresholds::default();

        let calm = metrics(30.0, 0, 0.35, 135);
        assert_eq!(compute_scores(&calm, &[], 60.0, None, &t).0.nervousness, 0.0);

        // pitch 70: 2 + 0.05*20 = 3.0 (cap); energy 0.6: 1 + 0.5 = 1.5
        let shaky = metrics(70.0, 0, 0.6, 135);
        assert_eq!(compute_scores(&shaky, &[], 60.0, None, &t).0.nervousness, 4.5);

        // 9 fillers/min: 1 + 0.25*4 = 2.0
        let filler_heavy = metrics(30.0, 0, 0.35, 135);
        let (scores, _) = compute_scores(&filler_heavy, &fillers(9), 60.0, None, &t);
        assert_eq!(scores.nervousness, 2.0);
    }

    #[test]
    fn test_pause_frequency_nervousness() {
        let mut t = ScoringThresholds::default();
        let rule = NERVOUSNESS_RULES
            .iter()
            .find(|r| r.name == "pause_frequency")
            .unwrap();

        // 5 pauses/min is the limit, not over it
        let at_limit = metrics(30.0, 5, 0.35, 135);
        assert_eq!(rule.evaluate(&ScoringContext::new(&at_limit, 0, 60.0, &t)), None);

        // 8 pauses/min: 1 + 0.25*3 = 1.75
        let frequent = metrics(30.0, 8, 0.35, 135);
        let ctx = ScoringContext::new(&frequent, 0, 60.0, &t);
        assert_eq!(rule.evaluate(&ctx), Some(1.75));
        assert_eq!(fired(NERVOUSNESS_RULES, &ctx), vec!["pause_frequency"]);
        assert_eq!(compute_scores(&frequent, &[], 60.0, None, &t).0.nervousness, 1.8);

        // 60 pauses/min: 1 + 0.25*55 = 14.75, capped
        let constant = metrics(30.0, 60, 0.35, 135);
        let ctx = ScoringContext::new(&constant, 0, 60.0, &t);
        assert_eq!(rule.evaluate(&ctx), Some(2.5));

        // Base and slope come from the threshold table
        t.nervous_pause_base = 0.5;
        t.nervous_pause_slope = 0.5;
        let ctx = ScoringContext::new(&frequent, 0, 60.0, &t);
        assert_eq!(rule.evaluate(&ctx), Some(2.0));
    }

    #[test]
    fn test_semantic_fusion() {
        let t = ScoringThresholds::default();
        let m = metrics(60.0, 0, 0.1, 135);
        let semantic = SemanticAnalysis::new(9.0, 5.0, 5.0);

        let (acoustic, mode) = compute_scores(&m, &[], 60.0, None, &t);
        assert_eq!(mode, FusionMode::AcousticOnly);
        assert_eq!(acoustic.confidence, 6.0);

        let (fused, mode) = compute_scores(&m, &[], 60.0, Some(&semantic), &t);
        assert_eq!(mode, FusionMode::SemanticFused);
        assert_eq!(fused.confidence, 7.2);
        assert_eq!(fused.pacing, acoustic.pacing);
        assert_eq!(fused.nervousness, acoustic.nervousness);
    }

    #[test]
    fn test_content_boost_caps_at_ten() {
        let t = ScoringThresholds::default();
        let m = metrics(30.0, 0, 0.35, 135);
        let semantic = SemanticAnalysis::new(10.0, 10.0, 9.5);
        let (scores, _) = compute_scores(&m, &[], 60.0, Some(&semantic), &t);
        assert_eq!(scores.clarity, 10.0);

        // acoustic clarity 10 (capped), fused 0.5*10 + 0.5*6 = 8.0, boosted 8.8
        let modest = SemanticAnalysis::new(5.0, 6.0, 9.0);
        let (scores, _) = compute_scores(&m, &[], 60.0, Some(&modest), &t);
        assert_eq!(scores.clarity, 8.8);
    }

    #[test]
    fn test_zero_duration_never_panics() {
        let t = ScoringThresholds::default();
        let m = metrics(0.0, 0, 0.0, 0);
        let (scores, _) = compute_scores(&m, &fillers(3), 0.0, None, &t);
        assert_eq!(scores.clarity, 10.0);
        assert!(scores.confidence >= 0.0 && scores.confidence <= 10.0);
    }
}
