//! Semantic scores supplied by the language-model collaborator
//!
//! The collaborator rates the transcript on a 0-10 scale. Any score it
//! omits is treated as neutral (5.0), and the whole record may be absent,
//! in which case scoring runs on acoustic evidence alone.

use serde::{Deserialize, Serialize};

/// Neutral score used for any missing semantic field
pub const NEUTRAL_SCORE: f32 = 5.0;

fn neutral_score() -> f32 {
    NEUTRAL_SCORE
}

/// Content-level assessment of the transcript, each in [0, 10]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SemanticAnalysis {
    /// How assured the wording sounds
    #[serde(default = "neutral_score")]
    pub semantic_confidence: f32,

    /// How clearly ideas are structured
    #[serde(default = "neutral_score")]
    pub semantic_clarity: f32,

    /// Overall content quality
    #[serde(default = "neutral_score")]
    pub content_score: f32,
}

impl Default for SemanticAnalysis {
    fn default() -> Self {
        Self {
            semantic_confidence: NEUTRAL_SCORE,
            semantic_clarity: NEUTRAL_SCORE,
            content_score: NEUTRAL_SCORE,
        }
    }
}

impl SemanticAnalysis {
    /// Create a semantic record, clamping every score into [0, 10]
    pub fn new(semantic_confidence: f32, semantic_clarity: f32, content_score: f32) -> Self {
        Self {
            semantic_confidence,
            semantic_clarity,
            content_score,
        }
        .sanitized()
    }

    /// Copy with each score clamped to [0, 10]; non-finite scores become neutral
    pub fn sanitized(&self) -> Self {
        fn clean(score: f32) -> f32 {
            if score.is_finite() {
                score.clamp(0.0, 10.0)
            } else {
                NEUTRAL_SCORE
            }
        }

        Self {
            semantic_confidence: clean(self.semantic_confidence),
            semantic_clarity: clean(self.semantic_clarity),
            content_score: clean(self.content_score),
        }
    }

    /// Parse a language-model reply into semantic scores
    ///
    /// Accepts a bare JSON object or one wrapped in a Markdown code fence.
    /// Returns `None` when no JSON object can be parsed, so callers fall
    /// back to acoustic-only scoring.
    ///
    /// # Example
    ///
    /// ```
    /// use prosody_coach::analysis::semantic::SemanticAnalysis;
    ///
    /// let reply = "```json\n{\"semantic_confidence\": 8, \"content_score\": 9}\n```";
    /// let parsed = SemanticAnalysis::from_llm_response(reply).unwrap();
    /// assert_eq!(parsed.semantic_confidence, 8.0);
    /// assert_eq!(parsed.semantic_clarity, 5.0);
    /// ```
    pub fn from_llm_response(text: &str) -> Option<Self> {
        let body = strip_code_fence(text.trim());
        let start = body.find('{')?;
        let end = body.rfind('}')?;
        if end < start {
            return None;
        }

        match serde_json::from_str::<SemanticAnalysis>(&body[start..=end]) {
            Ok(parsed) => Some(parsed.sanitized()),
            Err(e) => {
                log::warn!("Unparseable semantic response: {}", e);
                None
            }
        }
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Skip the language tag on the opening fence line
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.rsplit_once("```").map_or(rest, |(body, _)| body).trim()
}

/// Which evidence the confidence and clarity scores were built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FusionMode {
    /// Acoustic features only
    AcousticOnly,

    /// Acoustic features blended with semantic scores
    SemanticFused,
}
