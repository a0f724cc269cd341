//! Inputs produced outside the acoustic pipeline

use super::fillers::FillerWord;
use super::semantic::SemanticAnalysis;
use serde::{Deserialize, Serialize};

/// What the transcription and language-model collaborators produced
///
/// Every field is optional: no fillers, no transcript and no semantic
/// scores is a valid acoustic-only request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptInput {
    /// Filler words located in the audio
    pub fillers: Vec<FillerWord>,

    /// Full transcript, passed through to the result
    pub transcription: Option<String>,

    /// Content-level scores
    pub semantic: Option<SemanticAnalysis>,
}

impl TranscriptInput {
    /// Input carrying only filler words
    pub fn with_fillers(fillers: Vec<FillerWord>) -> Self {
        Self {
            fillers,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_acoustic_only() {
        let input: TranscriptInput = serde_json::from_str("{}").unwrap();
        assert_eq!(input, TranscriptInput::default());
    }

    #[test]
    fn test_partial_semantic_block() {
        let input: TranscriptInput = serde_json::from_str(
            r#"{"fillers":[{"word":"um","start":1.0,"end":1.2,"confidence":0.9}],
                "semantic":{"semantic_confidence":8.0}}"#,
        )
        .unwrap();
        assert_eq!(input.fillers.len(), 1);
        let semantic = input.semantic.unwrap();
        assert_eq!(semantic.semantic_confidence, 8.0);
        assert_eq!(semantic.content_score, 5.0);
    }
}
