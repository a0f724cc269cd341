//! Error types for the speech analysis engine

use std::fmt;

/// Errors that can occur during speech analysis
///
/// Quiet, short or silent audio is never an error: every extractor has a
/// documented zero fallback. Missing semantic input is not an error either;
/// scoring falls back to acoustic-only weights.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Decoded signal is empty, corrupt, or has an invalid sample rate
    InvalidAudio(String),

    /// Configuration values are inconsistent or out of range
    InvalidConfig(String),

    /// Processing error inside a DSP stage
    ProcessingError(String),

    /// Configuration could not be parsed
    Serialization(String),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::InvalidAudio(msg) => write!(f, "Invalid audio: {}", msg),
            AnalysisError::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
            AnalysisError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
            AnalysisError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for AnalysisError {}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        let err = AnalysisError::InvalidAudio("empty samples".to_string());
        assert_eq!(err.to_string(), "Invalid audio: empty samples");

        let err = AnalysisError::InvalidConfig("hop_size must be > 0".to_string());
        assert!(err.to_string().starts_with("Invalid config"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: AnalysisError = parse_err.into();
        assert!(matches!(err, AnalysisError::Serialization(_)));
    }
}
