//! Signal preprocessing shared by the feature extractors
//!
//! - Short-time RMS framing
//! - Silence detection (non-silent interval segmentation)

pub mod framing;
pub mod silence;
