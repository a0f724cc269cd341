//! Audio input
//!
//! Decoding lives with the caller; this module only validates and exposes
//! the decoded mono signal.

pub mod waveform;

pub use waveform::Waveform;
