//! Prosodic feature extraction
//!
//! - Pitch tracking (F0 mean and spread)
//! - Onset detection and period estimation (tempo)
//! - Pause detection
//! - Energy variation
//! - Speech rate

pub mod energy;
pub mod onset;
pub mod pauses;
pub mod period;
pub mod pitch;
pub mod speech_rate;
pub mod tempo;
