//! Analysis and result aggregation modules
//!
//! Everything downstream of the waveform:
//! - Prosody aggregation
//! - Filler and semantic inputs
//! - Scoring, timeline markers and recommendations
//! - Result types

pub mod fillers;
pub mod input;
pub mod markers;
pub mod messages;
pub mod metrics;
pub mod recommendations;
pub mod result;
pub mod scoring;
pub mod semantic;
