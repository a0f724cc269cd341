//! Onset detection
//!
//! Onsets (abrupt rises in short-time energy) serve two consumers:
//! - the tempo estimator, which looks for periodicity in the onset train
//! - the speech-rate estimator, which counts them as a syllable proxy

pub mod energy_flux;

pub use energy_flux::detect_energy_flux_onsets;
