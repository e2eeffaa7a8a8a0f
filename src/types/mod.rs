//! Core data types for binaural-daemon.
//!
//! Contains the tone parameter set driving synthesis and the named
//! entrainment presets.

mod params;
mod preset;

pub use params::{clamp_frequency, clamp_volume_percent, ToneParameters};
pub use preset::Preset;
