//! ToneParameters type describing one binaural render or playback request.

use serde::{Deserialize, Serialize};

use crate::config::{GeneratorConfig, MAX_FREQUENCY_HZ};

/// Immutable parameter set for one render.
///
/// Constructed fresh per request from CLI arguments or RPC payloads.
/// Frequencies and volume are expected to be clamped at that boundary
/// (see [`clamp_frequency`] and [`clamp_volume_percent`]); synthesis
/// itself accepts any finite values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneParameters {
    /// Frequency of the left-channel tone in Hz (expected 0-1000).
    pub left_freq_hz: f32,

    /// Frequency of the right-channel tone in Hz (expected 0-1000).
    pub right_freq_hz: f32,

    /// Linear gain applied uniformly to both channels (0.0-1.0).
    pub volume: f32,

    /// Render duration in seconds. Strictly positive.
    pub duration_seconds: f64,

    /// Sample rate in Hz. Fixed at 44100 for this system.
    pub sample_rate_hz: u32,
}

impl ToneParameters {
    /// Creates a new parameter set without boundary conversions.
    pub fn new(
        left_freq_hz: f32,
        right_freq_hz: f32,
        volume: f32,
        duration_seconds: f64,
        sample_rate_hz: u32,
    ) -> Self {
        Self {
            left_freq_hz,
            right_freq_hz,
            volume,
            duration_seconds,
            sample_rate_hz,
        }
    }

    /// Creates a parameter set from user-facing units.
    ///
    /// Converts volume percent (0-100) to linear gain and minutes to
    /// seconds, and clamps frequencies and volume to their documented
    /// ranges. Duration is not clamped here; the render pipeline
    /// validates it against the configured cap.
    pub fn from_user_input(
        left_freq_hz: f32,
        right_freq_hz: f32,
        volume_percent: f32,
        duration_min: u32,
        config: &GeneratorConfig,
    ) -> Self {
        Self {
            left_freq_hz: clamp_frequency(left_freq_hz),
            right_freq_hz: clamp_frequency(right_freq_hz),
            volume: clamp_volume_percent(volume_percent) / 100.0,
            duration_seconds: duration_min as f64 * 60.0,
            sample_rate_hz: config.sample_rate,
        }
    }

    /// Returns the perceived beat frequency in Hz.
    pub fn beat_frequency_hz(&self) -> f32 {
        (self.left_freq_hz - self.right_freq_hz).abs()
    }

    /// Returns the per-channel sample count this parameter set renders to.
    pub fn sample_count(&self) -> usize {
        (self.sample_rate_hz as f64 * self.duration_seconds).round() as usize
    }

    /// Returns the duration in whole minutes, rounded down.
    pub fn duration_minutes(&self) -> u32 {
        (self.duration_seconds / 60.0) as u32
    }
}

/// Clamps a tone frequency to the supported [0, 1000] Hz range.
pub fn clamp_frequency(freq_hz: f32) -> f32 {
    freq_hz.clamp(0.0, MAX_FREQUENCY_HZ)
}

/// Clamps a volume percentage to [0, 100].
pub fn clamp_volume_percent(percent: f32) -> f32 {
    percent.clamp(0.0, 100.0)
}
