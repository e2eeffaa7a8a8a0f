//! Sine-wave synthesis for binaural tones.
//!
//! Produces the two-channel sample buffer consumed by the WAV encoder.
//! Synthesis is a pure function of the tone parameters: each sample is
//! evaluated directly from its index, with no running oscillator state,
//! so identical parameters always yield bit-identical buffers.

use std::f64::consts::TAU;

use crate::types::ToneParameters;

/// A multi-channel buffer of float samples, nominally in [-1, 1].
///
/// All channels hold the same number of samples; the encoder rejects
/// buffers that violate this.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    channels: Vec<Vec<f32>>,
}

impl SampleBuffer {
    /// Wraps per-channel sample vectors in a buffer.
    pub fn new(channels: Vec<Vec<f32>>) -> Self {
        Self { channels }
    }

    /// Returns the number of channels.
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Returns the sample count of the first channel, or 0 for an empty buffer.
    pub fn frame_len(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Returns the samples of one channel.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    /// Returns all channels in order.
    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }
}

/// Synthesizes the stereo sine buffer for a parameter set.
///
/// For each channel with frequency `f`, sample `i` is
/// `sin(2π · f · i / sample_rate) · volume`. The sine argument is
/// evaluated in f64 and the result stored as f32, matching the
/// precision of the rendered output format. The two channels share
/// only the time base; no other correlation is introduced.
///
/// Out-of-range frequencies or volumes are not rejected here. The sine
/// is well-defined for any finite frequency; range clamping is a
/// boundary concern of the CLI and RPC layers.
pub fn synthesize(params: &ToneParameters) -> SampleBuffer {
    let sample_count = params.sample_count();
    let left = sine_channel(
        params.left_freq_hz,
        params.volume,
        sample_count,
        params.sample_rate_hz,
    );
    let right = sine_channel(
        params.right_freq_hz,
        params.volume,
        sample_count,
        params.sample_rate_hz,
    );
    SampleBuffer::new(vec![left, right])
}

/// Evaluates one sine channel.
fn sine_channel(freq_hz: f32, volume: f32, sample_count: usize, sample_rate_hz: u32) -> Vec<f32> {
    let freq = freq_hz as f64;
    let gain = volume as f64;
    let rate = sample_rate_hz as f64;

    (0..sample_count)
        .map(|i| {
            let t = i as f64 / rate;
            ((TAU * freq * t).sin() * gain) as f32
        })
        .collect()
}
