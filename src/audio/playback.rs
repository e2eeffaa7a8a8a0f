//! Live playback of the binaural tone through the default output device.
//!
//! A [`PlaybackSession`] owns the audio stream for one start/stop cycle.
//! It is constructed on start and torn down on drop, so playback
//! lifetime is tied to the owning caller rather than any global state.
//! Frequency and volume changes take effect on the next callback buffer
//! without rebuilding the stream.
//!
//! Unlike offline rendering, the live oscillators accumulate phase so
//! that frequency changes are click-free. The offline path in
//! [`crate::synth`] stays the pure per-index evaluation that exports
//! depend on.

use std::f32::consts::TAU;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate};

use crate::error::{GeneratorError, Result};

/// Tone parameters shared with the audio callback.
///
/// f32 values are stored as bits in atomics so the callback can read
/// them without locking.
struct SharedTone {
    left_freq_hz: AtomicU32,
    right_freq_hz: AtomicU32,
    volume: AtomicU32,
}

impl SharedTone {
    fn new(left_freq_hz: f32, right_freq_hz: f32, volume: f32) -> Self {
        Self {
            left_freq_hz: AtomicU32::new(left_freq_hz.to_bits()),
            right_freq_hz: AtomicU32::new(right_freq_hz.to_bits()),
            volume: AtomicU32::new(volume.to_bits()),
        }
    }

    fn left_freq_hz(&self) -> f32 {
        f32::from_bits(self.left_freq_hz.load(Ordering::Relaxed))
    }

    fn right_freq_hz(&self) -> f32 {
        f32::from_bits(self.right_freq_hz.load(Ordering::Relaxed))
    }

    fn volume(&self) -> f32 {
        f32::from_bits(self.volume.load(Ordering::Relaxed))
    }

    fn set_frequencies(&self, left_freq_hz: f32, right_freq_hz: f32) {
        self.left_freq_hz
            .store(left_freq_hz.to_bits(), Ordering::Relaxed);
        self.right_freq_hz
            .store(right_freq_hz.to_bits(), Ordering::Relaxed);
    }

    fn set_volume(&self, volume: f32) {
        self.volume.store(volume.to_bits(), Ordering::Relaxed);
    }
}

/// One live playback cycle: stream plus the shared tone parameters.
pub struct PlaybackSession {
    // Held for its lifetime; dropping the stream stops audio output.
    _stream: cpal::Stream,
    tone: Arc<SharedTone>,
    sample_rate: u32,
}

impl PlaybackSession {
    /// Opens the default output device and starts playing the tone.
    ///
    /// Requires a stereo f32 output configuration at the requested
    /// sample rate.
    ///
    /// # Errors
    ///
    /// Returns `PLAYBACK_FAILED` when no output device exists, no
    /// matching configuration is supported, or the stream cannot be
    /// built or started.
    pub fn start(
        left_freq_hz: f32,
        right_freq_hz: f32,
        volume: f32,
        sample_rate: u32,
    ) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| GeneratorError::playback_failed("no output device available"))?;

        let desired_rate = SampleRate(sample_rate);
        let supported_config = device
            .supported_output_configs()
            .map_err(|e| {
                GeneratorError::with_source(
                    crate::error::ErrorCode::PlaybackFailed,
                    "could not query output configurations",
                    e,
                )
            })?
            .find(|config| {
                config.channels() == 2
                    && config.sample_format() == SampleFormat::F32
                    && config.min_sample_rate() <= desired_rate
                    && config.max_sample_rate() >= desired_rate
            })
            .ok_or_else(|| {
                GeneratorError::playback_failed(format!(
                    "no stereo f32 output configuration at {} Hz",
                    sample_rate
                ))
            })?
            .with_sample_rate(desired_rate);

        let tone = Arc::new(SharedTone::new(left_freq_hz, right_freq_hz, volume));
        let callback_tone = Arc::clone(&tone);

        let rate = sample_rate as f32;
        let mut left_phase = 0.0f32;
        let mut right_phase = 0.0f32;

        let err_fn = |err| {
            eprintln!("Audio stream error: {}", err);
        };

        let stream = device
            .build_output_stream(
                &supported_config.into(),
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let left_freq = callback_tone.left_freq_hz();
                    let right_freq = callback_tone.right_freq_hz();
                    let volume = callback_tone.volume();

                    for frame in data.chunks_mut(2) {
                        frame[0] = (left_phase * TAU).sin() * volume;
                        left_phase = (left_phase + left_freq / rate) % 1.0;

                        if let Some(right) = frame.get_mut(1) {
                            *right = (right_phase * TAU).sin() * volume;
                        }
                        right_phase = (right_phase + right_freq / rate) % 1.0;
                    }
                },
                err_fn,
                None,
            )
            .map_err(|e| {
                GeneratorError::with_source(
                    crate::error::ErrorCode::PlaybackFailed,
                    "could not build output stream",
                    e,
                )
            })?;

        stream.play().map_err(|e| {
            GeneratorError::with_source(
                crate::error::ErrorCode::PlaybackFailed,
                "could not start output stream",
                e,
            )
        })?;

        Ok(Self {
            _stream: stream,
            tone,
            sample_rate,
        })
    }

    /// Retunes both channels.
    pub fn set_frequencies(&self, left_freq_hz: f32, right_freq_hz: f32) {
        self.tone.set_frequencies(left_freq_hz, right_freq_hz);
    }

    /// Adjusts the linear gain (0.0-1.0).
    pub fn set_volume(&self, volume: f32) {
        self.tone.set_volume(volume);
    }

    /// Returns the current left-channel frequency in Hz.
    pub fn left_freq_hz(&self) -> f32 {
        self.tone.left_freq_hz()
    }

    /// Returns the current right-channel frequency in Hz.
    pub fn right_freq_hz(&self) -> f32 {
        self.tone.right_freq_hz()
    }

    /// Returns the current linear gain.
    pub fn volume(&self) -> f32 {
        self.tone.volume()
    }

    /// Returns the stream sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Stops playback by consuming the session.
    ///
    /// Equivalent to dropping it; provided for call-site clarity.
    pub fn stop(self) {}
}
