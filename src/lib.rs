//! binaural-daemon: binaural beat tone generator.
//!
//! Generates two synchronized sine tones, one per stereo channel, whose
//! frequency difference is perceived as a low-frequency beat. The crate
//! supports live playback through the system output device and offline
//! rendering to 16-bit PCM WAV files.
//!
//! # Modules
//!
//! - [`types`]: Core data types (ToneParameters, Preset)
//! - [`synth`]: Pure sine synthesis into a SampleBuffer
//! - [`audio`]: WAV serialization and live playback
//! - [`generation`]: The offline render/export pipeline
//! - [`rpc`]: JSON-RPC server for frontend integration
//! - [`config`]: Runtime configuration (GeneratorConfig)
//! - [`error`]: Error types and codes (GeneratorError, ErrorCode)
//!
//! # Example
//!
//! ```rust
//! use binaural_daemon::{
//!     config::GeneratorConfig,
//!     generation::render,
//!     types::ToneParameters,
//! };
//!
//! let config = GeneratorConfig::default();
//!
//! // One second of a 10 Hz alpha beat at full volume
//! let params = ToneParameters::new(200.0, 210.0, 1.0, 1.0, config.sample_rate);
//! let wav_bytes = render(&params, &config).unwrap();
//! assert_eq!(&wav_bytes[0..4], b"RIFF");
//! ```

pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod rpc;
pub mod synth;
pub mod types;

// Re-export commonly used types at crate root for convenience
pub use audio::PlaybackSession;
pub use config::GeneratorConfig;
pub use error::{ErrorCode, GeneratorError, Result};
pub use generation::{render, render_to_file, ExportFormat};
pub use synth::{synthesize, SampleBuffer};
pub use types::{Preset, ToneParameters};
