//! Render pipeline for offline export.
//!
//! Validates tone parameters, synthesizes the stereo buffer, and
//! serializes it to WAV bytes. This is the one layer that touches the
//! filesystem; synthesis and encoding stay pure.

use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::audio::wav;
use crate::config::GeneratorConfig;
use crate::error::{GeneratorError, Result};
use crate::synth::synthesize;
use crate::types::ToneParameters;

/// Notice shown when an MP3 export is requested.
///
/// MP3 encoding is not implemented; the "mp3" format label still
/// produces WAV bytes and a `.wav` filename. Surfaced to the user
/// rather than silently relabeling the data.
pub const MP3_EXPORT_NOTICE: &str =
    "MP3 encoding is not available; the file was exported as WAV. \
     Use an external converter for MP3 output.";

/// User-facing export format label.
///
/// Only WAV bytes are ever produced; see [`MP3_EXPORT_NOTICE`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Uncompressed 16-bit PCM WAV
    #[default]
    Wav,
    /// Labeled MP3, exported as WAV (documented limitation)
    Mp3,
}

impl ExportFormat {
    /// Returns the string representation of the format label.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Wav => "wav",
            ExportFormat::Mp3 => "mp3",
        }
    }

    /// Returns the user-visible notice for this format, if any.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            ExportFormat::Wav => None,
            ExportFormat::Mp3 => Some(MP3_EXPORT_NOTICE),
        }
    }
}

/// Renders the tone parameters to a complete WAV byte sequence.
///
/// Validates the parameters against the configured limits, synthesizes
/// both channels, and encodes. Either the full byte sequence is
/// returned or an error; partial output is never produced.
///
/// # Errors
///
/// - `INVALID_DURATION` for a non-positive duration or one over the
///   configured cap
/// - `INVALID_SAMPLE_RATE` for a zero sample rate
pub fn render(params: &ToneParameters, config: &GeneratorConfig) -> Result<Vec<u8>> {
    validate(params, config)?;
    let buffer = synthesize(params);
    wav::encode(&buffer, params.sample_rate_hz)
}

/// Renders the tone parameters and writes the WAV file to `path`.
///
/// Returns the number of bytes written.
pub fn render_to_file(
    params: &ToneParameters,
    config: &GeneratorConfig,
    path: &Path,
) -> Result<u64> {
    let bytes = render(params, config)?;
    std::fs::write(path, &bytes).map_err(|e| {
        GeneratorError::with_source(
            crate::error::ErrorCode::ExportFailed,
            format!("could not write {}", path.display()),
            e,
        )
    })?;
    Ok(bytes.len() as u64)
}

/// Builds the export filename for a parameter set.
///
/// Convention: `<prefix>_<left>-<right>_<minutes>min.wav`. The
/// extension is always `.wav` regardless of the requested format label.
pub fn export_filename(params: &ToneParameters, prefix: &str) -> String {
    format!(
        "{}_{}-{}_{}min.wav",
        prefix,
        params.left_freq_hz,
        params.right_freq_hz,
        params.duration_minutes()
    )
}

/// Checks the parameters the caller is responsible for bounding.
fn validate(params: &ToneParameters, config: &GeneratorConfig) -> Result<()> {
    if params.sample_rate_hz == 0 {
        return Err(GeneratorError::invalid_sample_rate(params.sample_rate_hz));
    }

    if !(params.duration_seconds > 0.0) {
        return Err(GeneratorError::invalid_duration(
            params.duration_seconds,
            config.max_duration_min,
        ));
    }

    if params.duration_seconds > config.max_duration_seconds() {
        return Err(GeneratorError::invalid_duration(
            params.duration_seconds,
            config.max_duration_min,
        ));
    }

    Ok(())
}
