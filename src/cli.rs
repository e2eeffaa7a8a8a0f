//! CLI argument parser.
//!
//! Provides a command-line interface for one-shot WAV export without
//! the daemon infrastructure, plus the flag that switches into daemon
//! mode.

use std::path::PathBuf;

use clap::Parser;

use crate::config::GeneratorConfig;
use crate::generation::{export_filename, ExportFormat};
use crate::types::{Preset, ToneParameters};

/// binaural-daemon: binaural beat generation with live playback and WAV export
#[derive(Parser, Debug)]
#[command(name = "binaural-daemon")]
#[command(about = "Binaural beat tone generator with live playback and WAV export")]
#[command(version)]
pub struct Cli {
    /// Left-ear frequency in Hz (0-1000); overrides --preset
    #[arg(short, long)]
    pub left: Option<f32>,

    /// Right-ear frequency in Hz (0-1000); overrides --preset
    #[arg(short, long)]
    pub right: Option<f32>,

    /// Named frequency preset
    #[arg(short, long, value_enum)]
    pub preset: Option<Preset>,

    /// Volume percentage (0-100)
    #[arg(short, long, default_value_t = 30.0)]
    pub volume: f32,

    /// Export duration in minutes
    #[arg(short, long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..))]
    pub duration: u32,

    /// Output WAV file path; defaults to the configured directory with
    /// the conventional filename
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Export format label (mp3 is exported as WAV with a notice)
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Wav)]
    pub format: ExportFormat,

    /// Run in daemon mode (JSON-RPC over stdio)
    #[arg(long)]
    pub daemon: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Returns true if running in CLI mode (not daemon mode).
    pub fn is_cli_mode(&self) -> bool {
        !self.daemon && self.frequencies().is_some()
    }

    /// Returns true if running in daemon mode.
    pub fn is_daemon_mode(&self) -> bool {
        self.daemon
    }

    /// Returns the effective (left, right) frequency pair in Hz.
    ///
    /// Explicit frequencies win over a preset. None when neither is
    /// given, which sends main to the usage text.
    pub fn frequencies(&self) -> Option<(f32, f32)> {
        match (self.left, self.right, self.preset) {
            (Some(left), Some(right), _) => Some((left, right)),
            (_, _, Some(preset)) => {
                let (preset_left, preset_right) = preset.frequencies();
                Some((self.left.unwrap_or(preset_left), self.right.unwrap_or(preset_right)))
            }
            _ => None,
        }
    }

    /// Builds the tone parameters from the parsed arguments.
    ///
    /// Returns None when no frequencies were given.
    pub fn tone_parameters(&self, config: &GeneratorConfig) -> Option<ToneParameters> {
        let (left, right) = self.frequencies()?;
        Some(ToneParameters::from_user_input(
            left,
            right,
            self.volume,
            self.duration,
            config,
        ))
    }

    /// Returns the effective output path for a parameter set.
    pub fn output_path(&self, params: &ToneParameters, config: &GeneratorConfig) -> PathBuf {
        if let Some(ref path) = self.output {
            path.clone()
        } else {
            config
                .effective_output_dir()
                .join(export_filename(params, &config.filename_prefix))
        }
    }
}
