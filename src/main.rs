//! binaural-daemon: binaural beat tone generator.
//!
//! This binary can run in two modes:
//! - CLI mode: One-shot WAV export for a frequency pair or preset
//! - Daemon mode: JSON-RPC server for frontend integration

use std::time::Instant;

use binaural_daemon::cli::Cli;
use binaural_daemon::config::GeneratorConfig;
use binaural_daemon::error::Result;
use binaural_daemon::generation::render_to_file;
use binaural_daemon::rpc::{run_server, ServerState};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse_args();

    if cli.is_daemon_mode() {
        run_daemon_mode()
    } else if cli.is_cli_mode() {
        run_cli_mode(&cli)
    } else {
        print_usage();
        Ok(())
    }
}

/// Runs the CLI mode for one-shot WAV export.
fn run_cli_mode(cli: &Cli) -> Result<()> {
    let config = GeneratorConfig::from_env();
    let params = cli
        .tone_parameters(&config)
        .expect("frequencies required in CLI mode");
    let output_path = cli.output_path(&params, &config);

    eprintln!("=== binaural-daemon export ===");
    if let Some(preset) = cli.preset {
        eprintln!("Preset: {}", preset.name());
    }
    eprintln!("Left ear: {} Hz", params.left_freq_hz);
    eprintln!("Right ear: {} Hz", params.right_freq_hz);
    eprintln!("Beat: {} Hz", params.beat_frequency_hz());
    eprintln!("Volume: {}%", binaural_daemon::types::clamp_volume_percent(cli.volume));
    eprintln!("Duration: {} min", cli.duration);
    eprintln!("Format: {}", cli.format.as_str());
    eprintln!("Output: {}", output_path.display());
    eprintln!();

    // The format label never changes the encoding; say so up front
    if let Some(notice) = cli.format.notice() {
        eprintln!("Note: {}", notice);
        eprintln!();
    }

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                binaural_daemon::GeneratorError::with_source(
                    binaural_daemon::ErrorCode::ExportFailed,
                    format!("could not create {}", parent.display()),
                    e,
                )
            })?;
        }
    }

    let start_time = Instant::now();
    let bytes = render_to_file(&params, &config, &output_path)?;
    let render_time = start_time.elapsed();

    eprintln!("Export complete!");
    eprintln!("  Time: {:.2}s", render_time.as_secs_f32());
    eprintln!("  Samples per channel: {}", params.sample_count());
    eprintln!("  File size: {} bytes", bytes);
    eprintln!("Saved to: {}", output_path.display());

    Ok(())
}

/// Runs the daemon mode (JSON-RPC server).
fn run_daemon_mode() -> Result<()> {
    eprintln!("=== binaural-daemon JSON-RPC server ===");
    eprintln!("Reading from stdin, writing to stdout.");
    eprintln!("Send JSON-RPC requests to control playback and export.");
    eprintln!();

    let config = GeneratorConfig::from_env();
    if let Some(problem) = config.validate() {
        eprintln!("Warning: invalid configuration ({}), using defaults", problem);
        return run_server(ServerState::new(GeneratorConfig::default()));
    }

    eprintln!("Sample rate: {} Hz", config.sample_rate);
    eprintln!("Max export duration: {} min", config.max_duration_min);
    eprintln!("Output directory: {}", config.effective_output_dir().display());
    eprintln!();

    run_server(ServerState::new(config))
}

/// Prints usage information.
fn print_usage() {
    eprintln!("binaural-daemon: binaural beat tone generator");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  Export a preset (10 minutes by default):");
    eprintln!("    binaural-daemon --preset theta --output theta.wav");
    eprintln!();
    eprintln!("  Export explicit frequencies:");
    eprintln!("    binaural-daemon --left 200 --right 210 --duration 30 --volume 50");
    eprintln!();
    eprintln!("  Daemon mode (JSON-RPC server):");
    eprintln!("    binaural-daemon --daemon");
    eprintln!();
    eprintln!("Run 'binaural-daemon --help' for full options.");
}
