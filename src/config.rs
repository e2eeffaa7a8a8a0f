//! Daemon configuration module.
//!
//! Contains the runtime configuration for binaural-daemon, including
//! rendering parameters, boundary clamp ranges, and output paths.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Standard audio sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Upper bound for a manually entered tone frequency in Hz.
pub const MAX_FREQUENCY_HZ: f32 = 1000.0;

/// Runtime configuration for the daemon.
///
/// This configuration is typically loaded from command-line arguments
/// or environment variables at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Sample rate for both live playback and offline rendering.
    pub sample_rate: u32,

    /// Maximum export duration in minutes.
    /// Renders are fully materialized in memory, so this bounds allocation
    /// (a stereo minute at 44100 Hz is roughly 10 MB of WAV output).
    pub max_duration_min: u32,

    /// Default playback volume as a percentage (0-100).
    pub default_volume_percent: f32,

    /// Directory for exported audio files.
    /// If None, uses the platform-specific default location.
    pub output_dir: Option<PathBuf>,

    /// Prefix for exported filenames
    /// (`<prefix>_<left>-<right>_<minutes>min.wav`).
    pub filename_prefix: String,
}

impl GeneratorConfig {
    /// Creates a new GeneratorConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a GeneratorConfig from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `BINAURAL_OUTPUT_DIR` - Directory for exported files
    /// - `BINAURAL_MAX_DURATION_MIN` - Maximum export duration in minutes
    /// - `BINAURAL_FILENAME_PREFIX` - Exported filename prefix
    ///
    /// Falls back to defaults for unset variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("BINAURAL_OUTPUT_DIR") {
            config.output_dir = Some(PathBuf::from(path));
        }

        if let Ok(max_str) = std::env::var("BINAURAL_MAX_DURATION_MIN") {
            if let Ok(max) = max_str.parse::<u32>() {
                if max > 0 {
                    config.max_duration_min = max;
                }
            }
        }

        if let Ok(prefix) = std::env::var("BINAURAL_FILENAME_PREFIX") {
            if !prefix.is_empty() {
                config.filename_prefix = prefix;
            }
        }

        config
    }

    /// Returns the effective output directory, using platform defaults if not specified.
    pub fn effective_output_dir(&self) -> PathBuf {
        if let Some(ref path) = self.output_dir {
            path.clone()
        } else {
            default_output_dir()
        }
    }

    /// Returns the maximum export duration in seconds.
    pub fn max_duration_seconds(&self) -> f64 {
        self.max_duration_min as f64 * 60.0
    }

    /// Validates the configuration.
    ///
    /// Returns an error message if validation fails, None otherwise.
    pub fn validate(&self) -> Option<String> {
        if self.sample_rate == 0 {
            return Some("sample_rate must be > 0".to_string());
        }

        if self.max_duration_min == 0 {
            return Some("max_duration_min must be > 0".to_string());
        }

        if !(0.0..=100.0).contains(&self.default_volume_percent) {
            return Some(format!(
                "default_volume_percent out of range: {} (must be 0-100)",
                self.default_volume_percent
            ));
        }

        if self.filename_prefix.is_empty() {
            return Some("filename_prefix must not be empty".to_string());
        }

        None
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            max_duration_min: 120,
            default_volume_percent: 30.0,
            output_dir: None,
            filename_prefix: "binaural".to_string(),
        }
    }
}

/// Returns the platform-specific default export directory.
///
/// Uses the `directories` crate to find appropriate locations:
/// - macOS: ~/Music or home directory
/// - Linux: ~/Music or home directory
/// - Windows: C:\Users\<user>\Music
fn default_output_dir() -> PathBuf {
    if let Some(user_dirs) = directories::UserDirs::new() {
        if let Some(audio) = user_dirs.audio_dir() {
            return audio.to_path_buf();
        }
        return user_dirs.home_dir().to_path_buf();
    }
    // Fallback to current directory
    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = GeneratorConfig::new();
        assert_eq!(config.sample_rate, 44100);
        assert_eq!(config.max_duration_min, 120);
        assert_eq!(config.default_volume_percent, 30.0);
        assert_eq!(config.filename_prefix, "binaural");
    }

    #[test]
    fn config_validation() {
        let mut config = GeneratorConfig::new();
        assert!(config.validate().is_none());

        config.sample_rate = 0;
        assert!(config.validate().is_some());

        config.sample_rate = 44100;
        config.max_duration_min = 0;
        assert!(config.validate().is_some());

        config.max_duration_min = 60;
        config.default_volume_percent = 150.0;
        assert!(config.validate().is_some());

        config.default_volume_percent = 30.0;
        config.filename_prefix = String::new();
        assert!(config.validate().is_some());
    }

    #[test]
    fn effective_output_dir_not_empty() {
        let config = GeneratorConfig::new();
        assert!(!config.effective_output_dir().as_os_str().is_empty());

        let explicit = GeneratorConfig {
            output_dir: Some(PathBuf::from("/tmp/out")),
            ..GeneratorConfig::default()
        };
        assert_eq!(explicit.effective_output_dir(), PathBuf::from("/tmp/out"));
    }

    // All BINAURAL_* assertions live in one test so parallel test
    // threads never race on the process environment.
    #[test]
    fn from_env_overrides() {
        std::env::set_var("BINAURAL_OUTPUT_DIR", "/tmp/binaural-out");
        std::env::set_var("BINAURAL_MAX_DURATION_MIN", "45");
        std::env::set_var("BINAURAL_FILENAME_PREFIX", "session");

        let config = GeneratorConfig::from_env();
        assert_eq!(config.output_dir, Some(PathBuf::from("/tmp/binaural-out")));
        assert_eq!(config.max_duration_min, 45);
        assert_eq!(config.filename_prefix, "session");

        // Rejected values fall back to defaults.
        std::env::set_var("BINAURAL_MAX_DURATION_MIN", "0");
        std::env::set_var("BINAURAL_FILENAME_PREFIX", "");
        let config = GeneratorConfig::from_env();
        assert_eq!(config.max_duration_min, 120);
        assert_eq!(config.filename_prefix, "binaural");

        std::env::set_var("BINAURAL_MAX_DURATION_MIN", "not-a-number");
        let config = GeneratorConfig::from_env();
        assert_eq!(config.max_duration_min, 120);

        std::env::remove_var("BINAURAL_OUTPUT_DIR");
        std::env::remove_var("BINAURAL_MAX_DURATION_MIN");
        std::env::remove_var("BINAURAL_FILENAME_PREFIX");

        let config = GeneratorConfig::from_env();
        assert_eq!(config.output_dir, None);
        assert_eq!(config.max_duration_min, 120);
        assert_eq!(config.filename_prefix, "binaural");
    }

    #[test]
    fn max_duration_seconds_conversion() {
        let config = GeneratorConfig {
            max_duration_min: 2,
            ..GeneratorConfig::default()
        };
        assert_eq!(config.max_duration_seconds(), 120.0);
    }
}
