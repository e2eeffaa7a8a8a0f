//! Error types for binaural-daemon.
//!
//! Defines all error codes and types used throughout the daemon for
//! consistent error handling and reporting.

use std::fmt;

/// Error codes returned by the daemon in error responses.
///
/// These codes are used in JSON-RPC error responses and allow clients
/// to programmatically handle specific error conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Requested export duration is outside the valid range.
    /// Trigger: Zero, negative, or over the configured cap.
    InvalidDuration,

    /// Sample rate is not usable for rendering.
    /// Trigger: Zero sample rate in tone parameters.
    InvalidSampleRate,

    /// Sample buffer channels have inconsistent lengths.
    /// Trigger: Encoder fed a buffer violating the equal-length invariant.
    ChannelMismatch,

    /// Encoded output would exceed the RIFF container limit.
    /// Trigger: Chunk sizes no longer fit in the 32-bit header fields.
    BufferTooLarge,

    /// Live playback could not be started or adjusted.
    /// Trigger: No output device, or the audio stream failed to build.
    PlaybackFailed,

    /// Export file could not be written.
    /// Trigger: Missing directory, permissions, or disk full.
    ExportFailed,
}

impl ErrorCode {
    /// Returns the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidDuration => "INVALID_DURATION",
            ErrorCode::InvalidSampleRate => "INVALID_SAMPLE_RATE",
            ErrorCode::ChannelMismatch => "CHANNEL_MISMATCH",
            ErrorCode::BufferTooLarge => "BUFFER_TOO_LARGE",
            ErrorCode::PlaybackFailed => "PLAYBACK_FAILED",
            ErrorCode::ExportFailed => "EXPORT_FAILED",
        }
    }

    /// Returns a human-readable description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::InvalidDuration => "Export duration is outside the valid range",
            ErrorCode::InvalidSampleRate => "Sample rate must be greater than zero",
            ErrorCode::ChannelMismatch => "Sample buffer channels have inconsistent lengths",
            ErrorCode::BufferTooLarge => "Encoded output would exceed the RIFF container limit",
            ErrorCode::PlaybackFailed => "Live playback could not be started or adjusted",
            ErrorCode::ExportFailed => "Export file could not be written",
        }
    }

    /// Returns a recovery hint suggesting how to resolve this error.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCode::InvalidDuration => {
                "Choose a duration of at least 1 minute and at most the configured \
                 maximum (default 120 minutes). Long renders are held fully in memory"
            }
            ErrorCode::InvalidSampleRate => {
                "Use the standard 44100 Hz sample rate, or any positive rate"
            }
            ErrorCode::ChannelMismatch => {
                "Synthesize the buffer in one call rather than assembling channels \
                 by hand; all channels must have identical sample counts"
            }
            ErrorCode::BufferTooLarge => {
                "A canonical WAV file caps out just under 4 GiB; render a shorter \
                 duration or split the output into multiple files"
            }
            ErrorCode::PlaybackFailed => {
                "Check that an audio output device is connected and not claimed \
                 exclusively by another application, then try again"
            }
            ErrorCode::ExportFailed => {
                "Verify the output directory exists and is writable, and that \
                 enough disk space is available (about 10 MB per stereo minute)"
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for daemon operations.
#[derive(Debug)]
pub struct GeneratorError {
    /// The error code identifying the type of error.
    pub code: ErrorCode,
    /// Human-readable error message with context.
    pub message: String,
    /// Optional underlying cause of the error.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl GeneratorError {
    /// Creates a new GeneratorError with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new GeneratorError with an underlying cause.
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an INVALID_DURATION error.
    pub fn invalid_duration(seconds: f64, max_minutes: u32) -> Self {
        Self::new(
            ErrorCode::InvalidDuration,
            format!(
                "Invalid duration: {} seconds (must be positive and at most {} minutes)",
                seconds, max_minutes
            ),
        )
    }

    /// Creates an INVALID_SAMPLE_RATE error.
    pub fn invalid_sample_rate(rate: u32) -> Self {
        Self::new(
            ErrorCode::InvalidSampleRate,
            format!("Invalid sample rate: {} Hz", rate),
        )
    }

    /// Creates a CHANNEL_MISMATCH error.
    pub fn channel_mismatch(detail: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ChannelMismatch,
            format!("Channel mismatch: {}", detail.into()),
        )
    }

    /// Creates a BUFFER_TOO_LARGE error.
    pub fn buffer_too_large(frame_len: usize, num_channels: usize) -> Self {
        Self::new(
            ErrorCode::BufferTooLarge,
            format!(
                "Buffer too large: {} frames x {} channels does not fit a WAV header",
                frame_len, num_channels
            ),
        )
    }

    /// Creates a PLAYBACK_FAILED error.
    pub fn playback_failed(reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::PlaybackFailed,
            format!("Playback failed: {}", reason.into()),
        )
    }

    /// Creates an EXPORT_FAILED error.
    pub fn export_failed(reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExportFailed,
            format!("Export failed: {}", reason.into()),
        )
    }
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}. Recovery: {}",
            self.code,
            self.message,
            self.code.recovery_hint()
        )
    }
}

impl std::error::Error for GeneratorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Result type alias using GeneratorError.
pub type Result<T> = std::result::Result<T, GeneratorError>;
