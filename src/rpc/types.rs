//! JSON-RPC types for the daemon protocol.

use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::error::{ErrorCode, GeneratorError};
use crate::generation::ExportFormat;

/// JSON-RPC version constant.
pub const JSONRPC_VERSION: &str = "2.0";

/// A JSON-RPC request ID.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RequestId {
    Integer(i64),
    String(String),
}

impl From<i64> for RequestId {
    fn from(id: i64) -> Self {
        RequestId::Integer(id)
    }
}

impl From<String> for RequestId {
    fn from(id: String) -> Self {
        RequestId::String(id)
    }
}

/// A JSON-RPC request wrapper.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub id: RequestId,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// A JSON-RPC response wrapper.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse<T: Serialize> {
    pub jsonrpc: &'static str,
    pub id: RequestId,
    pub result: T,
}

impl<T: Serialize> JsonRpcResponse<T> {
    pub fn new(id: RequestId, result: T) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result,
        }
    }
}

/// A JSON-RPC error response.
#[derive(Debug, Serialize)]
pub struct JsonRpcErrorResponse {
    pub jsonrpc: &'static str,
    pub id: Option<RequestId>,
    pub error: JsonRpcError,
}

impl JsonRpcErrorResponse {
    pub fn new(id: Option<RequestId>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            error,
        }
    }
}

/// A JSON-RPC error object.
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonRpcErrorData>,
}

/// Extended error data for application-specific errors.
#[derive(Debug, Serialize)]
pub struct JsonRpcErrorData {
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_hint: Option<String>,
}

impl JsonRpcError {
    /// Creates a parse error (-32700).
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self {
            code: -32700,
            message: message.into(),
            data: None,
        }
    }

    /// Creates an invalid request error (-32600).
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            code: -32600,
            message: message.into(),
            data: None,
        }
    }

    /// Creates a method not found error (-32601).
    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: format!("Method not found: {}", method),
            data: None,
        }
    }

    /// Creates an invalid params error (-32602).
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: -32602,
            message: message.into(),
            data: None,
        }
    }

    /// Creates an internal error (-32603).
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self {
            code: -32603,
            message: message.into(),
            data: None,
        }
    }

    /// Creates an invalid duration error (-32000).
    pub fn invalid_duration(duration_min: u32, max_min: u32) -> Self {
        Self {
            code: -32000,
            message: "Invalid duration".to_string(),
            data: Some(JsonRpcErrorData {
                error_code: ErrorCode::InvalidDuration.as_str().to_string(),
                details: Some(format!(
                    "Duration {} min is outside valid range of 1-{} minutes",
                    duration_min, max_min
                )),
                recovery_hint: Some(ErrorCode::InvalidDuration.recovery_hint().to_string()),
            }),
        }
    }

    /// Maps a daemon error to the matching JSON-RPC error object.
    pub fn from_generator_error(err: &GeneratorError) -> Self {
        let code = match err.code {
            ErrorCode::InvalidDuration => -32000,
            ErrorCode::InvalidSampleRate => -32001,
            ErrorCode::ChannelMismatch => -32002,
            ErrorCode::PlaybackFailed => -32003,
            ErrorCode::ExportFailed => -32004,
            ErrorCode::BufferTooLarge => -32005,
        };
        Self {
            code,
            message: err.code.description().to_string(),
            data: Some(JsonRpcErrorData {
                error_code: err.code.as_str().to_string(),
                details: Some(err.message.clone()),
                recovery_hint: Some(err.code.recovery_hint().to_string()),
            }),
        }
    }
}

// ============================================================================
// Method parameter and result types
// ============================================================================

/// Parameters for the play method.
#[derive(Debug, Deserialize)]
pub struct PlayParams {
    /// Left-ear frequency in Hz (clamped to 0-1000).
    pub left_freq: f32,

    /// Right-ear frequency in Hz (clamped to 0-1000).
    pub right_freq: f32,

    /// Volume percentage 0-100; defaults to the configured value.
    pub volume_percent: Option<f32>,
}

/// Parameters for the set_frequencies method.
#[derive(Debug, Deserialize)]
pub struct SetFrequenciesParams {
    /// Left-ear frequency in Hz (clamped to 0-1000).
    pub left_freq: f32,

    /// Right-ear frequency in Hz (clamped to 0-1000).
    pub right_freq: f32,
}

/// Parameters for the set_volume method.
#[derive(Debug, Deserialize)]
pub struct SetVolumeParams {
    /// Volume percentage 0-100 (clamped).
    pub volume_percent: f32,
}

/// Parameters for the export method.
#[derive(Debug, Deserialize)]
pub struct ExportParams {
    /// Left-ear frequency in Hz (clamped to 0-1000).
    pub left_freq: f32,

    /// Right-ear frequency in Hz (clamped to 0-1000).
    pub right_freq: f32,

    /// Volume percentage 0-100; defaults to the configured value.
    pub volume_percent: Option<f32>,

    /// Export duration in minutes.
    #[serde(default = "default_duration_min")]
    pub duration_min: u32,

    /// Export format label. MP3 is exported as WAV with a notice.
    #[serde(default)]
    pub format: ExportFormat,

    /// Directory to write into; defaults to the configured output dir.
    pub output_dir: Option<String>,
}

fn default_duration_min() -> u32 {
    10
}

impl ExportParams {
    /// Validates the request parameters against the configured limits.
    pub fn validate(&self, config: &GeneratorConfig) -> Result<(), JsonRpcError> {
        if self.duration_min == 0 || self.duration_min > config.max_duration_min {
            return Err(JsonRpcError::invalid_duration(
                self.duration_min,
                config.max_duration_min,
            ));
        }
        Ok(())
    }
}

/// Playback state returned by play, stop, set_* and get_status.
#[derive(Debug, Serialize)]
pub struct StatusResult {
    /// True while a playback session is active.
    pub playing: bool,

    /// Current left-ear frequency in Hz.
    pub left_freq: f32,

    /// Current right-ear frequency in Hz.
    pub right_freq: f32,

    /// Current volume percentage 0-100.
    pub volume_percent: f32,

    /// Perceived beat frequency in Hz.
    pub beat_freq: f32,
}

/// Response for an export request.
#[derive(Debug, Serialize)]
pub struct ExportResult {
    /// Absolute path to the exported WAV file.
    pub path: String,

    /// Size of the exported file in bytes.
    pub bytes: u64,

    /// Rendered duration in seconds.
    pub duration_sec: f64,

    /// Audio sample rate in Hz.
    pub sample_rate: u32,

    /// Requested format label.
    pub format: String,

    /// User-visible notice when the requested format is not produced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_id_from_int() {
        let id: RequestId = 42.into();
        assert_eq!(id, RequestId::Integer(42));
    }

    #[test]
    fn request_id_from_string() {
        let id: RequestId = "abc".to_string().into();
        assert_eq!(id, RequestId::String("abc".to_string()));
    }

    #[test]
    fn json_rpc_error_codes() {
        assert_eq!(JsonRpcError::parse_error("").code, -32700);
        assert_eq!(JsonRpcError::invalid_request("").code, -32600);
        assert_eq!(JsonRpcError::method_not_found("").code, -32601);
        assert_eq!(JsonRpcError::invalid_params("").code, -32602);
        assert_eq!(JsonRpcError::internal_error("").code, -32603);
        assert_eq!(JsonRpcError::invalid_duration(0, 120).code, -32000);
    }

    #[test]
    fn generator_error_mapping() {
        let err = GeneratorError::playback_failed("no device");
        let rpc = JsonRpcError::from_generator_error(&err);
        assert_eq!(rpc.code, -32003);
        let data = rpc.data.unwrap();
        assert_eq!(data.error_code, "PLAYBACK_FAILED");
        assert!(data.details.unwrap().contains("no device"));
        assert!(data.recovery_hint.is_some());
    }

    #[test]
    fn export_params_defaults() {
        let params: ExportParams =
            serde_json::from_str(r#"{"left_freq":200.0,"right_freq":210.0}"#).unwrap();
        assert_eq!(params.duration_min, 10);
        assert_eq!(params.format, ExportFormat::Wav);
        assert!(params.volume_percent.is_none());
        assert!(params.output_dir.is_none());
    }

    #[test]
    fn export_params_validate_duration() {
        let config = GeneratorConfig::default();
        let mut params: ExportParams =
            serde_json::from_str(r#"{"left_freq":200.0,"right_freq":210.0}"#).unwrap();
        assert!(params.validate(&config).is_ok());

        params.duration_min = 0;
        assert_eq!(params.validate(&config).unwrap_err().code, -32000);

        params.duration_min = config.max_duration_min + 1;
        assert_eq!(params.validate(&config).unwrap_err().code, -32000);
    }

    #[test]
    fn export_params_mp3_format_parses() {
        let params: ExportParams = serde_json::from_str(
            r#"{"left_freq":200.0,"right_freq":210.0,"format":"mp3","duration_min":1}"#,
        )
        .unwrap();
        assert_eq!(params.format, ExportFormat::Mp3);
    }
}
