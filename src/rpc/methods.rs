//! JSON-RPC method handlers.
//!
//! Implements the handlers for all supported JSON-RPC methods. The
//! playback contract is no-op-safe: stop and the set_* methods succeed
//! when no session is active, reporting the idle state instead of
//! erroring.

use std::path::PathBuf;

use crate::audio::PlaybackSession;
use crate::generation::{export_filename, render_to_file};
use crate::types::{clamp_frequency, clamp_volume_percent, ToneParameters};

use super::server::ServerState;
use super::types::{
    ExportParams, ExportResult, JsonRpcError, PlayParams, SetFrequenciesParams, SetVolumeParams,
    StatusResult,
};

/// Handles a JSON-RPC method call.
pub fn handle_request(
    method: &str,
    params: serde_json::Value,
    state: &mut ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    match method {
        "play" => handle_play(params, state),
        "stop" => handle_stop(state),
        "set_frequencies" => handle_set_frequencies(params, state),
        "set_volume" => handle_set_volume(params, state),
        "export" => handle_export(params, state),
        "get_status" => handle_get_status(state),
        "ping" => handle_ping(),
        "shutdown" => handle_shutdown(state),
        _ => Err(JsonRpcError::method_not_found(method)),
    }
}

/// Handles the ping method for health checks.
fn handle_ping() -> Result<serde_json::Value, JsonRpcError> {
    Ok(serde_json::json!({ "status": "ok" }))
}

/// Handles the shutdown method.
fn handle_shutdown(state: &mut ServerState) -> Result<serde_json::Value, JsonRpcError> {
    if let Some(session) = state.session.take() {
        session.stop();
    }
    state.shutdown();
    Ok(serde_json::json!({ "status": "shutting_down" }))
}

/// Handles the play method.
///
/// Starts a playback session, or retunes the existing one when already
/// playing.
fn handle_play(
    params: serde_json::Value,
    state: &mut ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: PlayParams = serde_json::from_value(params)
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {}", e)))?;

    let left = clamp_frequency(params.left_freq);
    let right = clamp_frequency(params.right_freq);
    let volume_percent = clamp_volume_percent(
        params
            .volume_percent
            .unwrap_or(state.config.default_volume_percent),
    );
    let volume = volume_percent / 100.0;

    match &state.session {
        Some(session) => {
            session.set_frequencies(left, right);
            session.set_volume(volume);
        }
        None => {
            let session = PlaybackSession::start(left, right, volume, state.config.sample_rate)
                .map_err(|e| JsonRpcError::from_generator_error(&e))?;
            eprintln!(
                "Playback started: {} Hz / {} Hz at {}%",
                left, right, volume_percent
            );
            state.session = Some(session);
        }
    }

    status_json(state)
}

/// Handles the stop method. No-op when nothing is playing.
fn handle_stop(state: &mut ServerState) -> Result<serde_json::Value, JsonRpcError> {
    if let Some(session) = state.session.take() {
        session.stop();
        eprintln!("Playback stopped");
    }
    status_json(state)
}

/// Handles the set_frequencies method. No-op when nothing is playing.
fn handle_set_frequencies(
    params: serde_json::Value,
    state: &mut ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: SetFrequenciesParams = serde_json::from_value(params)
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {}", e)))?;

    if let Some(session) = &state.session {
        session.set_frequencies(
            clamp_frequency(params.left_freq),
            clamp_frequency(params.right_freq),
        );
    }
    status_json(state)
}

/// Handles the set_volume method. No-op when nothing is playing.
fn handle_set_volume(
    params: serde_json::Value,
    state: &mut ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: SetVolumeParams = serde_json::from_value(params)
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {}", e)))?;

    if let Some(session) = &state.session {
        session.set_volume(clamp_volume_percent(params.volume_percent) / 100.0);
    }
    status_json(state)
}

/// Handles the export method.
///
/// Renders synchronously; the caller sees the response when the file
/// is fully written.
fn handle_export(
    params: serde_json::Value,
    state: &mut ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: ExportParams = serde_json::from_value(params)
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {}", e)))?;

    params.validate(&state.config)?;

    let volume_percent = params
        .volume_percent
        .unwrap_or(state.config.default_volume_percent);
    let tone = ToneParameters::from_user_input(
        params.left_freq,
        params.right_freq,
        volume_percent,
        params.duration_min,
        &state.config,
    );

    let output_dir = params
        .output_dir
        .map(PathBuf::from)
        .unwrap_or_else(|| state.config.effective_output_dir());
    std::fs::create_dir_all(&output_dir).map_err(|e| {
        JsonRpcError::from_generator_error(&crate::error::GeneratorError::with_source(
            crate::error::ErrorCode::ExportFailed,
            format!("could not create {}", output_dir.display()),
            e,
        ))
    })?;

    let path = output_dir.join(export_filename(&tone, &state.config.filename_prefix));

    eprintln!(
        "Exporting {} min at {} Hz / {} Hz to {}",
        params.duration_min,
        tone.left_freq_hz,
        tone.right_freq_hz,
        path.display()
    );

    let bytes = render_to_file(&tone, &state.config, &path)
        .map_err(|e| JsonRpcError::from_generator_error(&e))?;

    let result = ExportResult {
        path: path.to_string_lossy().to_string(),
        bytes,
        duration_sec: tone.duration_seconds,
        sample_rate: tone.sample_rate_hz,
        format: params.format.as_str().to_string(),
        notice: params.format.notice().map(String::from),
    };

    serde_json::to_value(result)
        .map_err(|e| JsonRpcError::internal_error(format!("Serialization failed: {}", e)))
}

/// Handles the get_status method.
fn handle_get_status(state: &mut ServerState) -> Result<serde_json::Value, JsonRpcError> {
    status_json(state)
}

/// Builds the playback status result from the current state.
fn status_json(state: &ServerState) -> Result<serde_json::Value, JsonRpcError> {
    let result = match &state.session {
        Some(session) => StatusResult {
            playing: true,
            left_freq: session.left_freq_hz(),
            right_freq: session.right_freq_hz(),
            volume_percent: session.volume() * 100.0,
            beat_freq: (session.left_freq_hz() - session.right_freq_hz()).abs(),
        },
        None => StatusResult {
            playing: false,
            left_freq: 0.0,
            right_freq: 0.0,
            volume_percent: 0.0,
            beat_freq: 0.0,
        },
    };

    serde_json::to_value(result)
        .map_err(|e| JsonRpcError::internal_error(format!("Serialization failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;

    // Playback-starting paths need a real output device, so tests cover
    // the no-op contract and the export path.

    fn test_state(output_dir: Option<std::path::PathBuf>) -> ServerState {
        ServerState::new(GeneratorConfig {
            output_dir,
            ..GeneratorConfig::default()
        })
    }

    #[test]
    fn stop_when_idle_is_noop() {
        let mut state = test_state(None);
        let result = handle_request("stop", serde_json::Value::Null, &mut state).unwrap();
        assert_eq!(result["playing"], false);
    }

    #[test]
    fn set_frequencies_when_idle_is_noop() {
        let mut state = test_state(None);
        let params = serde_json::json!({ "left_freq": 200.0, "right_freq": 210.0 });
        let result = handle_request("set_frequencies", params, &mut state).unwrap();
        assert_eq!(result["playing"], false);
    }

    #[test]
    fn set_volume_when_idle_is_noop() {
        let mut state = test_state(None);
        let params = serde_json::json!({ "volume_percent": 50.0 });
        let result = handle_request("set_volume", params, &mut state).unwrap();
        assert_eq!(result["playing"], false);
    }

    #[test]
    fn get_status_when_idle() {
        let mut state = test_state(None);
        let result = handle_request("get_status", serde_json::Value::Null, &mut state).unwrap();
        assert_eq!(result["playing"], false);
        assert_eq!(result["beat_freq"], 0.0);
    }

    #[test]
    fn export_writes_wav_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = test_state(Some(dir.path().to_path_buf()));
        let params = serde_json::json!({
            "left_freq": 200.0,
            "right_freq": 210.0,
            "volume_percent": 100.0,
            "duration_min": 1
        });

        let result = handle_request("export", params, &mut state).unwrap();
        assert_eq!(result["sample_rate"], 44100);
        assert_eq!(result["duration_sec"], 60.0);
        assert_eq!(result["format"], "wav");
        assert!(result.get("notice").is_none());

        let path = std::path::PathBuf::from(result["path"].as_str().unwrap());
        assert!(path.ends_with("binaural_200-210_1min.wav"));
        assert!(path.exists());
        assert_eq!(
            result["bytes"].as_u64().unwrap(),
            std::fs::metadata(&path).unwrap().len()
        );
    }

    #[test]
    fn export_mp3_label_returns_wav_with_notice() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = test_state(Some(dir.path().to_path_buf()));
        let params = serde_json::json!({
            "left_freq": 856.0,
            "right_freq": 856.0,
            "duration_min": 1,
            "format": "mp3"
        });

        let result = handle_request("export", params, &mut state).unwrap();
        assert_eq!(result["format"], "mp3");
        assert!(result["notice"].as_str().unwrap().contains("WAV"));
        // The file itself is always WAV
        assert!(result["path"].as_str().unwrap().ends_with(".wav"));
    }

    #[test]
    fn export_rejects_zero_duration() {
        let mut state = test_state(None);
        let params = serde_json::json!({
            "left_freq": 200.0,
            "right_freq": 210.0,
            "duration_min": 0
        });
        let err = handle_request("export", params, &mut state).unwrap_err();
        assert_eq!(err.code, -32000);
    }

    #[test]
    fn export_clamps_frequencies() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = test_state(Some(dir.path().to_path_buf()));
        let params = serde_json::json!({
            "left_freq": -5.0,
            "right_freq": 5000.0,
            "duration_min": 1
        });

        let result = handle_request("export", params, &mut state).unwrap();
        let path = result["path"].as_str().unwrap();
        assert!(path.ends_with("binaural_0-1000_1min.wav"));
    }

    #[test]
    fn invalid_params_are_rejected() {
        let mut state = test_state(None);
        let err = handle_request("play", serde_json::json!({}), &mut state).unwrap_err();
        assert_eq!(err.code, -32602);
    }

    #[test]
    fn unknown_method_is_rejected() {
        let mut state = test_state(None);
        let err = handle_request("generate", serde_json::Value::Null, &mut state).unwrap_err();
        assert_eq!(err.code, -32601);
    }
}
