//! JSON-RPC module for daemon communication.
//!
//! Provides the JSON-RPC 2.0 server implementation for:
//! - `play`: Start (or retune) live playback
//! - `stop`: Stop live playback
//! - `set_frequencies`: Adjust tone frequencies during playback
//! - `set_volume`: Adjust volume during playback
//! - `export`: Render the tone to a WAV file
//! - `get_status`: Current playback state
//! - `ping`: Health check
//! - `shutdown`: Graceful shutdown

pub mod methods;
pub mod server;
pub mod types;

// Re-export commonly used types
pub use server::{run_server, ServerState};
pub use types::{
    ExportParams, ExportResult, JsonRpcError, JsonRpcErrorResponse, JsonRpcRequest,
    JsonRpcResponse, PlayParams, RequestId, SetFrequenciesParams, SetVolumeParams, StatusResult,
};
