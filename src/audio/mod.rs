//! Audio output module.
//!
//! Provides WAV serialization for rendered buffers and live playback
//! through the system output device.

pub mod playback;
pub mod wav;

// Re-export commonly used items
pub use playback::PlaybackSession;
pub use wav::{encode, HEADER_LEN};
