//! Offline rendering module.
//!
//! Ties synthesis and WAV encoding into the export pipeline.

mod pipeline;

pub use pipeline::{
    export_filename, render, render_to_file, ExportFormat, MP3_EXPORT_NOTICE,
};
