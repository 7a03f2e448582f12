//! Clew: guarded chat-transcript → structured-recap pipeline.
//!
//! One logical operation is exposed: feed a raw builder/assistant chat log
//! and a session key into [`RecapProcessor::process_transcript`] and get back
//! a schema-valid recap in both machine-readable and narrative form. The
//! transport (REST, CLI, direct call) is the embedder's concern — nothing in
//! this crate assumes HTTP.

pub mod config;
pub mod pipeline;

pub use config::PipelineConfig;
pub use pipeline::processor::{ProcessingError, RecapProcessor, RecapResponse};

use tracing_subscriber::EnvFilter;

/// Initialize tracing for embedders that want log output.
///
/// Respects `RUST_LOG`; safe to call more than once (later calls are no-ops).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}
