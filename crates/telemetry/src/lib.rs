//! Interaction telemetry for orgassist.
//!
//! Wraps every routed message with latency and resident-memory measurement,
//! turns router failures into a safe user-facing outcome, appends one NDJSON
//! record per interaction to a durable log, and summarizes that log.

pub mod log;
pub mod memory;
pub mod observer;
pub mod record;
pub mod stats;

pub use log::{InteractionLog, read_records};
pub use memory::MemorySampler;
pub use observer::Observer;
pub use record::InteractionRecord;
pub use stats::{DETAIL_ROWS, InteractionStats, RecentInteractions};

/// Errors from the telemetry subsystem.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("interaction log unavailable at {path}: {reason}")]
    LogUnavailable { path: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}
