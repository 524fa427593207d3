//! The interaction record — one immutable log entry per routed message.

use chrono::{DateTime, Utc};
use orgassist_core::outcome::{Mode, Outcome};
use serde::{Deserialize, Serialize};

/// What one router invocation produced and what it cost.
///
/// `error_message` and `memory_mb` serialize as `null` when absent so every
/// line carries the same keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// Completion time (UTC).
    pub timestamp: DateTime<Utc>,
    pub user_message: String,
    pub mode: Mode,
    pub tool: String,
    pub latency_ms: f64,
    pub error: bool,
    pub error_message: Option<String>,
    pub memory_mb: Option<f64>,
    /// Character (not byte) length of the outcome's output.
    pub output_chars: usize,
}

impl InteractionRecord {
    /// Build the record for a finished invocation, timestamped now.
    pub fn from_outcome(
        user_message: &str,
        outcome: &Outcome,
        latency_ms: f64,
        error_message: Option<String>,
        memory_mb: Option<f64>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            user_message: user_message.to_string(),
            mode: outcome.mode,
            tool: outcome.tool.clone(),
            latency_ms,
            error: error_message.is_some(),
            error_message,
            memory_mb,
            output_chars: outcome.output_chars(),
        }
    }
}
