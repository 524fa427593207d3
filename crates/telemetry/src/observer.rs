//! Observability wrapper around the router.
//!
//! [`Observer::observe`] never fails: any router error becomes the fixed
//! ERROR outcome, and every invocation, successful or not, leaves exactly
//! one record in the interaction log and a `metrics` block on the outcome.

use crate::log::InteractionLog;
use crate::memory::MemorySampler;
use crate::record::InteractionRecord;
use orgassist_core::agent::Route;
use orgassist_core::outcome::{Metrics, Outcome};
use std::time::Instant;
use tracing::{error, info};

pub struct Observer {
    log: InteractionLog,
    sampler: MemorySampler,
}

impl Observer {
    pub fn new(log: InteractionLog, sampler: MemorySampler) -> Self {
        Self { log, sampler }
    }

    pub fn log(&self) -> &InteractionLog {
        &self.log
    }

    pub async fn observe(&self, router: &dyn Route, message: &str, chat_history: &str) -> Outcome {
        let start = Instant::now();

        let (mut outcome, error_message) = match router.route(message, chat_history).await {
            Ok(outcome) => (outcome, None),
            Err(e) => {
                error!(error = %e, "Router failed; returning safe error outcome");
                (Outcome::error(), Some(e.to_string()))
            }
        };

        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
        let memory_mb = self.sampler.sample_mb();

        let record =
            InteractionRecord::from_outcome(message, &outcome, latency_ms, error_message, memory_mb);
        self.log.record(&record).await;

        info!(
            mode = %outcome.mode,
            tool = %outcome.tool,
            latency_ms,
            error = record.error,
            "Interaction observed"
        );

        outcome.metrics = Some(Metrics {
            latency_ms,
            memory_mb,
            error: record.error,
        });
        outcome
    }
}
