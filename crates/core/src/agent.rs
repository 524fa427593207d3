//! The routing seam between the assistant and whatever observes it.

use async_trait::async_trait;
use crate::error::Result;
use crate::outcome::Outcome;

/// Anything that turns a user message (plus rendered history) into an
/// [`Outcome`]. Failures of external collaborators propagate as `Err`.
#[async_trait]
pub trait Route: Send + Sync {
    async fn route(&self, message: &str, chat_history: &str) -> Result<Outcome>;
}
