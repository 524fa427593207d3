//! The orgassist agent — the request router and its helpers.
//!
//! A message flows through the [`Router`]:
//!
//! 1. **Classify** the lower-cased message against ordered keyword rules
//! 2. **Gather** what the chosen mode needs (knowledge hits, web results,
//!    the note journal, a calculator result)
//! 3. **Prompt** the model when the mode needs one
//! 4. **Return** a structured [`Outcome`](orgassist_core::Outcome) with
//!    provenance
//!
//! The [`Planner`] is independent of the router: plan decomposition and
//! next-step decisions are single isolated completions.

pub mod completion;
pub mod planning;
pub mod prompt;
pub mod router;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use completion::Completion;
pub use planning::{Planner, number_steps};
pub use router::{Router, candidate_modes};
