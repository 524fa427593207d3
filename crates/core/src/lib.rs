//! # orgassist core
//!
//! Domain types, traits, and error definitions for the orgassist
//! organizational assistant. This crate has **no framework dependencies**;
//! it defines the domain model that all other crates implement against.
//!
//! Every external collaborator (language model, knowledge index, web
//! search, note journal) is a trait here, so the router can be built from
//! real services at startup and from fakes in tests.

pub mod error;
pub mod message;
pub mod provider;
pub mod tool;
pub mod retrieval;
pub mod search;
pub mod note;
pub mod outcome;
pub mod agent;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result};
pub use message::{ChatHistory, ChatTurn, Message, Role};
pub use provider::{Provider, ProviderRequest, ProviderResponse};
pub use tool::{Tool, ToolRegistry, ToolResult};
pub use retrieval::{RetrievalHit, Retriever};
pub use search::SearchBackend;
pub use note::{Note, NoteStore};
pub use outcome::{Metrics, Mode, Outcome};
pub use agent::Route;
