pub mod chat;
pub mod config_cmd;
pub mod index;
pub mod notes;
pub mod plan;
pub mod stats;
