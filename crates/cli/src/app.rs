//! Service wiring shared by the subcommands.
//!
//! Everything external (provider, note journal, knowledge index, search
//! backends, interaction log) is built once here from [`AppConfig`] and
//! handed to the router and observer as trait objects.

use orgassist_agent::{Completion, Planner, Router};
use orgassist_config::AppConfig;
use orgassist_core::note::NoteStore;
use orgassist_core::provider::Provider;
use orgassist_memory::{JsonNoteStore, VectorRetriever};
use orgassist_telemetry::{InteractionLog, MemorySampler, Observer};
use orgassist_tools::{SearchBackends, default_registry};
use std::sync::Arc;
use tracing::info;

pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

pub fn load_config() -> CliResult<AppConfig> {
    Ok(AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?)
}

pub fn completion(config: &AppConfig, provider: Arc<dyn Provider>) -> Completion {
    Completion::new(provider, config.provider.model.as_str())
        .with_temperature(config.provider.temperature)
        .with_max_tokens(config.provider.max_tokens)
}

pub fn planner(config: &AppConfig) -> Planner {
    let provider = orgassist_providers::build_from_config(&config.provider);
    Planner::new(completion(config, provider))
}

pub fn note_store(config: &AppConfig) -> CliResult<Arc<JsonNoteStore>> {
    let store = JsonNoteStore::open(config.storage.notes_path.clone())
        .map_err(|e| format!("Failed to open note store: {e}"))?;
    Ok(Arc::new(store))
}

/// The full conversational stack for `chat`.
pub struct Assistant {
    pub router: Router,
    pub observer: Observer,
    pub planner: Planner,
    pub history_turns: usize,
}

impl Assistant {
    pub fn build(config: &AppConfig) -> CliResult<Self> {
        let provider = orgassist_providers::build_from_config(&config.provider);
        let notes: Arc<dyn NoteStore> = note_store(config)?;

        let retriever = Arc::new(VectorRetriever::new(
            Arc::clone(&provider),
            config.provider.embed_model.as_str(),
            config.retrieval.index_path.clone(),
        ));
        let tools = Arc::new(default_registry(notes, SearchBackends::online()));

        let completion = completion(config, provider);
        let router = Router::new(completion.clone(), retriever, tools)
            .with_top_k(config.retrieval.top_k);

        // An unusable log location is a startup failure, not a per-message one
        let log = InteractionLog::open(config.storage.log_path.clone())?;
        let observer = Observer::new(log, MemorySampler::new());

        info!(
            model = %config.provider.model,
            top_k = config.retrieval.top_k,
            log = %config.storage.log_path.display(),
            "Assistant ready"
        );

        Ok(Self {
            router,
            observer,
            planner: Planner::new(completion),
            history_turns: config.session.history_turns,
        })
    }
}
