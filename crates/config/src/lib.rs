//! Configuration loading, validation, and management for orgassist.
//!
//! Loads configuration from `~/.orgassist/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.orgassist/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Language-model service settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Knowledge index settings
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Where notes and the interaction log live
    #[serde(default)]
    pub storage: StorageConfig,

    /// Chat session settings
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Root address of the completion service (Ollama), without `/v1`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Completion model
    #[serde(default = "default_model")]
    pub model: String,

    /// Embedding model used for the knowledge index
    #[serde(default = "default_embed_model")]
    pub embed_model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Only needed when pointing at a hosted OpenAI-compatible endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:11434".into()
}
fn default_model() -> String {
    "llama3.1".into()
}
fn default_embed_model() -> String {
    "nomic-embed-text".into()
}
fn default_temperature() -> f32 {
    0.7
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            embed_model: default_embed_model(),
            temperature: default_temperature(),
            max_tokens: None,
            api_key: None,
        }
    }
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("embed_model", &self.embed_model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("api_key", &redact(&self.api_key))
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Hits requested per RAG query
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Directory scanned for `*.md` knowledge documents
    #[serde(default = "default_knowledge_dir")]
    pub knowledge_dir: PathBuf,

    /// Persisted vector index
    #[serde(default = "default_index_path")]
    pub index_path: PathBuf,

    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

fn default_top_k() -> usize {
    4
}
fn default_knowledge_dir() -> PathBuf {
    PathBuf::from("data/knowledge")
}
fn default_index_path() -> PathBuf {
    PathBuf::from("storage/index.json")
}
fn default_chunk_size() -> usize {
    800
}
fn default_chunk_overlap() -> usize {
    100
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            knowledge_dir: default_knowledge_dir(),
            index_path: default_index_path(),
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_notes_path")]
    pub notes_path: PathBuf,

    /// Append-only NDJSON interaction log
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
}

fn default_notes_path() -> PathBuf {
    PathBuf::from("storage/notes.json")
}
fn default_log_path() -> PathBuf {
    PathBuf::from("storage/logs/interactions.jsonl")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            notes_path: default_notes_path(),
            log_path: default_log_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Turns rendered into the history block of each prompt
    #[serde(default = "default_history_turns")]
    pub history_turns: usize,
}

fn default_history_turns() -> usize {
    8
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_turns: default_history_turns(),
        }
    }
}

/// Environment variables recognized as overrides.
pub const ENV_BASE_URL: &str = "OLLAMA_BASE_URL";
pub const ENV_MODEL: &str = "OLLAMA_MODEL";
pub const ENV_EMBED_MODEL: &str = "OLLAMA_EMBED_MODEL";
pub const ENV_TOP_K: &str = "ORGASSIST_TOP_K";

impl AppConfig {
    /// Load configuration from the default path (~/.orgassist/config.toml),
    /// then apply environment overrides:
    /// - `OLLAMA_BASE_URL`
    /// - `OLLAMA_MODEL`
    /// - `OLLAMA_EMBED_MODEL`
    /// - `ORGASSIST_TOP_K`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production, a map in tests).
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.provider.base_url = url;
        }
        if let Some(model) = lookup(ENV_MODEL) {
            self.provider.model = model;
        }
        if let Some(model) = lookup(ENV_EMBED_MODEL) {
            self.provider.embed_model = model;
        }
        if let Some(k) = lookup(ENV_TOP_K) {
            self.retrieval.top_k = k.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!("{ENV_TOP_K} must be a positive integer, got '{k}'"))
            })?;
        }
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".orgassist")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.temperature < 0.0 || self.provider.temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "provider.temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.retrieval.top_k == 0 {
            return Err(ConfigError::ValidationError(
                "retrieval.top_k must be at least 1".into(),
            ));
        }

        if self.retrieval.chunk_overlap >= self.retrieval.chunk_size {
            return Err(ConfigError::ValidationError(
                "retrieval.chunk_overlap must be smaller than retrieval.chunk_size".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.provider.base_url, "http://localhost:11434");
        assert_eq!(config.provider.model, "llama3.1");
        assert_eq!(config.provider.embed_model, "nomic-embed-text");
        assert_eq!(config.retrieval.top_k, 4);
        assert_eq!(config.session.history_turns, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.provider.model, config.provider.model);
        assert_eq!(parsed.storage.log_path, config.storage.log_path);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[provider]\nmodel = \"mistral\"\n\n[retrieval]\ntop_k = 2\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.provider.model, "mistral");
        assert_eq!(config.provider.base_url, "http://localhost:11434");
        assert_eq!(config.retrieval.top_k, 2);
        assert_eq!(config.retrieval.chunk_size, 800);
    }

    #[test]
    fn env_overrides_apply() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_BASE_URL, "http://gpu-box:11434"),
            (ENV_MODEL, "qwen2"),
            (ENV_TOP_K, "6"),
        ]);
        let mut config = AppConfig::default();
        config
            .apply_env(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.provider.base_url, "http://gpu-box:11434");
        assert_eq!(config.provider.model, "qwen2");
        assert_eq!(config.provider.embed_model, "nomic-embed-text");
        assert_eq!(config.retrieval.top_k, 6);
    }

    #[test]
    fn bad_top_k_env_rejected() {
        let mut config = AppConfig::default();
        let result = config.apply_env(|k| (k == ENV_TOP_K).then(|| "many".to_string()));
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn invalid_temperature_rejected() {
        let mut config = AppConfig::default();
        config.provider.temperature = 5.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn overlap_must_be_below_chunk_size() {
        let mut config = AppConfig::default();
        config.retrieval.chunk_overlap = 800;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.provider.model, "llama3.1");
    }

    #[test]
    fn api_key_is_redacted_in_debug() {
        let mut config = AppConfig::default();
        config.provider.api_key = Some("sk-secret".into());
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("llama3.1"));
        assert!(toml_str.contains("interactions.jsonl"));
    }
}
