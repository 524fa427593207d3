//! Outcome — what a single routed message produces.
//!
//! An outcome is created fresh per invocation and owned by the caller. It is
//! persisted only through the interaction record the observer derives from it.

use serde::{Deserialize, Serialize};

/// The user-facing text substituted for any unexpected failure.
pub const ERROR_APOLOGY: &str =
    "Ocurrió un error interno al ejecutar el agente. Revisa los logs de observabilidad.";

/// Tool name recorded when no tool was involved.
pub const NO_TOOL: &str = "none";

/// The dispatch category chosen for a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    /// Answer grounded in retrieved internal knowledge
    Rag,
    /// Answer synthesized from web search results
    Web,
    /// Note persisted
    Write,
    /// Notes listed
    Read,
    /// Arithmetic evaluated
    Reason,
    /// Free-form completion
    Llm,
    /// Safe fallback after a failure
    Error,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rag => "RAG",
            Self::Web => "WEB",
            Self::Write => "WRITE",
            Self::Read => "READ",
            Self::Reason => "REASON",
            Self::Llm => "LLM",
            Self::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Measurements attached by the observer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub latency_ms: f64,
    pub memory_mb: Option<f64>,
    pub error: bool,
}

/// The structured result of routing one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// Exactly one mode per outcome
    pub mode: Mode,

    /// Name of the capability used ("none" for plain completions)
    pub tool: String,

    /// Ordered trace of what the router did
    #[serde(default)]
    pub thoughts: Vec<String>,

    /// Text shown to the user
    pub output: String,

    /// Source identifiers of retrieved hits, in retrieval order (RAG only)
    #[serde(default)]
    pub sources: Vec<String>,

    /// Filled in by the observer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
}

impl Outcome {
    pub fn new(mode: Mode, tool: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            mode,
            tool: tool.into(),
            thoughts: Vec::new(),
            output: output.into(),
            sources: Vec::new(),
            metrics: None,
        }
    }

    /// The fixed outcome shown when routing fails.
    pub fn error() -> Self {
        Self::new(Mode::Error, NO_TOOL, ERROR_APOLOGY)
    }

    pub fn with_thoughts(mut self, thoughts: Vec<String>) -> Self {
        self.thoughts = thoughts;
        self
    }

    pub fn with_sources(mut self, sources: Vec<String>) -> Self {
        self.sources = sources;
        self
    }

    /// Length of the output in characters (not bytes).
    pub fn output_chars(&self) -> usize {
        self.output.chars().count()
    }
}
