//! The router — classifies a message and dispatches it to one capability.
//!
//! Classification is an ordered list of `(predicate, mode)` rules over the
//! lower-cased message; the first rule whose predicate matches *and* whose
//! handler produces an outcome wins. Only the RAG handler may decline (no
//! hits), in which case evaluation continues with the next rule. A message
//! no rule claims goes to the model as plain conversation.
//!
//! Failures of the retriever, the search tools, the note store or the
//! completion service propagate to the caller untouched.

use crate::completion::Completion;
use crate::prompt;
use async_trait::async_trait;
use orgassist_core::agent::Route;
use orgassist_core::outcome::{Mode, NO_TOOL, Outcome};
use orgassist_core::retrieval::Retriever;
use orgassist_core::tool::ToolRegistry;
use orgassist_core::Result;
use orgassist_tools::{CALCULATOR, LIST_NOTES, WEB_SEARCH, WRITE_NOTE};
use std::sync::Arc;
use tracing::{debug, info};

/// Tool name recorded for RAG outcomes.
pub const RETRIEVAL_TOOL: &str = "vectorstore";

pub const DEFAULT_TOP_K: usize = 4;

/// Substrings that mark a question about internal policy.
pub const POLICY_KEYWORDS: [&str; 5] = [
    "política",
    "procedimiento",
    "onboarding",
    "reporte",
    "comunicación interna",
];

/// Substrings that mark a general-knowledge question.
pub const GENERAL_KNOWLEDGE_PHRASES: [&str; 7] = [
    "qué es",
    "quien es",
    "fecha",
    "definición",
    "define",
    "últimas noticias",
    "actualidad",
];

pub const SAVE_PREFIX: &str = "guardar:";

pub const LIST_NOTES_PHRASES: [&str; 3] = ["ver notas", "listar notas", "listar mis notas"];

pub const CALC_PREFIX: &str = "calc:";

/// Text every predicate sees.
pub fn normalize(message: &str) -> String {
    message.to_lowercase()
}

pub fn mentions_internal_policy(normalized: &str) -> bool {
    POLICY_KEYWORDS.iter().any(|k| normalized.contains(k))
}

pub fn asks_general_knowledge(normalized: &str) -> bool {
    GENERAL_KNOWLEDGE_PHRASES.iter().any(|k| normalized.contains(k))
}

pub fn is_save_request(normalized: &str) -> bool {
    normalized.starts_with(SAVE_PREFIX)
}

pub fn is_list_request(normalized: &str) -> bool {
    let trimmed = normalized.trim();
    LIST_NOTES_PHRASES.iter().any(|p| *p == trimmed)
}

pub fn is_calculation(normalized: &str) -> bool {
    normalized.starts_with(CALC_PREFIX)
}

pub type Predicate = fn(&str) -> bool;

/// Classification rules, highest priority first.
pub const RULES: [(Predicate, Mode); 5] = [
    (mentions_internal_policy, Mode::Rag),
    (asks_general_knowledge, Mode::Web),
    (is_save_request, Mode::Write),
    (is_list_request, Mode::Read),
    (is_calculation, Mode::Reason),
];

/// Modes whose predicate matches, in rule order. The router tries them in
/// this order and falls back to [`Mode::Llm`].
pub fn candidate_modes(message: &str) -> Vec<Mode> {
    let normalized = normalize(message);
    let text = normalized.as_str();
    RULES
        .iter()
        .filter(|(applies, _)| applies(text))
        .map(|(_, mode)| *mode)
        .collect()
}

/// Text after the first `:`, trimmed.
fn after_prefix(message: &str) -> &str {
    message.split_once(':').map(|(_, rest)| rest.trim()).unwrap_or("")
}

pub struct Router {
    completion: Completion,
    retriever: Arc<dyn Retriever>,
    tools: Arc<ToolRegistry>,
    top_k: usize,
}

impl Router {
    pub fn new(
        completion: Completion,
        retriever: Arc<dyn Retriever>,
        tools: Arc<ToolRegistry>,
    ) -> Self {
        Self {
            completion,
            retriever,
            tools,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    async fn dispatch(
        &self,
        mode: Mode,
        message: &str,
        chat_history: &str,
        thoughts: &mut Vec<String>,
    ) -> Result<Option<Outcome>> {
        match mode {
            Mode::Rag => self.answer_from_knowledge(message, chat_history, thoughts).await,
            Mode::Web => self.answer_from_web(message, thoughts).await.map(Some),
            Mode::Write => self.save_note(message, thoughts).await.map(Some),
            Mode::Read => self.list_notes(thoughts).await.map(Some),
            Mode::Reason => self.calculate(message, thoughts).await.map(Some),
            Mode::Llm | Mode::Error => Ok(None),
        }
    }

    async fn answer_from_knowledge(
        &self,
        message: &str,
        chat_history: &str,
        thoughts: &mut Vec<String>,
    ) -> Result<Option<Outcome>> {
        thoughts.push("RAG: buscando en memoria de largo plazo…".into());

        let hits = self.retriever.retrieve(message, self.top_k).await?;
        if hits.is_empty() {
            debug!("No knowledge hits; falling through");
            return Ok(None);
        }

        let answer = self.completion.complete(&prompt::rag(chat_history, &hits)).await?;
        let sources = hits.into_iter().map(|h| h.source).collect();

        Ok(Some(
            Outcome::new(Mode::Rag, RETRIEVAL_TOOL, answer)
                .with_thoughts(std::mem::take(thoughts))
                .with_sources(sources),
        ))
    }

    async fn answer_from_web(&self, message: &str, thoughts: &mut Vec<String>) -> Result<Outcome> {
        thoughts.push("Web: probando DuckDuckGo…".into());

        let results = self
            .tools
            .execute(WEB_SEARCH, serde_json::json!({"query": message}))
            .await?;
        let answer = self.completion.complete(&prompt::web(&results.output)).await?;

        Ok(Outcome::new(Mode::Web, WEB_SEARCH, answer).with_thoughts(std::mem::take(thoughts)))
    }

    async fn save_note(&self, message: &str, thoughts: &mut Vec<String>) -> Result<Outcome> {
        thoughts.push("Escritura: guardando nota…".into());

        let text = after_prefix(message);
        let result = self
            .tools
            .execute(WRITE_NOTE, serde_json::json!({"text": text}))
            .await?;

        Ok(Outcome::new(Mode::Write, WRITE_NOTE, result.output)
            .with_thoughts(std::mem::take(thoughts)))
    }

    async fn list_notes(&self, thoughts: &mut Vec<String>) -> Result<Outcome> {
        thoughts.push("Escritura: listando notas…".into());

        let result = self.tools.execute(LIST_NOTES, serde_json::json!({})).await?;

        Ok(Outcome::new(Mode::Read, LIST_NOTES, result.output)
            .with_thoughts(std::mem::take(thoughts)))
    }

    async fn calculate(&self, message: &str, thoughts: &mut Vec<String>) -> Result<Outcome> {
        thoughts.push("Razonamiento: calculadora…".into());

        let expression = after_prefix(message);
        let result = self
            .tools
            .execute(CALCULATOR, serde_json::json!({"expression": expression}))
            .await?;

        Ok(Outcome::new(Mode::Reason, CALCULATOR, result.output)
            .with_thoughts(std::mem::take(thoughts)))
    }

    async fn converse(
        &self,
        message: &str,
        chat_history: &str,
        thoughts: Vec<String>,
    ) -> Result<Outcome> {
        let answer = self
            .completion
            .complete(&prompt::conversation(chat_history, message))
            .await?;
        Ok(Outcome::new(Mode::Llm, NO_TOOL, answer).with_thoughts(thoughts))
    }
}

#[async_trait]
impl Route for Router {
    async fn route(&self, message: &str, chat_history: &str) -> Result<Outcome> {
        let mut thoughts = Vec::new();

        for mode in candidate_modes(message) {
            if let Some(outcome) = self.dispatch(mode, message, chat_history, &mut thoughts).await? {
                info!(mode = %outcome.mode, tool = %outcome.tool, "Message routed");
                return Ok(outcome);
            }
        }

        let outcome = self.converse(message, chat_history, thoughts).await?;
        info!(mode = %outcome.mode, tool = %outcome.tool, "Message routed");
        Ok(outcome)
    }
}
