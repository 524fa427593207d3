//! End-to-end integration tests for the orgassist pipeline.
//!
//! These tests wire the real router, note journal, knowledge index and
//! interaction log together on a temporary directory; only the language
//! model and the web search are replaced by scripted fakes.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};

use orgassist_agent::{Completion, Planner, Router};
use orgassist_core::error::{ProviderError, ToolError};
use orgassist_core::message::{ChatHistory, Message};
use orgassist_core::note::NoteStore;
use orgassist_core::outcome::{ERROR_APOLOGY, Mode};
use orgassist_core::provider::{
    EmbeddingRequest, EmbeddingResponse, Provider, ProviderRequest, ProviderResponse,
};
use orgassist_core::retrieval::Retriever;
use orgassist_core::search::SearchBackend;
use orgassist_memory::{JsonNoteStore, TextSplitter, VectorRetriever, build_index};
use orgassist_telemetry::{
    DETAIL_ROWS, InteractionLog, InteractionStats, MemorySampler, Observer, RecentInteractions,
    read_records,
};
use orgassist_tools::calculator::REJECTED;
use orgassist_tools::{SearchBackends, default_registry};
use tempfile::TempDir;

const EMBED_MODEL: &str = "hash-embed";

// ── Fake model ──────────────────────────────────────────────────────────

/// A local model stand-in: scripted completions in order, deterministic
/// bag-of-words embeddings.
struct LocalModel {
    answers: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
    fail_completions: bool,
}

impl LocalModel {
    fn scripted(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().map(|a| a.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
            fail_completions: false,
        }
    }

    fn unreachable() -> Self {
        Self {
            fail_completions: true,
            ..Self::scripted(&[])
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn embedding(text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; 64];
        for word in text.to_lowercase().split_whitespace() {
            let word = word.trim_matches(|c: char| !c.is_alphanumeric());
            let mut h: u32 = 0x811c9dc5;
            for b in word.bytes() {
                h ^= b as u32;
                h = h.wrapping_mul(0x01000193);
            }
            v[h as usize % 64] += 1.0;
        }
        v
    }
}

#[async_trait::async_trait]
impl Provider for LocalModel {
    fn name(&self) -> &str {
        "local_fake"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        if self.fail_completions {
            return Err(ProviderError::Network("connection refused".into()));
        }
        let prompt = request
            .messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        self.prompts.lock().unwrap().push(prompt);

        let answer = self
            .answers
            .lock()
            .unwrap()
            .pop_front()
            .expect("LocalModel ran out of scripted answers");
        Ok(ProviderResponse {
            message: Message::assistant(answer),
            usage: None,
            model: request.model,
        })
    }

    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, ProviderError> {
        Ok(EmbeddingResponse {
            embeddings: request.inputs.iter().map(|t| Self::embedding(t)).collect(),
            model: request.model,
            usage: None,
        })
    }
}

struct CannedSearch(&'static str);

#[async_trait::async_trait]
impl SearchBackend for CannedSearch {
    fn name(&self) -> &str {
        "canned"
    }

    async fn search(&self, _query: &str) -> Result<String, ToolError> {
        Ok(self.0.to_string())
    }
}

// ── Harness ─────────────────────────────────────────────────────────────

struct Harness {
    dir: TempDir,
    model: Arc<LocalModel>,
    retriever: Arc<VectorRetriever>,
    notes: Arc<JsonNoteStore>,
    router: Router,
    observer: Observer,
}

impl Harness {
    async fn new(model: LocalModel, with_knowledge: bool) -> Self {
        let dir = TempDir::new().unwrap();
        let model = Arc::new(model);
        let provider: Arc<dyn Provider> = model.clone();
        let index_path = dir.path().join("storage").join("index.json");

        if with_knowledge {
            let knowledge = dir.path().join("knowledge");
            write_doc(
                &knowledge,
                "politica_vacaciones.md",
                "# Política de vacaciones\n\nCada empleado tiene 15 días de vacaciones al año. \
                 La solicitud se envía con dos semanas de anticipación.",
            );
            write_doc(
                &knowledge,
                "rrhh/onboarding.md",
                "# Procedimiento de onboarding\n\nEl primer día se entregan equipo y credenciales.",
            );
            let (index, report) = build_index(
                provider.as_ref(),
                EMBED_MODEL,
                &knowledge,
                &TextSplitter::new(800, 100),
            )
            .await
            .unwrap();
            assert_eq!(report.documents, 2);
            index.save(&index_path).unwrap();
        }

        let retriever = Arc::new(VectorRetriever::new(
            Arc::clone(&provider),
            EMBED_MODEL,
            index_path,
        ));
        let notes = Arc::new(JsonNoteStore::open(dir.path().join("storage").join("notes.json")).unwrap());
        let search = SearchBackends {
            web: Arc::new(CannedSearch("Resultado web de prueba")),
            encyclopedia: Arc::new(CannedSearch("Page: Prueba\nSummary: Texto")),
        };
        let tools = Arc::new(default_registry(notes.clone(), search));
        let router = Router::new(Completion::new(provider, "fake-model"), retriever.clone(), tools);

        let log = InteractionLog::open(dir.path().join("logs").join("interactions.jsonl")).unwrap();
        let observer = Observer::new(log, MemorySampler::new());

        Self {
            dir,
            model,
            retriever,
            notes,
            router,
            observer,
        }
    }

    async fn ask(&self, message: &str) -> orgassist_core::outcome::Outcome {
        self.observer.observe(&self.router, message, "").await
    }

    fn log_path(&self) -> &Path {
        self.observer.log().path()
    }
}

fn write_doc(root: &Path, relative: &str, text: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, text).unwrap();
}

// ── E2E: Retrieval-augmented answers ────────────────────────────────────

#[tokio::test]
async fn e2e_policy_question_answers_from_knowledge() {
    let h = Harness::new(LocalModel::scripted(&["Son 15 días al año."]), true).await;
    let question = "¿Cuál es la política de vacaciones?";

    let outcome = h.ask(question).await;

    assert_eq!(outcome.mode, Mode::Rag);
    assert_eq!(outcome.tool, "vectorstore");
    assert_eq!(outcome.output, "Son 15 días al año.");

    let hits = h.retriever.retrieve(question, 4).await.unwrap();
    let expected: Vec<String> = hits.iter().map(|hit| hit.source.clone()).collect();
    assert!(!expected.is_empty());
    assert_eq!(outcome.sources, expected);

    let prompts = h.model.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("15 días de vacaciones"));
}

#[tokio::test]
async fn e2e_policy_question_without_index_never_answers_as_rag() {
    let h = Harness::new(LocalModel::scripted(&["Respuesta general."]), false).await;

    let outcome = h.ask("Explícame el procedimiento de compras").await;

    assert_ne!(outcome.mode, Mode::Rag);
    assert_eq!(outcome.mode, Mode::Llm);
    assert!(outcome.sources.is_empty());
    assert!(outcome.thoughts.iter().any(|t| t.starts_with("RAG")));
}

// ── E2E: Notes ──────────────────────────────────────────────────────────

#[tokio::test]
async fn e2e_saved_note_is_listed_and_persisted() {
    let h = Harness::new(LocalModel::scripted(&[]), false).await;

    let saved = h.ask("guardar: comprar café").await;
    assert_eq!(saved.mode, Mode::Write);
    assert!(saved.output.starts_with("Nota guardada: comprar café"));

    let first = h.ask("listar notas").await;
    let second = h.ask("  ver notas  ").await;
    assert_eq!(first.mode, Mode::Read);
    assert!(first.output.contains("comprar café"));
    assert_eq!(first.output, second.output);

    let raw = std::fs::read_to_string(h.notes.path()).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc["notes"][0]["text"], "comprar café");

    let reopened = JsonNoteStore::open(h.notes.path()).unwrap();
    assert_eq!(reopened.list().await.unwrap().len(), 1);
}

// ── E2E: Calculator ─────────────────────────────────────────────────────

#[tokio::test]
async fn e2e_calculator_evaluates_and_rejects() {
    let h = Harness::new(LocalModel::scripted(&[]), false).await;

    let ok = h.ask("calc: 2*(3+4)").await;
    assert_eq!(ok.mode, Mode::Reason);
    assert_eq!(ok.output, "14");

    let rejected = h.ask("calc: rm -rf /").await;
    assert_eq!(rejected.mode, Mode::Reason);
    assert_eq!(rejected.output, REJECTED);
    assert!(!rejected.metrics.unwrap().error);

    assert!(h.model.prompts().is_empty());
}

// ── E2E: Web ────────────────────────────────────────────────────────────

#[tokio::test]
async fn e2e_general_knowledge_goes_to_web_search() {
    let h = Harness::new(LocalModel::scripted(&["Es una prueba."]), false).await;

    let outcome = h.ask("¿Qué es una prueba unitaria?").await;

    assert_eq!(outcome.mode, Mode::Web);
    assert_eq!(outcome.tool, "duckduckgo_search");
    assert!(h.model.prompts()[0].contains("Resultado web de prueba"));
}

// ── E2E: Observability ──────────────────────────────────────────────────

#[tokio::test]
async fn e2e_model_failure_becomes_one_error_record() {
    let h = Harness::new(LocalModel::unreachable(), false).await;

    let outcome = h.ask("Hola, ¿cómo estás?").await;

    assert_eq!(outcome.mode, Mode::Error);
    assert_eq!(outcome.output, ERROR_APOLOGY);
    assert!(outcome.metrics.as_ref().unwrap().error);

    let content = std::fs::read_to_string(h.log_path()).unwrap();
    assert_eq!(content.lines().count(), 1);
    let line: serde_json::Value = serde_json::from_str(content.trim_end()).unwrap();
    assert_eq!(line["error"], true);
    assert_eq!(line["mode"], "ERROR");
    assert_eq!(
        line["error_message"],
        "Provider error: Network error: connection refused"
    );
}

#[tokio::test]
async fn e2e_every_turn_is_logged_with_output_length() {
    let h = Harness::new(LocalModel::scripted(&["Hola, ¿en qué te ayudo?"]), false).await;
    let mut history = ChatHistory::new();

    for message in ["Hola", "guardar: revisar informe", "listar notas", "calc: 10/4"] {
        let outcome = h
            .observer
            .observe(&h.router, message, &history.render(8))
            .await;
        history.push(message, outcome.output.as_str());
    }

    let records = read_records(h.log_path()).unwrap();
    assert_eq!(records.len(), 4);
    for (record, turn) in records.iter().zip(&history.turns) {
        assert_eq!(record.user_message, turn.user);
        assert_eq!(record.output_chars, turn.assistant.chars().count());
        assert!(!record.error);
    }
    assert_eq!(history.turns[3].assistant, "2.5");

    let stats = InteractionStats::from_records(&records);
    assert_eq!(stats.count, 4);
    assert_eq!(stats.error_rate_pct, 0.0);
    assert_eq!(stats.by_mode.len(), 4);
    assert!(h.dir.path().join("logs").is_dir());

    let recent = RecentInteractions::new(&records, DETAIL_ROWS);
    assert_eq!(recent.len(), 4);
    let table = recent.to_string();
    assert!(table.contains("calc: 10/4"));
    assert!(table.contains("write_note"));
}

// ── E2E: Planning ───────────────────────────────────────────────────────

#[tokio::test]
async fn e2e_plan_steps_are_numbered() {
    let model = Arc::new(LocalModel::scripted(&[
        "Reunir métricas\n\n2. Redactar borrador\nEnviar a dirección",
        "Continuar: el plan está completo.",
    ]));
    let planner = Planner::new(Completion::new(model.clone(), "fake-model"));

    let steps = planner.make_plan("Preparar reporte semanal").await.unwrap();
    assert_eq!(
        steps,
        vec!["1. Reunir métricas", "2. Redactar borrador", "3. Enviar a dirección"]
    );

    let decision = planner.decide("Historial breve:\nU:hola\nA:hola").await.unwrap();
    assert_eq!(decision, "Continuar: el plan está completo.");

    let prompts = model.prompts();
    assert!(prompts[0].contains("Objetivo: Preparar reporte semanal"));
    assert!(prompts[1].contains("Contexto:\nHistorial breve:"));
}
