//! Prompt templates.
//!
//! Every model-calling mode starts from the same persona and usage policy
//! ([`SYSTEM`]) and appends its own context block.

use orgassist_core::retrieval::RetrievalHit;

/// Shared persona and usage policy.
pub const SYSTEM: &str = "\
Eres un agente organizacional.
Tienes herramientas para:
- consultar (web/RAG),
- escribir (notas persistentes),
- razonar (calculadora),
y debes mantener coherencia usando contexto previo.

Política de uso:
1) Si la pregunta es sobre la organización o políticas internas, usa primero RAG.
2) Si es información general de la web, usa DuckDuckGo/Wikipedia.
3) Si el usuario pide guardar algo, usa write_note.
4) Si hay cálculos, usa calculator.
Responde en español, con pasos claros y citas de fuentes internas cuando uses RAG (archivo fuente).";

/// Characters of each retrieved chunk shown to the model.
pub const SNIPPET_PREVIEW_CHARS: usize = 200;

/// `- <source>: <first 200 chars>...`
pub fn snippet(hit: &RetrievalHit) -> String {
    let preview: String = hit.content.chars().take(SNIPPET_PREVIEW_CHARS).collect();
    format!("- {}: {}...", hit.source, preview)
}

pub fn rag(chat_history: &str, hits: &[RetrievalHit]) -> String {
    let snippets = hits.iter().map(snippet).collect::<Vec<_>>().join("\n");
    format!(
        "{SYSTEM}\n\n\
         Historial breve:\n{chat_history}\n\n\
         Contexto interno (RAG):\n{snippets}\n\n\
         Instrucción:\n\
         Redacta una respuesta clara apoyándote solo en los fragmentos RAG si son relevantes."
    )
    .trim()
    .to_string()
}

pub fn web(results: &str) -> String {
    format!(
        "{SYSTEM}\n\n\
         Resultados web (DDG):\n{results}\n\n\
         Tarea: sintetiza respuesta útil y breve."
    )
    .trim()
    .to_string()
}

pub fn conversation(chat_history: &str, message: &str) -> String {
    format!(
        "{SYSTEM}\n\n\
         Historial:\n{chat_history}\n\n\
         Usuario: {message}\n\
         Agente:"
    )
    .trim()
    .to_string()
}
