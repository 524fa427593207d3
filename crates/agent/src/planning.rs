//! Planning helper — two stateless, single-shot completions.
//!
//! Neither operation loops, retries, caches, or keeps state between calls.

use crate::completion::Completion;
use orgassist_core::error::ProviderError;
use tracing::info;

pub const PLANNER_PERSONA: &str = "\
Eres un planificador de tareas. Dado un objetivo del usuario, descompón en pasos,
elige herramientas (si aplica) y produce un plan numerado claro. Solo planifica, no ejecutes.";

pub const DECIDER_PERSONA: &str = "\
Eres un decisor. Dado un contexto de ejecución y estado, decide:
- si continuar, replanificar, pedir más información o finalizar,
y explica brevemente el por qué.";

pub struct Planner {
    completion: Completion,
}

impl Planner {
    pub fn new(completion: Completion) -> Self {
        Self { completion }
    }

    /// Ask for a plan and return its steps, consistently numbered.
    pub async fn make_plan(&self, goal: &str) -> Result<Vec<String>, ProviderError> {
        let prompt = format!("{PLANNER_PERSONA}\nObjetivo: {goal}\n\nPlan:");
        let raw = self.completion.complete(&prompt).await?;
        let steps = number_steps(&raw);
        info!(steps = steps.len(), "Plan generated");
        Ok(steps)
    }

    /// Ask what to do next given a context summary. The completion text is
    /// returned as-is.
    pub async fn decide(&self, context_summary: &str) -> Result<String, ProviderError> {
        let prompt = format!("{DECIDER_PERSONA}\n\nContexto:\n{context_summary}\n\nDecisión:");
        self.completion.complete(&prompt).await
    }
}

/// Split into trimmed non-empty lines. A line that does not start with a
/// digit becomes `<position>. <line>`; digit-led lines are kept verbatim,
/// even when their numbers clash with the generated ones.
pub fn number_steps(text: &str) -> Vec<String> {
    let mut numbered: Vec<String> = Vec::new();
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.starts_with(|c: char| c.is_ascii_digit()) {
            numbered.push(line.to_string());
        } else {
            numbered.push(format!("{}. {}", numbered.len() + 1, line));
        }
    }
    numbered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{FailingProvider, ScriptedProvider};
    use std::sync::Arc;

    #[test]
    fn unnumbered_lines_are_numbered_by_position() {
        let steps = number_steps("Revisar política\n\n  Redactar borrador  \nEnviar a RR.HH.");
        assert_eq!(
            steps,
            vec!["1. Revisar política", "2. Redactar borrador", "3. Enviar a RR.HH."]
        );
    }

    #[test]
    fn numbered_lines_are_kept_verbatim() {
        let steps = number_steps("1. Uno\nDos\n1) Otra vez uno");
        assert_eq!(steps, vec!["1. Uno", "2. Dos", "1) Otra vez uno"]);
    }

    #[test]
    fn empty_completion_is_empty_plan() {
        assert!(number_steps("  \n\n").is_empty());
    }

    #[tokio::test]
    async fn make_plan_sends_persona_and_goal() {
        let provider = Arc::new(ScriptedProvider::new(["Paso A\n2. Paso B"]));
        let planner = Planner::new(Completion::new(provider.clone(), "llama3.1"));

        let steps = planner.make_plan("organizar onboarding").await.unwrap();
        assert_eq!(steps, vec!["1. Paso A", "2. Paso B"]);

        let prompts = provider.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].starts_with("Eres un planificador de tareas."));
        assert!(prompts[0].ends_with("\nObjetivo: organizar onboarding\n\nPlan:"));
    }

    #[tokio::test]
    async fn decide_returns_raw_text() {
        let provider = Arc::new(ScriptedProvider::new(["  Continuar: todo en orden.\n"]));
        let planner = Planner::new(Completion::new(provider.clone(), "llama3.1"));

        let decision = planner.decide("U:hola\nA:hola").await.unwrap();
        assert_eq!(decision, "  Continuar: todo en orden.\n");
        assert!(provider.prompts()[0].ends_with("Contexto:\nU:hola\nA:hola\n\nDecisión:"));
    }

    #[tokio::test]
    async fn failures_propagate() {
        let planner = Planner::new(Completion::new(Arc::new(FailingProvider), "llama3.1"));
        assert!(planner.make_plan("x").await.is_err());
        assert!(planner.decide("x").await.is_err());
    }
}
