//! `orgassist chat` — Interactive or single-message chat mode.
//!
//! Every message goes through the observer, so each turn is timed, logged
//! and can never abort the session. Inside the interactive loop two extra
//! commands are available: `/plan <objetivo>` and `/decidir`.

use crate::app::{Assistant, CliResult, load_config};
use orgassist_core::message::ChatHistory;
use orgassist_core::outcome::Outcome;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Turns summarized for `/decidir`.
const DECISION_TURNS: usize = 3;

pub async fn run(message: Option<String>, show_thoughts: bool) -> CliResult {
    let config = load_config()?;
    let assistant = Assistant::build(&config)?;
    let mut history = ChatHistory::new();

    if let Some(msg) = message {
        let outcome = ask(&assistant, &mut history, &msg).await;
        print_outcome(&outcome, show_thoughts);
        return Ok(());
    }

    println!();
    println!("  orgassist — modo interactivo");
    println!("  Modelo:  {}", config.provider.model);
    println!();
    println!("  Comandos útiles:");
    println!("    guardar: <texto>     guarda una nota");
    println!("    listar notas         o 'ver notas'");
    println!("    calc: 2*(3+4)");
    println!("    /plan <objetivo>     genera un plan");
    println!("    /decidir             sugiere el siguiente paso");
    println!("    salir                termina la sesión");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt()?;

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        match input {
            "" => {}
            "exit" | "salir" => break,
            "/decidir" => {
                let context = decision_context(&history);
                match assistant.planner.decide(&context).await {
                    Ok(decision) => println!("\n  Decisión del agente: {}\n", decision.trim()),
                    Err(e) => eprintln!("  [Error] {e}"),
                }
            }
            _ if input.starts_with("/plan") => {
                let goal = input.trim_start_matches("/plan").trim();
                if goal.is_empty() {
                    eprintln!("  Uso: /plan <objetivo>");
                } else {
                    match assistant.planner.make_plan(goal).await {
                        Ok(steps) => {
                            println!();
                            for step in steps {
                                println!("  {step}");
                            }
                            println!();
                        }
                        Err(e) => eprintln!("  [Error] {e}"),
                    }
                }
            }
            _ => {
                let outcome = ask(&assistant, &mut history, input).await;
                println!();
                print_outcome(&outcome, show_thoughts);
                println!();
            }
        }
        prompt()?;
    }

    println!();
    println!("  ¡Hasta luego!");
    Ok(())
}

async fn ask(assistant: &Assistant, history: &mut ChatHistory, message: &str) -> Outcome {
    let rendered = history.render(assistant.history_turns);
    let outcome = assistant
        .observer
        .observe(&assistant.router, message, &rendered)
        .await;
    history.push(message, outcome.output.as_str());
    outcome
}

fn prompt() -> std::io::Result<()> {
    print!("  Tú > ");
    std::io::stdout().flush()
}

fn print_outcome(outcome: &Outcome, show_thoughts: bool) {
    println!("{}", outcome.output);
    println!("{}", status_line(outcome));

    if show_thoughts && !outcome.thoughts.is_empty() {
        println!("Trazas:");
        for thought in &outcome.thoughts {
            println!("  - {thought}");
        }
    }

    let sources = display_sources(&outcome.sources);
    if !sources.is_empty() {
        println!("Fuentes internas (RAG):");
        for source in sources {
            println!("  {source}");
        }
    }
}

/// `[mode | tool | latency | memory | status]`
pub fn status_line(outcome: &Outcome) -> String {
    let (latency, memory, status) = match &outcome.metrics {
        Some(m) => (
            format!("{:.1} ms", m.latency_ms),
            m.memory_mb
                .map(|mb| format!("{mb:.1} MB"))
                .unwrap_or_else(|| "N/D".to_string()),
            if m.error { "error" } else { "ok" },
        ),
        None => ("N/D".to_string(), "N/D".to_string(), "ok"),
    };
    format!(
        "[{} | {} | {latency} | {memory} | {status}]",
        outcome.mode, outcome.tool
    )
}

/// Sources sorted and de-duplicated for display; the outcome keeps one
/// entry per hit.
pub fn display_sources(sources: &[String]) -> Vec<&str> {
    let mut unique: Vec<&str> = sources.iter().map(String::as_str).collect();
    unique.sort_unstable();
    unique.dedup();
    unique
}

/// The compact recent-history summary handed to the decision helper.
pub fn decision_context(history: &ChatHistory) -> String {
    format!("Historial breve:\n{}", history.render_compact(DECISION_TURNS))
}
