//! `orgassist plan` / `orgassist decide` — the planning helper.

use crate::app::{CliResult, load_config, planner};
use tokio::io::AsyncReadExt;

pub async fn plan(goal: String) -> CliResult {
    let goal = goal.trim();
    if goal.is_empty() {
        return Err("The goal must not be empty".into());
    }

    let config = load_config()?;
    let steps = planner(&config).make_plan(goal).await?;
    for step in steps {
        println!("{step}");
    }
    Ok(())
}

pub async fn decide(context: Option<String>) -> CliResult {
    let context = match context {
        Some(context) => context,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };

    let config = load_config()?;
    let decision = planner(&config).decide(context.trim()).await?;
    println!("{}", decision.trim());
    Ok(())
}
