//! `orgassist stats` — Summarize the interaction log.

use crate::app::{CliResult, load_config};
use orgassist_telemetry::{DETAIL_ROWS, InteractionStats, RecentInteractions, read_records};

pub async fn run(recent: Option<usize>, detail: bool) -> CliResult {
    let config = load_config()?;
    let path = &config.storage.log_path;
    let mut records = read_records(path)?;

    if records.is_empty() {
        println!("Sin interacciones registradas en {}", path.display());
        return Ok(());
    }

    if let Some(n) = recent {
        let skip = records.len().saturating_sub(n);
        records.drain(..skip);
    }

    println!("📊 Interacciones ({})", path.display());
    println!("─────────────────────────────────────");
    print!("{}", InteractionStats::from_records(&records));

    if detail {
        println!("\nÚltimas interacciones:");
        print!("{}", RecentInteractions::new(&records, DETAIL_ROWS));
    }
    Ok(())
}
