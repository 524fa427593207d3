//! `orgassist notes` — Print the note journal.

use crate::app::{CliResult, load_config, note_store};
use orgassist_core::note::NoteStore;
use orgassist_tools::notes::format_notes;

pub async fn run() -> CliResult {
    let config = load_config()?;
    let store = note_store(&config)?;
    let notes = store.list().await?;
    println!("{}", format_notes(&notes));
    Ok(())
}
