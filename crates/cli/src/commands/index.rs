//! `orgassist index` — Build the knowledge index from Markdown documents.

use crate::app::{CliResult, load_config};
use orgassist_memory::{TextSplitter, build_index};

pub async fn run() -> CliResult {
    let config = load_config()?;
    let provider = orgassist_providers::build_from_config(&config.provider);
    let splitter = TextSplitter::new(config.retrieval.chunk_size, config.retrieval.chunk_overlap);

    println!(
        "Indexando {} con {}...",
        config.retrieval.knowledge_dir.display(),
        config.provider.embed_model
    );

    let (index, report) = build_index(
        provider.as_ref(),
        &config.provider.embed_model,
        &config.retrieval.knowledge_dir,
        &splitter,
    )
    .await?;
    index.save(&config.retrieval.index_path)?;

    println!(
        "Índice listo: {} documentos, {} fragmentos → {}",
        report.documents,
        report.chunks,
        config.retrieval.index_path.display()
    );
    Ok(())
}
