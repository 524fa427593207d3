//! Persistence and retrieval for orgassist: the note journal and the
//! knowledge index behind RAG.

pub mod notes;
pub mod in_memory;
pub mod chunker;
pub mod index;
pub mod vector;
pub mod ingest;
pub mod retriever;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use notes::JsonNoteStore;
pub use in_memory::InMemoryNoteStore;
pub use chunker::TextSplitter;
pub use index::{IndexedChunk, KnowledgeIndex};
pub use vector::{cosine_similarity, rank_chunks};
pub use ingest::{IngestReport, build_index, discover_documents};
pub use retriever::VectorRetriever;
