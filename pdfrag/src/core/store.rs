use crate::{
    core::model::{ChunkInsert, ChunkMatch, Document, DocumentInsert, MatchQuery},
    error::PdfragError,
};

/// Persistence for documents and their embedded chunks.
///
/// Implementations are expected to have native similarity search.
#[async_trait::async_trait]
pub trait ChunkStore {
    fn id(&self) -> &'static str;

    /// Insert document metadata. Every call creates a new document,
    /// even if one with the same title already exists.
    ///
    /// * `document`: Insert payload.
    async fn insert_document(&self, document: DocumentInsert<'_>)
        -> Result<Document, PdfragError>;

    /// Store a chunk and its embedding.
    ///
    /// * `chunk`: Insert payload.
    async fn insert_chunk(&self, chunk: ChunkInsert<'_>) -> Result<(), PdfragError>;

    /// Perform semantic search. Results are ordered by descending similarity.
    ///
    /// * `query`: Search vector, threshold and limit.
    async fn match_chunks(&self, query: MatchQuery<'_>) -> Result<Vec<ChunkMatch>, PdfragError>;

    /// List all stored documents.
    async fn list_documents(&self) -> Result<Vec<Document>, PdfragError>;
}
