use crate::{
    core::{
        model::{ChunkInsert, ChunkMatch, Document, DocumentInsert, MatchQuery},
        store::ChunkStore,
    },
    error::PdfragError,
};
use tokio::sync::RwLock;
use uuid::Uuid;

/// A stored chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredChunk {
    pub document_id: Uuid,
    pub chunk_text: String,
    pub embedding: Vec<f64>,
}

/// Keeps everything in process. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<Vec<Document>>,
    chunks: RwLock<Vec<StoredChunk>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All chunks in insertion order.
    pub async fn chunks(&self) -> Vec<StoredChunk> {
        self.chunks.read().await.clone()
    }

    /// Chunks belonging to `document_id`, in insertion order.
    pub async fn document_chunks(&self, document_id: Uuid) -> Vec<StoredChunk> {
        self.chunks
            .read()
            .await
            .iter()
            .filter(|c| c.document_id == document_id)
            .cloned()
            .collect()
    }
}

#[async_trait::async_trait]
impl ChunkStore for MemoryStore {
    fn id(&self) -> &'static str {
        "memory"
    }

    async fn insert_document(
        &self,
        document: DocumentInsert<'_>,
    ) -> Result<Document, PdfragError> {
        let document = Document {
            id: Uuid::new_v4(),
            title: document.title.to_string(),
        };
        self.documents.write().await.push(document.clone());
        Ok(document)
    }

    async fn insert_chunk(&self, chunk: ChunkInsert<'_>) -> Result<(), PdfragError> {
        self.chunks.write().await.push(StoredChunk {
            document_id: chunk.document_id,
            chunk_text: chunk.chunk_text.to_string(),
            embedding: chunk.embedding.to_vec(),
        });
        Ok(())
    }

    async fn match_chunks(&self, query: MatchQuery<'_>) -> Result<Vec<ChunkMatch>, PdfragError> {
        let chunks = self.chunks.read().await;

        let mut results = chunks
            .iter()
            .map(|chunk| (cosine_similarity(query.embedding, &chunk.embedding), chunk))
            .filter(|(score, _)| *score >= query.threshold)
            .collect::<Vec<_>>();

        results.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(query.count);

        Ok(results
            .into_iter()
            .map(|(score, chunk)| ChunkMatch {
                document_id: Some(chunk.document_id),
                chunk_text: chunk.chunk_text.clone(),
                similarity: Some(score),
            })
            .collect())
    }

    async fn list_documents(&self) -> Result<Vec<Document>, PdfragError> {
        Ok(self.documents.read().await.clone())
    }
}

/// Cosine similarity of two vectors. Zero if either vector has no magnitude
/// or the lengths differ.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f64 = a.iter().zip(b.iter()).map(|(a, b)| a * b).sum();
    let magnitude_a = a.iter().map(|x| x.powi(2)).sum::<f64>().sqrt();
    let magnitude_b = b.iter().map(|x| x.powi(2)).sum::<f64>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude_a * magnitude_b)
}
