use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata of an ingested source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Document {
    /// Generated by the store on insert.
    pub id: Uuid,

    /// Source file name.
    pub title: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct DocumentInsert<'a> {
    pub title: &'a str,
}

impl<'a> DocumentInsert<'a> {
    pub fn new(title: &'a str) -> Self {
        Self { title }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ChunkInsert<'a> {
    pub document_id: Uuid,
    pub chunk_text: &'a str,
    pub embedding: &'a [f64],
}

impl<'a> ChunkInsert<'a> {
    pub fn new(document_id: Uuid, chunk_text: &'a str, embedding: &'a [f64]) -> Self {
        Self {
            document_id,
            chunk_text,
            embedding,
        }
    }
}

/// Parameters for similarity search.
#[derive(Debug, Clone, Copy)]
pub struct MatchQuery<'a> {
    /// The vector to compare stored chunk embeddings with.
    pub embedding: &'a [f64],

    /// Minimum similarity a chunk must have to be returned.
    pub threshold: f64,

    /// Maximum amount of chunks to return.
    pub count: usize,
}

/// A chunk returned by similarity search.
///
/// Stores are only required to return the chunk text, the rest is
/// informational.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct ChunkMatch {
    #[serde(default)]
    pub document_id: Option<Uuid>,

    pub chunk_text: String,

    #[serde(default)]
    pub similarity: Option<f64>,
}

impl ChunkMatch {
    pub fn new(chunk_text: impl Into<String>) -> Self {
        Self {
            document_id: None,
            chunk_text: chunk_text.into(),
            similarity: None,
        }
    }
}
