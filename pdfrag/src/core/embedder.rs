use crate::error::PdfragError;

/// Operations related to embeddings and their models.
#[async_trait::async_trait]
pub trait Embedder {
    fn id(&self) -> &'static str;

    /// The embedding model used by this embedder.
    fn model(&self) -> &str;

    /// Get the vector for `input`. The input can be a user's question
    /// or a single chunk of a document.
    ///
    /// * `input`: The text to embed.
    async fn embed(&self, input: &str) -> Result<Vec<f64>, PdfragError>;
}
