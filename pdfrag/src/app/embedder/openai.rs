use crate::core::embedder::Embedder;
use crate::error::PdfragError;
use crate::{err, map_err};
use pdfrag_openai::embeddings::OpenAiEmbeddings;

pub use pdfrag_openai::embeddings::TEXT_EMBEDDING_ADA_002 as DEFAULT_EMBEDDING_MODEL;

/// OpenAI embeddings for a single model.
#[derive(Debug)]
pub struct OpenAiEmbedder {
    client: OpenAiEmbeddings,
    model: String,
}

impl OpenAiEmbedder {
    pub fn new(client: OpenAiEmbeddings, model: &str) -> Self {
        Self {
            client,
            model: model.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl Embedder for OpenAiEmbedder {
    fn id(&self) -> &'static str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn embed(&self, input: &str) -> Result<Vec<f64>, PdfragError> {
        let embeddings = map_err!(self.client.embed(&[input], &self.model).await);

        match embeddings.into_iter().next() {
            Some(embedding) => Ok(embedding),
            None => err!(Embedding, "no embedding returned by '{}'", self.model),
        }
    }
}
