use crate::{
    core::{
        model::{ChunkMatch, MatchQuery},
        provider::ProviderState,
    },
    error::PdfragError,
};
use dto::QueryConfig;
use tracing::{debug, info};

/// Minimum similarity of a chunk to be used as context.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.75;

/// Maximum amount of chunks used as context.
pub const DEFAULT_MATCH_COUNT: usize = 5;

/// Sampling temperature for answers.
pub const DEFAULT_TEMPERATURE: f64 = 0.2;

/// Returned when no chunk is similar enough to the question.
pub const NO_MATCH_ANSWER: &str = "Sorry, I couldn't find any relevant information.";

/// Appended to every chunk in the context.
pub const CONTEXT_DELIMITER: &str = "\n---\n";

/// Answers questions using the stored chunks as context.
#[derive(Debug, Clone)]
pub struct QueryService {
    providers: ProviderState,
    config: QueryConfig,
}

impl QueryService {
    pub fn new(providers: ProviderState, config: QueryConfig) -> Self {
        Self { providers, config }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Embed the question and return the most similar chunks, ordered by
    /// descending similarity.
    ///
    /// * `question`: The question to search by.
    pub async fn search(&self, question: &str) -> Result<Vec<ChunkMatch>, PdfragError> {
        let embedding = self.providers.embedder.embed(question).await?;

        let matches = self
            .providers
            .store
            .match_chunks(MatchQuery {
                embedding: &embedding,
                threshold: self.config.threshold,
                count: self.config.count,
            })
            .await?;

        debug!("Found {} matching chunk(s)", matches.len());

        Ok(matches)
    }

    /// Answer `question` from the most similar chunks.
    ///
    /// If no chunk clears the threshold, [NO_MATCH_ANSWER] is returned
    /// and the language model is not called.
    ///
    /// * `question`: The user's question.
    pub async fn ask(&self, question: &str) -> Result<String, PdfragError> {
        let matches = self.search(question).await?;

        if matches.is_empty() {
            info!("No relevant chunks found");
            return Ok(NO_MATCH_ANSWER.to_string());
        }

        let context = build_context(&matches);
        let prompt = build_prompt(&context, question);

        let answer = self
            .providers
            .llm
            .complete(&prompt, self.config.temperature)
            .await?;

        Ok(answer.trim().to_string())
    }
}

/// Join the chunks' text in the given order, each one trimmed and
/// followed by [CONTEXT_DELIMITER]. The result is trimmed.
pub fn build_context(matches: &[ChunkMatch]) -> String {
    let mut context = String::new();
    for m in matches {
        context.push_str(m.chunk_text.trim());
        context.push_str(CONTEXT_DELIMITER);
    }
    context.trim().to_string()
}

pub fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "You are an economic insights assistant. Use the context below to answer the question.
If the context does not contain the answer, reply 'I don't know'.

Context:
{context}

Question: {question}
Answer:"
    )
}

/// Query service DTOs.
pub mod dto {
    use super::{DEFAULT_MATCH_COUNT, DEFAULT_MATCH_THRESHOLD, DEFAULT_TEMPERATURE};

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct QueryConfig {
        /// Minimum similarity of a matched chunk.
        pub threshold: f64,

        /// Maximum amount of matched chunks.
        pub count: usize,

        /// Sampling temperature for the language model.
        pub temperature: f64,
    }

    impl Default for QueryConfig {
        fn default() -> Self {
            Self {
                threshold: DEFAULT_MATCH_THRESHOLD,
                count: DEFAULT_MATCH_COUNT,
                temperature: DEFAULT_TEMPERATURE,
            }
        }
    }
}
