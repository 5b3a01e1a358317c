//! Test suites and utilites.


use super::{
    state::{AppState, ServiceState},
    store::memory::MemoryStore,
};
use crate::{
    core::{
        chunk::Chunker,
        embedder::Embedder,
        llm::ChatModel,
        model::{ChunkInsert, ChunkMatch, Document, DocumentInsert, MatchQuery},
        provider::ProviderState,
        service::{
            ingest::IngestService,
            query::{dto::QueryConfig, QueryService},
        },
        store::ChunkStore,
    },
    err,
    error::{PdfragErr, PdfragError},
};
use pdfrag_chunx::{OverflowPolicy, TokenWindow, Whitespace};
use pdfrag_openai::error::OpenAiError;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

/// Words the [KeywordEmbedder] places on its axes.
const VOCABULARY: [&str; 5] = ["inflation", "gdp", "growth", "unemployment", "rates"];

/// Texts containing this word cannot be embedded.
const POISON: &str = "poison";

/// Embeds text as the occurrence count of each [VOCABULARY] word, so
/// texts sharing keywords end up similar.
#[derive(Debug, Default)]
pub struct KeywordEmbedder;

#[async_trait::async_trait]
impl Embedder for KeywordEmbedder {
    fn id(&self) -> &'static str {
        "keyword"
    }

    fn model(&self) -> &str {
        "keyword"
    }

    async fn embed(&self, input: &str) -> Result<Vec<f64>, PdfragError> {
        let words = input
            .split_whitespace()
            .map(|word| {
                word.trim_matches(|c: char| !c.is_alphanumeric())
                    .to_lowercase()
            })
            .collect::<Vec<_>>();

        if words.iter().any(|word| word == POISON) {
            return err!(Embedding, "refusing to embed '{input}'");
        }

        Ok(VOCABULARY
            .iter()
            .map(|keyword| words.iter().filter(|word| word == keyword).count() as f64)
            .collect())
    }
}

/// Records every prompt and replies with a fixed answer, or with a provider
/// error when unavailable.
#[derive(Debug)]
pub struct RecordingChat {
    answer: String,
    unavailable: bool,
    prompts: Mutex<Vec<String>>,
}

impl RecordingChat {
    pub fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            unavailable: false,
            prompts: Mutex::default(),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::new("")
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ChatModel for RecordingChat {
    fn id(&self) -> &'static str {
        "recording"
    }

    async fn complete(&self, prompt: &str, _temperature: f64) -> Result<String, PdfragError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        if self.unavailable {
            let error = OpenAiError::Status {
                status: 503,
                body: "service unavailable".to_string(),
            };
            return Err(PdfragError::new(
                file!(),
                line!(),
                column!(),
                PdfragErr::OpenAi(error),
            ));
        }

        Ok(self.answer.clone())
    }
}

/// A [MemoryStore] that can be told to fail.
#[derive(Debug, Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,

    /// Document inserts with these titles fail.
    pub failing_titles: Vec<String>,

    /// Document inserts with these titles are stored, but the response is unreadable.
    pub garbled_titles: Vec<String>,

    /// Fail the chunk insert after this many successful ones.
    pub chunk_budget: Option<usize>,

    inserted_chunks: AtomicUsize,
}

impl FlakyStore {
    pub fn failing_titles(titles: &[&str]) -> Self {
        Self {
            failing_titles: titles.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn garbled_titles(titles: &[&str]) -> Self {
        Self {
            garbled_titles: titles.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn chunk_budget(budget: usize) -> Self {
        Self {
            chunk_budget: Some(budget),
            ..Default::default()
        }
    }
}

#[async_trait::async_trait]
impl ChunkStore for FlakyStore {
    fn id(&self) -> &'static str {
        "flaky"
    }

    async fn insert_document(
        &self,
        document: DocumentInsert<'_>,
    ) -> Result<Document, PdfragError> {
        if self.failing_titles.iter().any(|t| t == document.title) {
            return err!(Store, "cannot insert '{}'", document.title);
        }
        if self.garbled_titles.iter().any(|t| t == document.title) {
            let title = document.title;
            self.inner.insert_document(document).await?;
            return err!(InvalidResponse, "cannot read the row for '{title}'");
        }
        self.inner.insert_document(document).await
    }

    async fn insert_chunk(&self, chunk: ChunkInsert<'_>) -> Result<(), PdfragError> {
        if let Some(budget) = self.chunk_budget {
            if self.inserted_chunks.load(Ordering::SeqCst) >= budget {
                return err!(Store, "chunk budget of {budget} exhausted");
            }
        }
        self.inner.insert_chunk(chunk).await?;
        self.inserted_chunks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn match_chunks(&self, query: MatchQuery<'_>) -> Result<Vec<ChunkMatch>, PdfragError> {
        self.inner.match_chunks(query).await
    }

    async fn list_documents(&self) -> Result<Vec<Document>, PdfragError> {
        self.inner.list_documents().await
    }
}

/// Services backed by in process fakes.
pub struct TestState {
    pub app: AppState,
    pub store: Arc<FlakyStore>,
    pub chat: Arc<RecordingChat>,
}

pub struct TestStateConfig {
    pub store: FlakyStore,
    pub answer: &'static str,
    pub chat_unavailable: bool,
    pub max_tokens: usize,
}

impl Default for TestStateConfig {
    fn default() -> Self {
        Self {
            store: FlakyStore::default(),
            answer: "  Inflation is a general rise in prices.\n",
            chat_unavailable: false,
            max_tokens: 8,
        }
    }
}

impl TestState {
    pub fn init(config: TestStateConfig) -> Self {
        let store = Arc::new(config.store);
        let chat = if config.chat_unavailable {
            Arc::new(RecordingChat::unavailable())
        } else {
            Arc::new(RecordingChat::new(config.answer))
        };

        let providers = ProviderState::new(store.clone(), Arc::new(KeywordEmbedder), chat.clone());

        let window = TokenWindow::new(config.max_tokens, OverflowPolicy::Include).unwrap();
        let chunker = Chunker::new(window, Arc::new(Whitespace));

        let services = ServiceState {
            ingest: IngestService::new(providers.clone(), chunker),
            query: QueryService::new(providers.clone(), QueryConfig::default()),
        };

        Self {
            app: AppState::new_test(services, providers),
            store,
            chat,
        }
    }

    pub fn services(&self) -> &ServiceState {
        &self.app.services
    }

    /// Titles of stored documents in insertion order.
    pub async fn titles(&self) -> Vec<String> {
        self.store
            .list_documents()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.title)
            .collect()
    }
}
