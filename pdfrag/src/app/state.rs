use super::{
    embedder::openai::OpenAiEmbedder, llm::openai::OpenAiChatModel, store::memory::MemoryStore,
};
use crate::{
    config::StartArgs,
    core::{
        chunk::Chunker,
        provider::ProviderState,
        service::{
            ingest::IngestService,
            query::{dto::QueryConfig, QueryService},
        },
        store::ChunkStore,
    },
};
use pdfrag_chunx::{OverflowPolicy, Tiktoken, TokenWindow};
use pdfrag_openai::{chat::OpenAiChat, embeddings::OpenAiEmbeddings};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct AppState {
    /// Pdfrag services.
    pub services: ServiceState,

    /// Downstream service providers for pdfrag services.
    /// Used for displaying some metadata and in tests.
    pub providers: ProviderState,
}

impl AppState {
    /// Load the application state using the provided configuration.
    pub async fn new(args: &StartArgs) -> Self {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from(args.log()))
            .init();

        let store = Self::init_store(args).await;

        let openai_key = args.openai_key();
        let openai_url = args.openai_url();

        let embedder = Arc::new(OpenAiEmbedder::new(
            OpenAiEmbeddings::with_endpoint(&openai_url, &openai_key),
            &args.embedding_model(),
        ));

        let llm = Arc::new(OpenAiChatModel::new(
            OpenAiChat::with_endpoint(&openai_url, &openai_key),
            &args.chat_model(),
        ));

        let providers = ProviderState::new(store, embedder, llm);

        let window = match TokenWindow::new(args.max_tokens(), OverflowPolicy::default()) {
            Ok(window) => window,
            Err(e) => panic!("{e}"),
        };

        let tokenizer = match Tiktoken::cl100k() {
            Ok(tokenizer) => tokenizer,
            Err(e) => panic!("{e}"),
        };

        let chunker = Chunker::new(window, Arc::new(tokenizer));

        let query_config = QueryConfig {
            threshold: args.match_threshold(),
            count: args.match_count(),
            ..Default::default()
        };

        let services = ServiceState {
            ingest: IngestService::new(providers.clone(), chunker),
            query: QueryService::new(providers.clone(), query_config),
        };

        info!("Loaded application state: {providers:?}");
        info!("Chunking with {:?}", services.ingest.chunker().window());

        Self {
            services,
            providers,
        }
    }

    async fn init_store(args: &StartArgs) -> Arc<dyn ChunkStore + Send + Sync> {
        match args.store().as_str() {
            "memory" => Arc::new(MemoryStore::new()),

            #[cfg(feature = "supabase")]
            "supabase" => Arc::new(crate::app::store::supabase::init(
                &args.supabase_url(),
                &args.supabase_key(),
            )),

            #[cfg(feature = "postgres")]
            "postgres" => Arc::new(crate::app::store::pg::init(&args.db_url()).await),

            other => panic!(
                "Unknown store '{other}'; Pass --store or set STORE to one of the enabled stores"
            ),
        }
    }

    #[cfg(test)]
    pub fn new_test(services: ServiceState, providers: ProviderState) -> Self {
        Self {
            services,
            providers,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServiceState {
    pub ingest: IngestService,
    pub query: QueryService,
}
