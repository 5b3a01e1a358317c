use super::{embedder::Embedder, llm::ChatModel, store::ChunkStore};
use std::sync::Arc;

/// Downstream providers for the services. Created once on startup and
/// shared by every request.
#[derive(Clone)]
pub struct ProviderState {
    pub store: Arc<dyn ChunkStore + Send + Sync>,
    pub embedder: Arc<dyn Embedder + Send + Sync>,
    pub llm: Arc<dyn ChatModel + Send + Sync>,
}

impl ProviderState {
    pub fn new(
        store: Arc<dyn ChunkStore + Send + Sync>,
        embedder: Arc<dyn Embedder + Send + Sync>,
        llm: Arc<dyn ChatModel + Send + Sync>,
    ) -> Self {
        Self {
            store,
            embedder,
            llm,
        }
    }
}

impl std::fmt::Debug for ProviderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderState")
            .field("store", &self.store.id())
            .field("embedder", &self.embedder.id())
            .field("embedding_model", &self.embedder.model())
            .field("llm", &self.llm.id())
            .finish()
    }
}
