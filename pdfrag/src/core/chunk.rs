use pdfrag_chunx::{Tokenizer, TokenWindow};
use std::sync::Arc;

/// A [TokenWindow] bundled with the tokenizer it measures chunks with.
#[derive(Clone)]
pub struct Chunker {
    window: TokenWindow,
    tokenizer: Arc<dyn Tokenizer + Send + Sync>,
}

impl Chunker {
    pub fn new(window: TokenWindow, tokenizer: Arc<dyn Tokenizer + Send + Sync>) -> Self {
        Self { window, tokenizer }
    }

    pub fn window(&self) -> &TokenWindow {
        &self.window
    }

    /// Split `content` into token bounded chunks.
    pub fn chunk(&self, content: &str) -> Vec<String> {
        self.window.chunk(content, self.tokenizer.as_ref())
    }

    /// Token count of `content` as measured by this chunker's tokenizer.
    pub fn count(&self, content: &str) -> usize {
        self.tokenizer.count(content)
    }
}

impl std::fmt::Debug for Chunker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chunker")
            .field("window", &self.window)
            .finish()
    }
}
