mod tokenizer;
pub mod window;

pub use tokenizer::{Tiktoken, Tokenizer, Whitespace};
pub use window::{OverflowPolicy, TokenWindow};

#[derive(Debug, thiserror::Error)]
pub enum ChunkerError {
    #[error("{0}")]
    Config(String),

    #[error("tokenizer: {0}")]
    Tokenizer(String),
}
