use super::ChunkerError;
use tiktoken_rs::CoreBPE;

/// Implement on types that can measure text in tokens for use with [TokenWindow][crate::TokenWindow].
pub trait Tokenizer {
    /// Return the amount of tokens `input` encodes to.
    fn count(&self, input: &str) -> usize;
}

impl<T> Tokenizer for &T
where
    T: Tokenizer + ?Sized,
{
    fn count(&self, input: &str) -> usize {
        (**self).count(input)
    }
}

/// BPE tokenizer backed by `tiktoken`.
pub struct Tiktoken {
    bpe: CoreBPE,
}

impl Tiktoken {
    /// Load the `cl100k_base` encoding used by the OpenAI embedding and chat models.
    pub fn cl100k() -> Result<Self, ChunkerError> {
        let bpe =
            tiktoken_rs::cl100k_base().map_err(|e| ChunkerError::Tokenizer(e.to_string()))?;
        Ok(Self { bpe })
    }
}

impl Tokenizer for Tiktoken {
    fn count(&self, input: &str) -> usize {
        self.bpe.encode_ordinary(input).len()
    }
}

impl std::fmt::Debug for Tiktoken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tiktoken")
            .field("encoding", &"cl100k_base")
            .finish()
    }
}

/// Counts every whitespace delimited word as a single token.
#[derive(Debug, Clone, Copy, Default)]
pub struct Whitespace;

impl Tokenizer for Whitespace {
    fn count(&self, input: &str) -> usize {
        input.split_whitespace().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_counts_words() {
        assert_eq!(0, Whitespace.count("   "));
        assert_eq!(3, Whitespace.count(" one two\n\tthree "));
    }

    #[test]
    fn tiktoken_counts_bpe_tokens() {
        let tokenizer = Tiktoken::cl100k().unwrap();
        assert_eq!(0, tokenizer.count(""));
        assert_eq!(2, tokenizer.count("hello world"));
    }
}
