use super::{ChunkerError, Tokenizer};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const TOKEN_WINDOW_DEFAULT_MAX_TOKENS: usize = 500;

/// Determines what happens to the word that pushes a window over its token bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OverflowPolicy {
    /// The overflowing word is kept in the chunk being flushed, so chunks may exceed
    /// `max_tokens` by at most the tokens of one word.
    #[default]
    Include,

    /// The overflowing word starts the next chunk. A word that exceeds the bound
    /// on its own still becomes a chunk of its own.
    Defer,
}

/// Word based token window chunker.
///
/// The input is split on whitespace and words are accumulated until the accumulated
/// words, joined with single spaces, measure more than `max_tokens` with the given
/// tokenizer. What happens with the overflowing word is controlled by `overflow`.
///
/// Chunks never overlap and joining them with single spaces yields the input's words
/// in their original order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenWindow {
    pub max_tokens: usize,
    pub overflow: OverflowPolicy,
}

impl TokenWindow {
    /// Create a new `TokenWindow` chunker.
    /// Errors if `max_tokens` is 0.
    pub fn new(max_tokens: usize, overflow: OverflowPolicy) -> Result<Self, ChunkerError> {
        if max_tokens == 0 {
            return Err(ChunkerError::Config(
                "max_tokens must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            max_tokens,
            overflow,
        })
    }
}

impl Default for TokenWindow {
    fn default() -> Self {
        Self {
            max_tokens: TOKEN_WINDOW_DEFAULT_MAX_TOKENS,
            overflow: OverflowPolicy::default(),
        }
    }
}

impl TokenWindow {
    pub fn chunk<T>(&self, input: &str, tokenizer: &T) -> Vec<String>
    where
        T: Tokenizer + ?Sized,
    {
        let mut chunks = vec![];
        let mut window: Vec<&str> = vec![];

        for word in input.split_whitespace() {
            window.push(word);

            let joined = window.join(" ");

            if tokenizer.count(&joined) <= self.max_tokens {
                continue;
            }

            match self.overflow {
                OverflowPolicy::Include => {
                    chunks.push(joined);
                    window.clear();
                }
                OverflowPolicy::Defer => {
                    // A lone word stays until the next one arrives or the input ends
                    if window.len() == 1 {
                        continue;
                    }
                    window.pop();
                    chunks.push(window.join(" "));
                    window.clear();
                    window.push(word);
                }
            }
        }

        if !window.is_empty() {
            chunks.push(window.join(" "));
        }

        if !chunks.is_empty() {
            debug!(
                "Chunked {} chunks, avg chunk size: {}",
                chunks.len(),
                chunks.iter().fold(0, |acc, el| acc + el.len()) / chunks.len()
            );
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Tiktoken, Whitespace};

    /// Counts characters, including spaces.
    struct Chars;

    impl Tokenizer for Chars {
        fn count(&self, input: &str) -> usize {
            input.chars().count()
        }
    }

    const INPUT: &str = "Sticks and stones may break my bones, but words will never leverage agile frameworks to provide a robust synopsis for high level overviews.";

    #[test]
    fn token_window_flushes_on_overflow() {
        let window = TokenWindow::new(2, OverflowPolicy::Include).unwrap();
        let chunks = window.chunk("a b c d e", &Whitespace);

        assert_eq!(vec!["a b c", "d e"], chunks);
    }

    #[test]
    fn token_window_defers_overflow() {
        let window = TokenWindow::new(2, OverflowPolicy::Defer).unwrap();
        let chunks = window.chunk("a b c d e", &Whitespace);

        assert_eq!(vec!["a b", "c d", "e"], chunks);
    }

    #[test]
    fn token_window_small_input() {
        let window = TokenWindow::default();
        let chunks = window.chunk("  Foo \n\n bar\tbaz  ", &Whitespace);

        assert_eq!(vec!["Foo bar baz"], chunks);
    }

    #[test]
    fn token_window_empty() {
        let window = TokenWindow::new(1, OverflowPolicy::Include).unwrap();

        assert!(window.chunk("", &Whitespace).is_empty());
        assert!(window.chunk(" \n\t ", &Whitespace).is_empty());
    }

    #[test]
    fn token_window_rejects_zero_bound() {
        assert!(TokenWindow::new(0, OverflowPolicy::Include).is_err());
        assert!(TokenWindow::new(0, OverflowPolicy::Defer).is_err());
    }

    #[test]
    fn token_window_preserves_words() {
        let words = INPUT.split_whitespace().collect::<Vec<_>>();

        for max_tokens in 1..=words.len() + 1 {
            for overflow in [OverflowPolicy::Include, OverflowPolicy::Defer] {
                let window = TokenWindow::new(max_tokens, overflow).unwrap();
                let chunks = window.chunk(INPUT, &Whitespace);

                assert_eq!(words.join(" "), chunks.join(" "));
                assert!(chunks.iter().all(|chunk| !chunk.is_empty()));
            }
        }
    }

    #[test]
    fn token_window_include_bound() {
        let window = TokenWindow::new(20, OverflowPolicy::Include).unwrap();
        let chunks = window.chunk(INPUT, &Chars);

        assert!(chunks.len() > 1);

        for chunk in chunks.iter() {
            // Everything but the last word must have fit in the window
            let without_last = match chunk.rsplit_once(' ') {
                Some((head, _)) => head,
                None => "",
            };
            assert!(Chars.count(without_last) <= 20);
        }

        // Every chunk except the last one overflowed
        for chunk in chunks[..chunks.len() - 1].iter() {
            assert!(Chars.count(chunk) > 20);
        }
    }

    #[test]
    fn token_window_defer_bound() {
        let window = TokenWindow::new(20, OverflowPolicy::Defer).unwrap();
        let chunks = window.chunk(INPUT, &Chars);

        for chunk in chunks {
            assert!(Chars.count(&chunk) <= 20);
        }
    }

    #[test]
    fn token_window_oversized_word() {
        let input = "abcdefghij kl mn";

        let include = TokenWindow::new(5, OverflowPolicy::Include).unwrap();
        assert_eq!(vec!["abcdefghij", "kl mn"], include.chunk(input, &Chars));

        let defer = TokenWindow::new(5, OverflowPolicy::Defer).unwrap();
        assert_eq!(vec!["abcdefghij", "kl mn"], defer.chunk(input, &Chars));

        assert_eq!(vec!["abcdefghij"], defer.chunk("abcdefghij", &Chars));
    }

    #[test]
    fn token_window_measures_joined_words() {
        // Words are measured as joined with a single space, so the spaces count too
        let window = TokenWindow::new(3, OverflowPolicy::Defer).unwrap();
        assert_eq!(vec!["a b", "c"], window.chunk("a b c", &Chars));
    }

    #[test]
    fn token_window_counts_bpe_tokens() {
        let tokenizer = Tiktoken::cl100k().unwrap();
        let input = "hello world hello world hello world";

        let window = TokenWindow::new(3, OverflowPolicy::Include).unwrap();
        assert_eq!(
            vec!["hello world hello world", "hello world"],
            window.chunk(input, &tokenizer)
        );

        let window = TokenWindow::new(3, OverflowPolicy::Defer).unwrap();
        assert_eq!(
            vec!["hello world hello", "world hello world"],
            window.chunk(input, &tokenizer)
        );
    }
}
