//! The tokenizer port used by the classifier.

use crate::error::{Result, TagbayesError};

/// Turns raw input into the tokens a classifier counts.
///
/// Implementations must be deterministic and free of side effects: the
/// same input always yields the same tokens in the same order.
pub trait Tokenize<T>: Send + Sync {
    /// Split `input` into tokens.
    fn tokenize(&self, input: &str) -> Result<Vec<T>>;

    /// Tokenize raw bytes, rejecting anything that is not UTF-8 text.
    fn tokenize_bytes(&self, input: &[u8]) -> Result<Vec<T>> {
        let text = std::str::from_utf8(input).map_err(|e| {
            TagbayesError::format(format!("Expected UTF-8 text, given invalid bytes: {e}"))
        })?;
        self.tokenize(text)
    }

    /// Get the name of this tokenizer for debugging and logging.
    fn name(&self) -> &str;
}
