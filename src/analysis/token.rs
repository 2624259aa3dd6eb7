//! Token types produced by the analysis pipeline.
//!
//! # Examples
//!
//! ```
//! use tagbayes::analysis::token::Token;
//!
//! let token = Token::new("World").with_text("world");
//! assert_eq!(token.text, "world");
//! ```

/// A single unit of text after tokenization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// The text content of the token
    pub text: String,
}

impl Token {
    /// Create a new token with the given text.
    pub fn new<S: Into<String>>(text: S) -> Self {
        Token { text: text.into() }
    }

    /// Replace the token text.
    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = text.into();
        self
    }
}

/// A boxed iterator of tokens flowing through the pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token> + Send>;
