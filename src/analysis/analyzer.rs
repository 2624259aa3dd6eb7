//! Analyzers: a tokenizer plus a chain of filters.
//!
//! ```text
//! Raw Text → Tokenizer → Filter 1 → ... → Filter N → Token Stream
//! ```
//!
//! - [`PipelineAnalyzer`] - Custom tokenizer + filter chains
//! - [`SimpleTextAnalyzer`] - Word matching, lower-casing and an ignore list

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &str;
}

pub mod pipeline;
pub mod simple_text;

pub use pipeline::PipelineAnalyzer;
pub use simple_text::SimpleTextAnalyzer;
