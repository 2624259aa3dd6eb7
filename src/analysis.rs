//! Text analysis for the classifier.
//!
//! Raw text is split into [`token::Token`]s by a [`tokenizer::Tokenizer`],
//! transformed by a chain of [`token_filter::Filter`]s and exposed through an
//! [`analyzer::Analyzer`]. The classifier itself only sees the token texts,
//! through the [`crate::bayes::Tokenize`] port implemented by the analyzers.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
