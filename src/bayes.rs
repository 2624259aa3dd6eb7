//! Naive-Bayes tag classification.
//!
//! Training text is tokenized and counted per tag in a [`TagStore`]. When a
//! classification is requested, the [`ScoreCache`] derives for every
//! `(tag, token)` pair how strongly the token points at that tag instead of
//! any other, and a [`Combiner`] folds the per-token probabilities of the
//! input into one score per tag.
//!
//! # Architecture
//!
//! - [`TokenCounter`]: per-tag token occurrence counts
//! - [`TagStore`]: all tag counters plus the aggregate system counter
//! - [`ScoreCache`]: lazily rebuilt per-tag token probabilities
//! - [`Combiner`]: Robinson and Robinson-Fisher score combination
//! - [`Classifier`]: tokenization, cache refresh and ranking
//! - [`SharedClassifier`]: a classifier behind a read/write lock
//!
//! # Example
//!
//! ```rust
//! use tagbayes::bayes;
//!
//! # fn main() -> tagbayes::error::Result<()> {
//! let mut classifier = bayes::new_simple_text()?;
//! classifier.train("spam".to_string(), "bad")?;
//! classifier.train("ham".to_string(), "good")?;
//!
//! let scores = classifier.classify("this is a bad sentence")?;
//! assert_eq!(scores.len(), 1);
//! assert!((scores["spam"] - 0.9999).abs() < 1e-12);
//! # Ok(())
//! # }
//! ```

mod classifier;
pub mod combiner;
mod core;
mod score_cache;
mod shared;
mod tag_store;
mod token_counter;
mod tokenize;

pub use classifier::{Classifier, Scores, SimpleTextClassifier};
pub use combiner::{Combiner, CombinerKind, RobinsonCombiner, RobinsonFisherCombiner};
pub use self::core::{new_simple_text, new_simple_text_with};
pub use score_cache::{ScoreCache, ScoreTable};
pub use shared::SharedClassifier;
pub use tag_store::TagStore;
pub use token_counter::TokenCounter;
pub use tokenize::Tokenize;
