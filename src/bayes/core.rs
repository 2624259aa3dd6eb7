//! Helper functions for creating classifiers.

use std::sync::Arc;

use crate::analysis::analyzer::SimpleTextAnalyzer;
use crate::bayes::classifier::SimpleTextClassifier;
use crate::bayes::combiner::{Combiner, RobinsonCombiner};
use crate::error::Result;

/// Create a text classifier with the default analyzer (word matching,
/// lower-casing, nothing ignored) and Robinson's combiner.
pub fn new_simple_text() -> Result<SimpleTextClassifier> {
    Ok(new_simple_text_with(
        SimpleTextAnalyzer::new()?,
        Box::new(RobinsonCombiner::new()),
    ))
}

/// Create a text classifier with a custom analyzer and combiner.
pub fn new_simple_text_with(
    analyzer: SimpleTextAnalyzer,
    combiner: Box<dyn Combiner>,
) -> SimpleTextClassifier {
    SimpleTextClassifier::new(Arc::new(analyzer), combiner)
}
