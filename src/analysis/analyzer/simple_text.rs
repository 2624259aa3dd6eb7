//! The default analyzer for text classification.
//!
//! Matches runs of word characters, optionally lower-cases them and drops
//! any token found in the ignore list (checked after lower-casing).

use std::sync::Arc;

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{LowercaseFilter, StopFilter};
use crate::analysis::tokenizer::RegexTokenizer;
use crate::bayes::Tokenize;
use crate::error::Result;

/// Word tokenizer with lower-casing and an ignore list.
#[derive(Clone, Debug)]
pub struct SimpleTextAnalyzer {
    inner: PipelineAnalyzer,
}

impl SimpleTextAnalyzer {
    /// Lower-casing on, no ignored words.
    pub fn new() -> Result<Self> {
        Self::with_options(true, Vec::<String>::new())
    }

    /// Build an analyzer with explicit lower-casing and ignore list.
    pub fn with_options<I, S>(convert_to_lower: bool, ignore: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut inner =
            PipelineAnalyzer::new(Arc::new(RegexTokenizer::new()?)).with_name("simple_text");
        if convert_to_lower {
            inner = inner.add_filter(Arc::new(LowercaseFilter::new()));
        }

        let stop = StopFilter::from_words(ignore);
        if !stop.is_empty() {
            inner = inner.add_filter(Arc::new(stop));
        }

        Ok(Self { inner })
    }
}

impl Analyzer for SimpleTextAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &str {
        Analyzer::name(&self.inner)
    }
}

impl Tokenize<String> for SimpleTextAnalyzer {
    fn tokenize(&self, input: &str) -> Result<Vec<String>> {
        Tokenize::tokenize(&self.inner, input)
    }

    fn name(&self) -> &str {
        Analyzer::name(&self.inner)
    }
}
