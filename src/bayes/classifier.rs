//! The tag classifier.

use std::hash::Hash;
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::bayes::combiner::Combiner;
use crate::bayes::score_cache::ScoreCache;
use crate::bayes::tag_store::TagStore;
use crate::bayes::token_counter::TokenCounter;
use crate::bayes::tokenize::Tokenize;
use crate::config::ClassifierConfig;
use crate::error::Result;

/// Tag scores of one classification, highest first.
pub type Scores<K> = IndexMap<K, f64>;

/// A classifier over string tags and string tokens.
pub type SimpleTextClassifier = Classifier<String, String>;

/// Naive-Bayes classifier over tags `K` and tokens `T`.
///
/// Mutations only touch the [`TagStore`] and mark the score cache stale;
/// the cache is rebuilt by the next classification. A `Classifier` is not
/// meant to be shared between threads without a lock, see
/// [`SharedClassifier`](crate::bayes::SharedClassifier).
pub struct Classifier<K, T>
where
    K: Eq + Hash,
    T: Eq + Hash,
{
    store: TagStore<K, T>,
    cache: ScoreCache<K, T>,
    tokenizer: Arc<dyn Tokenize<T>>,
    combiner: Box<dyn Combiner>,
    config: ClassifierConfig,
}

impl<K, T> std::fmt::Debug for Classifier<K, T>
where
    K: Eq + Hash,
    T: Eq + Hash,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("tags", &self.store.len())
            .field("tokenizer", &self.tokenizer.name())
            .field("combiner", &self.combiner.name())
            .field("config", &self.config)
            .finish()
    }
}

impl<K, T> Classifier<K, T>
where
    K: Eq + Hash + Ord + Clone,
    T: Eq + Hash + Clone,
{
    /// Create a classifier with the default configuration and an explicit
    /// combiner.
    pub fn new(tokenizer: Arc<dyn Tokenize<T>>, combiner: Box<dyn Combiner>) -> Self {
        Self {
            store: TagStore::new(),
            cache: ScoreCache::new(),
            tokenizer,
            combiner,
            config: ClassifierConfig::default(),
        }
    }

    /// Create a classifier from a validated configuration; the combiner is
    /// the one the configuration names.
    pub fn with_config(tokenizer: Arc<dyn Tokenize<T>>, config: ClassifierConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store: TagStore::new(),
            cache: ScoreCache::new(),
            tokenizer,
            combiner: config.combiner.build(),
            config,
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// The name of the combiner in use.
    pub fn combiner_name(&self) -> &'static str {
        self.combiner.name()
    }

    /// The training statistics.
    pub fn store(&self) -> &TagStore<K, T> {
        &self.store
    }

    /// Create a tag without training it.
    pub fn add_tag(&mut self, tag: K) {
        self.store.add_tag(tag);
        self.cache.invalidate();
    }

    /// Remove a tag; absent tags are ignored.
    ///
    /// Returns `true` when a tag was removed.
    pub fn remove_tag(&mut self, tag: &K) -> bool {
        let removed = self.store.remove_tag(tag).is_some();
        if removed {
            log::info!("removed tag ({} remaining)", self.store.len());
        }
        self.cache.invalidate();
        removed
    }

    /// Give the counter of `old` the identifier `new`.
    pub fn rename_tag(&mut self, old: &K, new: K) -> Result<()> {
        self.store.rename_tag(old, new)?;
        self.cache.invalidate();
        Ok(())
    }

    /// Merge `source` into `dest` and remove `source`.
    pub fn merge_tags(&mut self, source: &K, dest: &K) -> Result<()> {
        self.store.merge_tags(source, dest)?;
        log::info!("merged tags ({} remaining)", self.store.len());
        self.cache.invalidate();
        Ok(())
    }

    /// The counter of `tag`, if it exists.
    pub fn get_tag(&self, tag: &K) -> Option<&TokenCounter<T>> {
        self.store.get_tag(tag)
    }

    /// Tag identifiers in ascending order.
    pub fn tag_ids(&self) -> Vec<&K> {
        self.store.tag_ids()
    }

    /// Train `tag` (created if absent) with the tokens of `input`.
    pub fn train(&mut self, tag: K, input: &str) -> Result<()> {
        let tokens = self.tokenizer.tokenize(input)?;
        self.train_tokens(tag, tokens);
        Ok(())
    }

    /// Train `tag` with already tokenized input.
    pub fn train_tokens<I>(&mut self, tag: K, tokens: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.store.train(tag, tokens);
        self.cache.invalidate();
    }

    /// Remove the tokens of `input` from `tag`; absent tags are ignored.
    pub fn untrain(&mut self, tag: &K, input: &str) -> Result<()> {
        let tokens = self.tokenizer.tokenize(input)?;
        self.untrain_tokens(tag, tokens);
        Ok(())
    }

    /// Remove already tokenized input from `tag`.
    ///
    /// Returns `false` when `tag` does not exist.
    pub fn untrain_tokens<I>(&mut self, tag: &K, tokens: I) -> bool
    where
        I: IntoIterator<Item = T>,
    {
        let changed = self.store.untrain(tag, tokens);
        if changed {
            self.cache.invalidate();
        }
        changed
    }

    /// Score `input` against every tag, highest first.
    ///
    /// Tags that share no discriminating token with the input are omitted.
    pub fn classify(&mut self, input: &str) -> Result<Scores<K>> {
        let tokens = self.tokenizer.tokenize(input)?;
        self.classify_tokens(&tokens)
    }

    /// Score already tokenized input.
    pub fn classify_tokens(&mut self, tokens: &[T]) -> Result<Scores<K>> {
        let table = self.cache.get_or_rebuild(&self.store, &self.config);
        table.score(tokens, self.combiner.as_ref(), self.config.max_probabilities)
    }

    /// Score `input` without rebuilding the cache.
    ///
    /// Returns `None` when the cache is stale.
    pub fn classify_cached(&self, input: &str) -> Result<Option<Scores<K>>> {
        let Some(table) = self.cache.table() else {
            return Ok(None);
        };
        let tokens = self.tokenizer.tokenize(input)?;
        table
            .score(&tokens, self.combiner.as_ref(), self.config.max_probabilities)
            .map(Some)
    }

    /// Whether the score cache reflects the current statistics.
    pub fn is_cache_fresh(&self) -> bool {
        self.cache.is_fresh()
    }

    /// Rebuild the score cache now if it is stale.
    pub fn refresh_cache(&mut self) {
        self.cache.get_or_rebuild(&self.store, &self.config);
    }

    /// A copy of the full training state.
    pub fn export_state(&self) -> TagStore<K, T> {
        self.store.clone()
    }

    /// Replace the full training state.
    pub fn import_state(&mut self, store: TagStore<K, T>) {
        self.store = store;
        self.cache.invalidate();
    }
}

impl<K, T> Classifier<K, T>
where
    K: Eq + Hash + Ord + Clone + Serialize + DeserializeOwned,
    T: Eq + Hash + Clone + Serialize + DeserializeOwned,
{
    /// Serialize the training state to a JSON string.
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.store)?)
    }

    /// Replace the training state with one read from a JSON string.
    pub fn import_json(&mut self, json: &str) -> Result<()> {
        let store: TagStore<K, T> = serde_json::from_str(json)?;
        self.import_state(store);
        Ok(())
    }

    /// Write the training state to a JSON file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.export_json()?)?;
        log::info!("saved {} tags to {}", self.store.len(), path.display());
        Ok(())
    }

    /// Replace the training state with the contents of a JSON file.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        self.import_json(&content)?;
        log::info!("loaded {} tags from {}", self.store.len(), path.display());
        Ok(())
    }
}
