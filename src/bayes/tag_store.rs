//! Token statistics for every tag.

use std::hash::Hash;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::bayes::token_counter::TokenCounter;
use crate::error::{Result, TagbayesError};

/// One [`TokenCounter`] per tag plus the system counter summing all tags.
///
/// Tags keep their creation order; that order decides how ties are ranked
/// at classification time and in which order [`TagStore::merge_tags`]
/// visits tokens.
///
/// The serialized form is
/// `{"Items": {tag: counter, ...}, "SystemTag": counter}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagStore<K, T>
where
    K: Eq + Hash,
    T: Eq + Hash,
{
    #[serde(rename = "Items")]
    tags: IndexMap<K, TokenCounter<T>>,
    #[serde(rename = "SystemTag", default = "TokenCounter::new")]
    system: TokenCounter<T>,
}

impl<K, T> Default for TagStore<K, T>
where
    K: Eq + Hash,
    T: Eq + Hash,
{
    fn default() -> Self {
        Self {
            tags: IndexMap::new(),
            system: TokenCounter::new(),
        }
    }
}

impl<K, T> TagStore<K, T>
where
    K: Eq + Hash,
    T: Eq + Hash,
{
    /// Counter of `tag`, if it exists.
    pub fn get_tag(&self, tag: &K) -> Option<&TokenCounter<T>> {
        self.tags.get(tag)
    }

    /// The counter summing every trained token across all tags.
    pub fn system_tag(&self) -> &TokenCounter<T> {
        &self.system
    }

    /// Iterate over tags and their counters in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &TokenCounter<T>)> {
        self.tags.iter()
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the store has no tags.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl<K, T> TagStore<K, T>
where
    K: Eq + Hash + Ord + Clone,
    T: Eq + Hash + Clone,
{
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty counter for `tag` unless one exists.
    ///
    /// Returns `true` when the tag was created.
    pub fn add_tag(&mut self, tag: K) -> bool {
        if self.tags.contains_key(&tag) {
            return false;
        }
        self.tags.insert(tag, TokenCounter::new());
        true
    }

    /// Remove `tag`, returning its counter if it existed.
    ///
    /// The system counter keeps the removed tag's counts.
    pub fn remove_tag(&mut self, tag: &K) -> Option<TokenCounter<T>> {
        self.tags.shift_remove(tag)
    }

    /// Move the counter of `old` to `new`, replacing any counter `new` had.
    ///
    /// Renaming a tag to its own identifier leaves the store unchanged; the
    /// tag is not dropped.
    pub fn rename_tag(&mut self, old: &K, new: K) -> Result<()> {
        if !self.tags.contains_key(old) {
            return Err(TagbayesError::not_found("source tag of rename does not exist"));
        }
        if *old == new {
            return Ok(());
        }

        if let Some(counter) = self.tags.shift_remove(old) {
            self.tags.insert(new, counter);
        }
        Ok(())
    }

    /// Fold the tokens of `source` into `dest` and remove `source`.
    ///
    /// See [`merge_positional`] for how much each token contributes.
    pub fn merge_tags(&mut self, source: &K, dest: &K) -> Result<()> {
        if source == dest {
            return Err(TagbayesError::invalid_argument(
                "cannot merge a tag into itself",
            ));
        }
        if !self.tags.contains_key(dest) {
            return Err(TagbayesError::not_found("destination tag of merge does not exist"));
        }
        let source_counter = self
            .tags
            .get(source)
            .ok_or_else(|| TagbayesError::not_found("source tag of merge does not exist"))?
            .clone();

        if let Some(dest_counter) = self.tags.get_mut(dest) {
            merge_positional(&source_counter, dest_counter);
        }
        self.remove_tag(source);
        Ok(())
    }

    /// Tag identifiers in ascending order.
    pub fn tag_ids(&self) -> Vec<&K> {
        let mut ids: Vec<&K> = self.tags.keys().collect();
        ids.sort();
        ids
    }

    /// Count every token once for `tag` (created if absent) and for the
    /// system counter.
    pub fn train<I>(&mut self, tag: K, tokens: I)
    where
        I: IntoIterator<Item = T>,
    {
        let counter = self.tags.entry(tag).or_default();
        let mut processed = 0;
        for token in tokens {
            counter.add(token.clone(), 1.0);
            self.system.add(token, 1.0);
            processed += 1;
        }

        counter.add_token_count(processed);
        counter.record_training();
        self.system.add_token_count(processed);
        self.system.record_training();
    }

    /// Take every token away once from `tag` and from the system counter.
    ///
    /// Returns `false` without touching anything when `tag` does not exist.
    pub fn untrain<I>(&mut self, tag: &K, tokens: I) -> bool
    where
        I: IntoIterator<Item = T>,
    {
        let Some(counter) = self.tags.get_mut(tag) else {
            return false;
        };

        for token in tokens {
            untrain_token(counter, &token);
            untrain_token(&mut self.system, &token);
        }

        // Untraining is recorded as one more training event.
        counter.record_training();
        self.system.record_training();
        true
    }
}

/// Remove one occurrence of `token` from `counter`.
///
/// The running token total drops by one for every token processed, whether
/// or not the token had a count.
fn untrain_token<T>(counter: &mut TokenCounter<T>, token: &T)
where
    T: Eq + Hash,
{
    counter.decrement(token);
    counter.add_token_count(-1);
}

/// Add the entries of `source` to `dest`.
///
/// The n-th entry visited (in first-counted order, starting at one)
/// contributes `n` to its token's count in `dest`, whatever its own count
/// in `source` is. Each token new to `dest` raises its token total by one.
fn merge_positional<T>(source: &TokenCounter<T>, dest: &mut TokenCounter<T>)
where
    T: Eq + Hash + Clone,
{
    for (position, (token, _count)) in source.iter().enumerate() {
        let contribution = (position + 1) as f64;
        if dest.add(token.clone(), contribution) {
            dest.add_token_count(1);
        }
    }
}
