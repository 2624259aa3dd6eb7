//! Per-tag token probabilities derived from a [`TagStore`].

use std::hash::Hash;

use ahash::AHashMap;
use indexmap::IndexMap;

use crate::bayes::combiner::Combiner;
use crate::bayes::tag_store::TagStore;
use crate::config::ClassifierConfig;
use crate::error::Result;

/// For every tag, the tokens that discriminate it from all other tags and
/// the probability (in `[tolerance, 1 - tolerance]`) that a token points at
/// that tag.
#[derive(Debug, Clone)]
pub struct ScoreTable<K, T> {
    tags: IndexMap<K, AHashMap<T, f64>>,
}

impl<K, T> ScoreTable<K, T>
where
    K: Eq + Hash + Ord + Clone,
    T: Eq + Hash + Clone,
{
    /// Derive the table from the current contents of `store`.
    pub fn build(store: &TagStore<K, T>, config: &ClassifierConfig) -> Self {
        let tolerance = config.tolerance;
        let system = store.system_tag();
        let mut tags = IndexMap::with_capacity(store.len());

        for (tag, counter) in store.iter() {
            let this_count = counter.token_count();
            let this_total = this_count as f64;
            let other_total = (system.token_count() - this_count).max(1) as f64;
            let mut entries = AHashMap::new();

            for (token, system_freq) in system.iter() {
                let this_freq = counter.get(token);
                if this_freq.abs() < tolerance {
                    continue;
                }
                let other_freq = system_freq - this_freq;

                let good = if this_count == 0 {
                    1.0
                } else {
                    (other_freq / this_total).min(1.0)
                };
                let bad = (this_freq / other_total).min(1.0);
                let discriminant = bad / (good + bad);

                if (discriminant - 0.5).abs() >= config.threshold {
                    entries.insert(
                        token.clone(),
                        discriminant.clamp(tolerance, 1.0 - tolerance),
                    );
                }
            }

            tags.insert(tag.clone(), entries);
        }

        Self { tags }
    }

    /// Cached probability of `token` for `tag`.
    pub fn probability(&self, tag: &K, token: &T) -> Option<f64> {
        self.tags.get(tag)?.get(token).copied()
    }

    /// Number of tags in the table, including tags without entries.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the table has no tags.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Total number of `(tag, token)` entries.
    pub fn entry_count(&self) -> usize {
        self.tags.values().map(|entries| entries.len()).sum()
    }

    /// Score `tokens` against every tag, highest score first.
    ///
    /// Tags sharing no cached token with the input are left out. Equal
    /// scores keep tag creation order.
    pub fn score(
        &self,
        tokens: &[T],
        combiner: &dyn Combiner,
        max_probabilities: usize,
    ) -> Result<IndexMap<K, f64>> {
        let mut scored = Vec::new();
        for (tag, entries) in &self.tags {
            let mut probabilities: Vec<f64> = tokens
                .iter()
                .filter_map(|token| entries.get(token).copied())
                .collect();
            keep_highest(&mut probabilities, max_probabilities);

            if !probabilities.is_empty() {
                scored.push((tag.clone(), combiner.combine(&probabilities)?));
            }
        }

        // NaN ranks last.
        let rank = |score: f64| if score.is_nan() { f64::NEG_INFINITY } else { score };
        scored.sort_by(|a, b| rank(b.1).total_cmp(&rank(a.1)));
        Ok(scored.into_iter().collect())
    }
}

/// Keep the `cap` largest values, sorted in descending order.
fn keep_highest(probabilities: &mut Vec<f64>, cap: usize) {
    if cap == 0 {
        probabilities.clear();
        return;
    }
    if probabilities.len() > cap {
        probabilities.select_nth_unstable_by(cap - 1, |a, b| b.total_cmp(a));
        probabilities.truncate(cap);
    }
    probabilities.sort_by(|a, b| b.total_cmp(a));
}

/// Whether the derived table matches the store it was built from.
#[derive(Debug, Clone)]
enum CacheState<K, T> {
    Stale,
    Fresh(ScoreTable<K, T>),
}

/// Lazily rebuilt [`ScoreTable`].
///
/// Any mutation of the store must call [`ScoreCache::invalidate`]; the next
/// read rebuilds the whole table. The table is never patched in place.
#[derive(Debug, Clone)]
pub struct ScoreCache<K, T> {
    state: CacheState<K, T>,
}

impl<K, T> Default for ScoreCache<K, T> {
    fn default() -> Self {
        Self {
            state: CacheState::Stale,
        }
    }
}

impl<K, T> ScoreCache<K, T>
where
    K: Eq + Hash + Ord + Clone,
    T: Eq + Hash + Clone,
{
    /// Create a stale cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the table as out of date.
    pub fn invalidate(&mut self) {
        self.state = CacheState::Stale;
    }

    /// Whether the table can be read without a rebuild.
    pub fn is_fresh(&self) -> bool {
        matches!(self.state, CacheState::Fresh(_))
    }

    /// The current table, if it is fresh.
    pub fn table(&self) -> Option<&ScoreTable<K, T>> {
        match &self.state {
            CacheState::Fresh(table) => Some(table),
            CacheState::Stale => None,
        }
    }

    /// The current table, rebuilding it from `store` first when stale.
    pub fn get_or_rebuild(
        &mut self,
        store: &TagStore<K, T>,
        config: &ClassifierConfig,
    ) -> &ScoreTable<K, T> {
        if !self.is_fresh() {
            let table = ScoreTable::build(store, config);
            log::debug!(
                "rebuilt score cache: {} tags, {} entries",
                table.len(),
                table.entry_count()
            );
            self.state = CacheState::Fresh(table);
        }

        match &self.state {
            CacheState::Fresh(table) => table,
            CacheState::Stale => unreachable!("score cache was rebuilt above"),
        }
    }
}
