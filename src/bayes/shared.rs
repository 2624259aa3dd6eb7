//! A classifier that can be shared between threads.

use std::hash::Hash;

use parking_lot::RwLock;

use crate::bayes::classifier::{Classifier, Scores};
use crate::error::Result;

/// Wraps a [`Classifier`] in a read/write lock.
///
/// Mutations take the write lock. Classification runs under the read lock
/// while the score cache is fresh and takes the write lock only when the
/// cache has to be rebuilt first.
#[derive(Debug)]
pub struct SharedClassifier<K, T>
where
    K: Eq + Hash,
    T: Eq + Hash,
{
    inner: RwLock<Classifier<K, T>>,
}

impl<K, T> SharedClassifier<K, T>
where
    K: Eq + Hash + Ord + Clone,
    T: Eq + Hash + Clone,
{
    /// Take ownership of `classifier`.
    pub fn new(classifier: Classifier<K, T>) -> Self {
        Self {
            inner: RwLock::new(classifier),
        }
    }

    /// Score `input`, rebuilding the cache under the write lock if needed.
    pub fn classify(&self, input: &str) -> Result<Scores<K>> {
        if let Some(scores) = self.inner.read().classify_cached(input)? {
            return Ok(scores);
        }
        self.inner.write().classify(input)
    }

    /// Train `tag` with `input`.
    pub fn train(&self, tag: K, input: &str) -> Result<()> {
        self.inner.write().train(tag, input)
    }

    /// Untrain `tag` with `input`.
    pub fn untrain(&self, tag: &K, input: &str) -> Result<()> {
        self.inner.write().untrain(tag, input)
    }

    /// Run `f` with shared access to the classifier.
    pub fn read<R>(&self, f: impl FnOnce(&Classifier<K, T>) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run `f` with exclusive access to the classifier.
    pub fn write<R>(&self, f: impl FnOnce(&mut Classifier<K, T>) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Give back the wrapped classifier.
    pub fn into_inner(self) -> Classifier<K, T> {
        self.inner.into_inner()
    }
}
