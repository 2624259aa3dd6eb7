//! Per-tag token occurrence counts.

use std::hash::Hash;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Counts within this distance of one are treated as exactly one when a
/// token is untrained.
const COUNT_TOLERANCE: f64 = 0.0001;

/// Occurrence counts of tokens for one tag (or for all tags together).
///
/// Counts are stored as `f64` so that the score computations work on a
/// single numeric type. Entries never hold zero: a count that would drop
/// to zero removes the entry. Tokens keep the order in which they were
/// first counted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenCounter<T>
where
    T: Eq + Hash,
{
    /// Number of train and untrain events recorded on this counter.
    #[serde(rename = "TrainCount")]
    train_count: i64,
    /// Running total of counted tokens.
    #[serde(rename = "TokenCount")]
    token_count: i64,
    #[serde(rename = "Items")]
    counts: IndexMap<T, f64>,
}

impl<T> Default for TokenCounter<T>
where
    T: Eq + Hash,
{
    fn default() -> Self {
        Self {
            train_count: 0,
            token_count: 0,
            counts: IndexMap::new(),
        }
    }
}

impl<T> PartialEq for TokenCounter<T>
where
    T: Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.train_count == other.train_count
            && self.token_count == other.token_count
            && self.counts == other.counts
    }
}

impl<T> TokenCounter<T>
where
    T: Eq + Hash,
{
    /// Create an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of train and untrain events recorded.
    pub fn train_count(&self) -> i64 {
        self.train_count
    }

    /// Running total of counted tokens.
    pub fn token_count(&self) -> i64 {
        self.token_count
    }

    /// Count stored for `token`, or `0.0` when it was never seen.
    pub fn get(&self, token: &T) -> f64 {
        self.counts.get(token).copied().unwrap_or(0.0)
    }

    /// Whether `token` has a count.
    pub fn contains(&self, token: &T) -> bool {
        self.counts.contains_key(token)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no token has a count.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over `(token, count)` pairs in first-counted order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, f64)> {
        self.counts.iter().map(|(token, count)| (token, *count))
    }

    pub(crate) fn record_training(&mut self) {
        self.train_count += 1;
    }

    pub(crate) fn add_token_count(&mut self, amount: i64) {
        self.token_count += amount;
    }

    /// Add `amount` to the count of `token`, creating the entry if needed.
    ///
    /// Returns `true` when the token was not counted before.
    pub(crate) fn add(&mut self, token: T, amount: f64) -> bool {
        match self.counts.get_mut(&token) {
            Some(count) => {
                *count += amount;
                false
            }
            None => {
                self.counts.insert(token, amount);
                true
            }
        }
    }

    /// Take one occurrence of `token` away, dropping the entry when it
    /// reaches zero. Tokens without a positive count are left alone.
    ///
    /// Returns `true` when a count was decremented.
    pub(crate) fn decrement(&mut self, token: &T) -> bool {
        let Some(count) = self.counts.get_mut(token) else {
            return false;
        };
        if *count <= 0.0 {
            return false;
        }

        if (*count - 1.0).abs() < COUNT_TOLERANCE {
            self.counts.shift_remove(token);
        } else {
            *count -= 1.0;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get() {
        let mut counter = TokenCounter::new();
        assert!(counter.add("gordo".to_string(), 1.0));
        assert!(!counter.add("gordo".to_string(), 2.0));
        assert!(counter.add("magro".to_string(), 1.0));

        assert_eq!(counter.get(&"gordo".to_string()), 3.0);
        assert_eq!(counter.get(&"absent".to_string()), 0.0);
        assert_eq!(counter.len(), 2);
    }

    #[test]
    fn test_decrement_removes_entry_at_one() {
        let mut counter = TokenCounter::new();
        counter.add("bla", 2.0);

        assert!(counter.decrement(&"bla"));
        assert_eq!(counter.get(&"bla"), 1.0);

        assert!(counter.decrement(&"bla"));
        assert!(!counter.contains(&"bla"));
        assert!(counter.is_empty());

        assert!(!counter.decrement(&"bla"));
    }

    #[test]
    fn test_decrement_tolerates_rounding() {
        let mut counter = TokenCounter::new();
        counter.add("x", 1.00005);
        assert!(counter.decrement(&"x"));
        assert!(!counter.contains(&"x"));
    }

    #[test]
    fn test_iteration_order_is_first_counted() {
        let mut counter = TokenCounter::new();
        for token in ["c", "a", "b", "a"] {
            counter.add(token, 1.0);
        }
        let order: Vec<&str> = counter.iter().map(|(t, _)| *t).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_json_shape() {
        let mut counter = TokenCounter::new();
        counter.add("dog".to_string(), 2.0);
        counter.add_token_count(2);
        counter.record_training();

        let json = serde_json::to_string(&counter).unwrap();
        assert_eq!(json, r#"{"TrainCount":1,"TokenCount":2,"Items":{"dog":2.0}}"#);

        let back: TokenCounter<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, counter);
    }
}
