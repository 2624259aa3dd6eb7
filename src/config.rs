//! Classifier configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bayes::CombinerKind;
use crate::error::{Result, TagbayesError};

/// Tunables of the score cache and the classifier.
///
/// Missing fields take their default when deserialized, so a config file
/// only needs to name what it changes:
///
/// ```
/// use tagbayes::config::ClassifierConfig;
/// use tagbayes::bayes::CombinerKind;
///
/// let config: ClassifierConfig =
///     serde_json::from_str(r#"{"combiner": "robinson_fisher"}"#).unwrap();
/// assert_eq!(config.combiner, CombinerKind::RobinsonFisher);
/// assert_eq!(config.max_probabilities, 2048);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Smallest distance a cached probability keeps from 0 and 1; counts
    /// closer to zero than this are treated as absent.
    pub tolerance: f64,
    /// Minimum distance from 0.5 for a token to be cached for a tag.
    pub threshold: f64,
    /// Most probabilities handed to the combiner per tag.
    pub max_probabilities: usize,
    /// Score combination method.
    pub combiner: CombinerKind,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.0001,
            threshold: 0.1,
            max_probabilities: 2048,
            combiner: CombinerKind::Robinson,
        }
    }
}

impl ClassifierConfig {
    /// Load a configuration from a JSON file and validate it.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ClassifierConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the values describe a usable classifier.
    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance > 0.0 && self.tolerance < 0.5) {
            return Err(TagbayesError::config(format!(
                "tolerance must be in (0, 0.5), got {}",
                self.tolerance
            )));
        }
        if !(self.threshold >= 0.0 && self.threshold <= 0.5) {
            return Err(TagbayesError::config(format!(
                "threshold must be in [0, 0.5], got {}",
                self.threshold
            )));
        }
        if self.max_probabilities == 0 {
            return Err(TagbayesError::config(
                "max_probabilities must be at least 1",
            ));
        }
        Ok(())
    }
}
