//! Strategies that fold per-token probabilities into one tag score.
//!
//! - [`RobinsonCombiner`]: geometric-mean based Robinson method (default)
//! - [`RobinsonFisherCombiner`]: Fisher's chi-squared combination

use serde::{Deserialize, Serialize};

use crate::error::Result;

mod robinson;
mod robinson_fisher;

pub use robinson::RobinsonCombiner;
pub use robinson_fisher::{RobinsonFisherCombiner, chi2_survival};

/// Combines the probabilities of the tokens an input shares with a tag.
pub trait Combiner: Send + Sync {
    /// Combine `probabilities` (each in `(0, 1)`) into a score in `[0, 1]`.
    ///
    /// Fails with an invalid-argument error when `probabilities` is empty.
    fn combine(&self, probabilities: &[f64]) -> Result<f64>;

    /// Get the name of this combiner for debugging and logging.
    fn name(&self) -> &'static str;
}

/// Selects a combiner from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombinerKind {
    /// Robinson's method.
    #[default]
    Robinson,
    /// Robinson-Fisher's method.
    RobinsonFisher,
}

impl CombinerKind {
    /// Build the selected combiner.
    pub fn build(self) -> Box<dyn Combiner> {
        match self {
            CombinerKind::Robinson => Box::new(RobinsonCombiner::new()),
            CombinerKind::RobinsonFisher => Box::new(RobinsonFisherCombiner::new()),
        }
    }
}
