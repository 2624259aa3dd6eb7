//! Robinson's method.

use crate::bayes::combiner::Combiner;
use crate::error::{Result, TagbayesError};

/// Combines probabilities with Robinson's geometric-mean method.
///
/// ```text
/// P = 1 - prod(1 - p)^(1/n)
/// Q = 1 - prod(p)^(1/n)
/// S = (1 + (P - Q) / (P + Q)) / 2
/// ```
///
/// `P + Q` is not guarded: if both vanish the result is NaN.
#[derive(Debug, Clone, Copy, Default)]
pub struct RobinsonCombiner;

impl RobinsonCombiner {
    /// Create a new Robinson combiner.
    pub fn new() -> Self {
        RobinsonCombiner
    }
}

impl Combiner for RobinsonCombiner {
    fn combine(&self, probabilities: &[f64]) -> Result<f64> {
        if probabilities.is_empty() {
            return Err(TagbayesError::invalid_argument(
                "cannot combine an empty probability list",
            ));
        }

        let nth = 1.0 / probabilities.len() as f64;
        let p = 1.0 - probabilities.iter().fold(1.0, |acc, x| acc * (1.0 - x)).powf(nth);
        let q = 1.0 - probabilities.iter().fold(1.0, |acc, x| acc * x).powf(nth);
        let s = (p - q) / (p + q);
        Ok((1.0 + s) / 2.0)
    }

    fn name(&self) -> &'static str {
        "robinson"
    }
}
