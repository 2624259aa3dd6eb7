//! Robinson-Fisher's method.

use crate::bayes::combiner::Combiner;
use crate::error::{Result, TagbayesError};

/// Combines probabilities with Fisher's inverse chi-squared method.
///
/// ```text
/// H = C^-1(-2 ln(prod(p)), 2n)
/// S = C^-1(-2 ln(prod(1 - p)), 2n)
/// I = (1 + H - S) / 2
/// ```
///
/// A side whose statistic cannot be represented (the product underflowed
/// to zero) counts as `0.0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RobinsonFisherCombiner;

impl RobinsonFisherCombiner {
    /// Create a new Robinson-Fisher combiner.
    pub fn new() -> Self {
        RobinsonFisherCombiner
    }
}

impl Combiner for RobinsonFisherCombiner {
    fn combine(&self, probabilities: &[f64]) -> Result<f64> {
        if probabilities.is_empty() {
            return Err(TagbayesError::invalid_argument(
                "cannot combine an empty probability list",
            ));
        }

        let df = 2 * probabilities.len();
        let likeness = probabilities.iter().fold(1.0, |acc, x| acc * x);
        let unlikeness = probabilities.iter().fold(1.0, |acc, x| acc * (1.0 - x));

        let h = chi2_survival(-2.0 * likeness.ln(), df).unwrap_or(0.0);
        let s = chi2_survival(-2.0 * unlikeness.ln(), df).unwrap_or(0.0);
        Ok((1.0 + h - s) / 2.0)
    }

    fn name(&self) -> &'static str {
        "robinson_fisher"
    }
}

/// Right tail of the chi-squared distribution with an even number of
/// degrees of freedom, capped at `1.0`.
///
/// Returns `None` when `chi` or the series leaves the finite range.
pub fn chi2_survival(chi: f64, df: usize) -> Option<f64> {
    if !chi.is_finite() {
        return None;
    }

    let m = chi / 2.0;
    let mut term = (-m).exp();
    let mut sum = term;
    for i in 1..=df / 2 {
        term *= m / i as f64;
        sum += term;
    }

    sum.is_finite().then(|| sum.min(1.0))
}
