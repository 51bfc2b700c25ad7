//! Per-quote evaluation: validate, solve, then estimate ITM probability.
//!
//! ```text
//! VALIDATE ─invalid─▶ undefined
//!    │ valid
//! SOLVE ─no root / out of band─▶ undefined
//!    │ converged
//! PROB_ITM ─▶ result (probability absent only if N(d2) was not a probability)
//! ```
//!
//! Batch evaluation is an order-preserving map over the same single-quote
//! path; with the `parallel` feature it runs on rayon's global pool.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::implied::ImpliedVolSolver;
use crate::probability::try_probability_itm;
use crate::types::{OptionQuote, SolverResult};

impl ImpliedVolSolver {
    /// Evaluate one quote into a [`SolverResult`].
    pub fn evaluate(&self, quote: &OptionQuote) -> SolverResult {
        let vol = match self.solve(
            quote.observed_price,
            quote.spot,
            quote.strike,
            quote.time_to_expiry_years,
            quote.risk_free_rate,
        ) {
            Ok(vol) => vol,
            Err(_e) => {
                #[cfg(feature = "logging")]
                tracing::trace!(?quote, error = %_e, "quote rejected");
                return SolverResult::undefined();
            }
        };

        let probability = try_probability_itm(
            quote.spot,
            quote.strike,
            quote.time_to_expiry_years,
            quote.risk_free_rate,
            vol.0,
        );
        #[cfg(feature = "logging")]
        {
            if let Err(e) = &probability {
                tracing::debug!(?quote, vol = vol.0, error = %e, "probability ITM undefined");
            }
        }

        SolverResult::resolved(vol, probability.ok())
    }

    /// Evaluate quotes independently; `results[i]` belongs to `quotes[i]`.
    pub fn evaluate_batch(&self, quotes: &[OptionQuote]) -> Vec<SolverResult> {
        #[cfg(feature = "logging")]
        tracing::debug!(n_quotes = quotes.len(), "batch evaluation started");

        #[cfg(feature = "parallel")]
        let results: Vec<SolverResult> = quotes.par_iter().map(|q| self.evaluate(q)).collect();
        #[cfg(not(feature = "parallel"))]
        let results: Vec<SolverResult> = quotes.iter().map(|q| self.evaluate(q)).collect();

        #[cfg(feature = "logging")]
        {
            let summary = BatchSummary::from_results(&results);
            tracing::debug!(
                total = summary.total,
                with_iv = summary.with_implied_volatility,
                with_prob = summary.with_probability_itm,
                "batch evaluation complete"
            );
        }

        results
    }
}

/// Evaluate one quote with the default solver policy.
///
/// # Examples
/// ```
/// use ivkernel::{evaluate, OptionQuote};
///
/// let result = evaluate(&OptionQuote::new(50.0, 40.0, 0.5, 0.02, 5.0));
/// assert!(result.is_undefined());
/// ```
pub fn evaluate(quote: &OptionQuote) -> SolverResult {
    ImpliedVolSolver::default().evaluate(quote)
}

/// Evaluate many quotes with the default solver policy, preserving order.
pub fn evaluate_batch(quotes: &[OptionQuote]) -> Vec<SolverResult> {
    ImpliedVolSolver::default().evaluate_batch(quotes)
}

/// Output coverage across a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Number of quotes evaluated.
    pub total: usize,
    /// Quotes with an implied volatility.
    pub with_implied_volatility: usize,
    /// Quotes with an ITM probability.
    pub with_probability_itm: usize,
}

impl BatchSummary {
    /// Count populated outputs in `results`.
    pub fn from_results(results: &[SolverResult]) -> Self {
        results.iter().fold(
            Self {
                total: results.len(),
                ..Self::default()
            },
            |mut acc, r| {
                if r.implied_volatility().is_some() {
                    acc.with_implied_volatility += 1;
                }
                if r.probability_itm().is_some() {
                    acc.with_probability_itm += 1;
                }
                acc
            },
        )
    }

    /// Fraction of quotes with an implied volatility; 0 for an empty batch.
    pub fn coverage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.with_implied_volatility as f64 / self.total as f64
    }
}
