//! Implied volatility extraction from call prices.
//!
//! - [`ImpliedVolSolver`] — configurable Newton-Raphson solver with bisection safeguard
//! - [`SolverConfig`] — tolerances, iteration cap and vol band
//! - [`implied_volatility_call`] — the kernel entry point with the default policy

pub mod black;
pub mod config;

pub use black::{ImpliedVolSolver, brenner_subrahmanyam_seed};
pub use config::SolverConfig;

use crate::types::Vol;

/// Highest implied volatility the kernel will report (500% annualized).
pub const MAX_VOL: f64 = 5.0;

/// Smallest option price treated as a real trade.
pub const MIN_TRADEABLE_PRICE: f64 = 0.01;

/// Implied volatility of a European call, or `None` when the quote admits none.
///
/// `None` covers every failure: invalid market inputs, a price below 0.01 or
/// outside the no-arbitrage band, non-convergence, and an out-of-band result.
/// Use [`ImpliedVolSolver::solve`] to see which.
///
/// # Examples
/// ```
/// use ivkernel::implied::implied_volatility_call;
///
/// assert!(implied_volatility_call(6.2163, 100.0, 100.0, 0.25, 0.02).is_some());
/// assert!(implied_volatility_call(0.005, 100.0, 150.0, 0.02, 0.02).is_none());
/// ```
pub fn implied_volatility_call(
    observed_price: f64,
    spot: f64,
    strike: f64,
    time_to_expiry_years: f64,
    risk_free_rate: f64,
) -> Option<Vol> {
    ImpliedVolSolver::default()
        .solve(
            observed_price,
            spot,
            strike,
            time_to_expiry_years,
            risk_free_rate,
        )
        .ok()
}
