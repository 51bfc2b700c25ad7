//! Error types for the ivkernel library.
//!
//! The diagnostic layer (`try_*` functions, [`ImpliedVolSolver::solve`](crate::implied::ImpliedVolSolver::solve))
//! returns `Result<T, KernelError>` so every failure branch can be inspected.
//! The public kernel functions collapse these into `None`: a domain-invalid
//! quote is an expected outcome, not an exceptional one.

use thiserror::Error;

/// Convenience type alias for results in this crate.
pub type Result<T> = std::result::Result<T, KernelError>;

/// Reasons the kernel could not produce a value.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum KernelError {
    /// Input lies outside the kernel's domain (non-positive spot/strike/expiry,
    /// missing rate, sub-floor price, non-positive vol).
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// Observed price is inconsistent with any volatility.
    #[error("price {price} outside no-arbitrage band [{lower}, {upper}]")]
    ArbitrageViolation {
        price: f64,
        /// `max(0, S − K·e^(−rT))`.
        lower: f64,
        /// Spot price `S`.
        upper: f64,
    },

    /// Iteration budget exhausted without the residual dropping below tolerance.
    #[error("solver did not converge after {iterations} iterations (residual {last_residual:e})")]
    NonConvergence {
        iterations: usize,
        /// `price(σ) − C` at the last evaluated σ.
        last_residual: f64,
    },

    /// A computed value fell outside its accepted range.
    #[error("out of band: {message}")]
    OutOfBand { message: String, value: f64 },

    /// Solver configuration rejected.
    #[error("invalid config: {message}")]
    InvalidConfig { message: String },
}
