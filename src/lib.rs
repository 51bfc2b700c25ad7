//! # ivkernel
//!
//! Implied volatility and risk-neutral in-the-money probability for
//! European call quotes.
//!
//! Given an observed call price with spot, strike, time to expiry and rate,
//! the kernel recovers the Black-Scholes volatility that reproduces the
//! price and, from it, the probability that the call finishes in the money.
//!
//! ## Architecture
//!
//! - **`pricing`** — Black-Scholes call price, vega, no-arbitrage band
//! - **`implied`** — Newton-Raphson solver with bisection safeguard
//! - **`probability`** — `N(d2)` ITM probability
//! - **`kernel`** — per-quote and batch evaluation into [`SolverResult`]
//! - **`quote`** — upstream row conventions (price selection, day count, fallback rate)
//!
//! ## Design
//!
//! - **Undefined, not exceptional.** The entry points [`implied_volatility_call`],
//!   [`probability_itm`] and [`evaluate`] return `Option`. Invalid inputs,
//!   arbitrage-inconsistent prices, non-convergence and out-of-band values
//!   all come back as `None`. The `try_*` / [`ImpliedVolSolver::solve`]
//!   layer returns [`Result`] with the reason.
//! - **No panics.** Library code never calls `unwrap()` or `expect()`.
//! - **No implicit defaults.** The kernel never substitutes a rate; callers
//!   pass one, optionally via [`quote::QuoteRow::to_option_quote`].
//! - **Stateless and thread-safe.** Every function is pure; batch callers
//!   can partition freely. The `parallel` feature runs
//!   [`evaluate_batch`] on rayon.
//! - **Logging.** The `logging` feature emits `tracing` events from the
//!   solver and batch evaluation.

pub mod conventions;
pub mod error;
pub mod implied;
pub mod kernel;
pub mod pricing;
pub mod probability;
pub mod quote;
pub mod types;
mod validate;

#[doc(inline)]
pub use error::{KernelError, Result};
#[doc(inline)]
pub use implied::{ImpliedVolSolver, SolverConfig, implied_volatility_call};
#[doc(inline)]
pub use kernel::{BatchSummary, evaluate, evaluate_batch};
#[doc(inline)]
pub use probability::probability_itm;
#[doc(inline)]
pub use types::{OptionQuote, Probability, SolverResult, Vol};
