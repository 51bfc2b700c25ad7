//! Black-Scholes European call pricing.
//!
//! # Formula
//! ```text
//! d1 = (ln(S/K) + (r + σ²/2)·T) / (σ·√T)
//! d2 = d1 − σ·√T
//! C  = S·N(d1) − K·e^(−rT)·N(d2)
//! ν  = S·n(d1)·√T
//! ```
//!
//! These functions assume `S, K, T, σ > 0`. They are the solver's inner loop
//! and do not re-validate; callers outside the crate should go through
//! [`implied_volatility_call`](crate::implied_volatility_call).

use std::f64::consts::SQRT_2;

use crate::conventions::discount_factor;

/// 1/√(2π).
const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Standard normal probability density n(x).
pub fn normal_pdf(x: f64) -> f64 {
    INV_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Standard normal cumulative distribution N(x), via `erfc`.
///
/// `erfc` keeps full relative precision in the lower tail where `1 + erf`
/// would cancel, and saturates to exactly 0 / 1 for large |x|.
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * libm::erfc(-x / SQRT_2)
}

/// The `d1` term of the Black-Scholes formula.
pub fn d1(spot: f64, strike: f64, expiry: f64, rate: f64, vol: f64) -> f64 {
    ((spot / strike).ln() + (rate + 0.5 * vol * vol) * expiry) / (vol * expiry.sqrt())
}

/// The `d2` term of the Black-Scholes formula: `d1 − σ√T`.
pub fn d2(spot: f64, strike: f64, expiry: f64, rate: f64, vol: f64) -> f64 {
    d1(spot, strike, expiry, rate, vol) - vol * expiry.sqrt()
}

/// Black-Scholes price of a European call.
///
/// # Examples
/// ```
/// use ivkernel::pricing::call_price;
/// let c = call_price(100.0, 100.0, 1.0, 0.02, 0.25);
/// assert!(c > 0.0 && c < 100.0);
/// ```
pub fn call_price(spot: f64, strike: f64, expiry: f64, rate: f64, vol: f64) -> f64 {
    let d1 = d1(spot, strike, expiry, rate, vol);
    let d2 = d1 - vol * expiry.sqrt();
    spot * normal_cdf(d1) - strike * discount_factor(rate, expiry) * normal_cdf(d2)
}

/// Vega ∂C/∂σ of a European call.
pub fn vega(spot: f64, strike: f64, expiry: f64, rate: f64, vol: f64) -> f64 {
    let sqrt_t = expiry.sqrt();
    spot * normal_pdf(d1(spot, strike, expiry, rate, vol)) * sqrt_t
}

/// No-arbitrage band `(lower, upper)` for a call price:
/// `lower = max(0, S − K·e^(−rT))`, `upper = S`.
pub fn call_bounds(spot: f64, strike: f64, expiry: f64, rate: f64) -> (f64, f64) {
    let lower = (spot - strike * discount_factor(rate, expiry)).max(0.0);
    (lower, spot)
}
