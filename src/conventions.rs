//! Market conventions shared by the kernel and its callers.
//!
//! Time to expiry is an ACT/365 year fraction, rates are continuously
//! compounded.

/// Calendar days per year used to convert day counts into year fractions.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Fallback rate upstream pipelines substitute when no rate is recorded.
///
/// The kernel never applies this itself; callers pass it explicitly to
/// [`QuoteRow::to_option_quote`](crate::quote::QuoteRow::to_option_quote).
pub const FALLBACK_RISK_FREE_RATE: f64 = 0.02;

/// Convert a calendar-day count to a year fraction: T = days / 365.
pub fn years_from_days(days: f64) -> f64 {
    days / DAYS_PER_YEAR
}

/// Discount factor e^(−r·T).
pub fn discount_factor(rate: f64, expiry: f64) -> f64 {
    (-rate * expiry).exp()
}

/// Compute forward price from spot: F = S · exp(r · T).
pub fn forward_price(spot: f64, rate: f64, expiry: f64) -> f64 {
    spot * (rate * expiry).exp()
}

/// Convert a strike to log-moneyness: k = ln(K / F).
pub fn log_moneyness(strike: f64, forward: f64) -> f64 {
    (strike / forward).ln()
}
