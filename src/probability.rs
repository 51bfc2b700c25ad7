//! Risk-neutral probability that a call finishes in the money.
//!
//! Under Black-Scholes the terminal spot is lognormal with drift `r − σ²/2`,
//! so `P(S_T > K) = N(d2)`.

use crate::error::KernelError;
use crate::implied::MAX_VOL;
use crate::pricing::{d2, normal_cdf};
use crate::types::Probability;
use crate::validate::{validate_market, validate_positive};

/// Risk-neutral ITM probability `N(d2)`, reporting why it is undefined.
///
/// # Errors
/// - [`KernelError::InvalidInput`] for non-positive `S`, `K`, `T`, or `σ`, or a non-finite rate
/// - [`KernelError::OutOfBand`] if `σ > 5` or the result is not a probability
pub fn try_probability_itm(
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    vol: f64,
) -> crate::error::Result<Probability> {
    validate_market(spot, strike, expiry, rate)?;
    validate_positive(vol, "volatility")?;
    if vol > MAX_VOL {
        return Err(KernelError::OutOfBand {
            message: format!("volatility {vol} above {MAX_VOL}"),
            value: vol,
        });
    }

    let p = normal_cdf(d2(spot, strike, expiry, rate, vol));
    // Reported as a failure, never clamped.
    if !(0.0..=1.0).contains(&p) {
        return Err(KernelError::OutOfBand {
            message: format!("probability {p} outside [0, 1]"),
            value: p,
        });
    }
    Ok(Probability(p))
}

/// Risk-neutral probability that the underlying finishes above `strike`.
///
/// Returns `None` when inputs are out of domain or the result is not a
/// valid probability.
///
/// # Examples
/// ```
/// use ivkernel::probability::probability_itm;
///
/// let p = probability_itm(100.0, 100.0, 1.0, 0.02, 0.25).unwrap();
/// assert!((p.0 - 0.482).abs() < 1e-3);
/// ```
pub fn probability_itm(
    spot: f64,
    strike: f64,
    time_to_expiry_years: f64,
    risk_free_rate: f64,
    volatility: f64,
) -> Option<Probability> {
    try_probability_itm(
        spot,
        strike,
        time_to_expiry_years,
        risk_free_rate,
        volatility,
    )
    .ok()
}
