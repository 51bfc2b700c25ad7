//! Input validation helpers.
//!
//! Standardizes validation across the crate using `!is_finite()` to reject
//! NaN, +Inf, and -Inf uniformly. A NaN is how a missing or unparseable
//! upstream field reaches the kernel.

use crate::error::KernelError;

/// Validate that a value is strictly positive and finite (rejects NaN, Inf, zero, negatives).
pub(crate) fn validate_positive(value: f64, name: &str) -> crate::error::Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(KernelError::InvalidInput {
            message: format!("{name} must be positive and finite, got {value}"),
        });
    }
    Ok(value)
}

/// Validate that a value is finite (rejects NaN and Inf; allows zero and negatives).
pub(crate) fn validate_finite(value: f64, name: &str) -> crate::error::Result<f64> {
    if !value.is_finite() {
        return Err(KernelError::InvalidInput {
            message: format!("{name} must be finite, got {value}"),
        });
    }
    Ok(value)
}

/// Validate the market parameters shared by every kernel entry point.
pub(crate) fn validate_market(
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
) -> crate::error::Result<()> {
    validate_positive(spot, "spot")?;
    validate_positive(strike, "strike")?;
    validate_positive(expiry, "time_to_expiry_years")?;
    validate_finite(rate, "risk_free_rate")?;
    Ok(())
}

/// Validate an observed call price against the tradeable floor and the
/// no-arbitrage band `[max(0, S − K·e^(−rT)), S]`.
///
/// `epsilon` is scaled by `1 + S` so the band check is insensitive to the
/// price level.
pub(crate) fn validate_call_price(
    price: f64,
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    min_price: f64,
    epsilon: f64,
) -> crate::error::Result<f64> {
    if price.is_nan() {
        return Err(KernelError::InvalidInput {
            message: "observed_price is missing".into(),
        });
    }
    if price < min_price {
        return Err(KernelError::InvalidInput {
            message: format!("observed_price {price} below minimum tradeable price {min_price}"),
        });
    }

    let (lower, upper) = crate::pricing::call_bounds(spot, strike, expiry, rate);
    let slack = epsilon * (1.0 + upper);
    if !price.is_finite() || price < lower - slack || price > upper + slack {
        return Err(KernelError::ArbitrageViolation {
            price,
            lower,
            upper,
        });
    }
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_rejects_zero_negative_and_nan() {
        assert!(validate_positive(1.0, "x").is_ok());
        assert!(validate_positive(0.0, "x").is_err());
        assert!(validate_positive(-2.0, "x").is_err());
        assert!(validate_positive(f64::NAN, "x").is_err());
        assert!(validate_positive(f64::INFINITY, "x").is_err());
    }

    #[test]
    fn finite_accepts_negative_rate() {
        assert!(validate_finite(-0.005, "rate").is_ok());
        assert!(validate_finite(f64::NAN, "rate").is_err());
    }

    #[test]
    fn market_requires_rate() {
        let err = validate_market(100.0, 100.0, 0.25, f64::NAN).unwrap_err();
        match err {
            KernelError::InvalidInput { message } => assert!(message.contains("risk_free_rate")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn call_price_below_floor_is_invalid_input() {
        let err = validate_call_price(0.005, 100.0, 150.0, 0.02, 0.02, 0.01, 1e-9).unwrap_err();
        assert!(matches!(err, KernelError::InvalidInput { .. }));
    }

    #[test]
    fn call_price_below_intrinsic_is_arbitrage() {
        let err = validate_call_price(5.0, 50.0, 40.0, 0.5, 0.02, 0.01, 1e-9).unwrap_err();
        match err {
            KernelError::ArbitrageViolation { lower, upper, .. } => {
                assert!((lower - 10.398).abs() < 1e-3);
                assert_eq!(upper, 50.0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn call_price_above_spot_is_arbitrage() {
        let err = validate_call_price(101.0, 100.0, 100.0, 1.0, 0.02, 0.01, 1e-9).unwrap_err();
        assert!(matches!(err, KernelError::ArbitrageViolation { .. }));
    }

    #[test]
    fn infinite_price_is_rejected() {
        assert!(validate_call_price(f64::INFINITY, 100.0, 100.0, 1.0, 0.02, 0.01, 1e-9).is_err());
    }
}
