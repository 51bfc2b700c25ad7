//! Property-based tests using proptest.
//!
//! These tests verify invariant properties across random inputs rather than
//! testing fixed examples.

use ivkernel::implied::MAX_VOL;
use ivkernel::pricing::{call_bounds, call_price, vega};
use ivkernel::{OptionQuote, evaluate, implied_volatility_call, probability_itm};
use proptest::prelude::*;

// --- Property Test 1: Round-trip recovery ---

proptest! {
    /// Pricing at σ_true and inverting recovers σ_true.
    ///
    /// Quotes with a sub-floor price or negligible vega carry no information
    /// about σ at the 1e-4 level and are skipped.
    #[test]
    fn round_trip_recovers_vol(
        spot in 20.0_f64..500.0,
        moneyness in 0.7_f64..1.3,
        expiry in 0.05_f64..2.0,
        rate in -0.01_f64..0.08,
        sigma in 0.05_f64..2.0,
    ) {
        let strike = spot * moneyness;
        let price = call_price(spot, strike, expiry, rate, sigma);
        prop_assume!(price >= 0.01);
        prop_assume!(vega(spot, strike, expiry, rate, sigma) > 0.05);
        let (_, upper) = call_bounds(spot, strike, expiry, rate);
        prop_assume!(price < upper * (1.0 - 1e-6));

        let vol = implied_volatility_call(price, spot, strike, expiry, rate);
        prop_assert!(vol.is_some(), "no vol for price {}", price);
        let vol = vol.unwrap();
        prop_assert!(
            (vol.0 - sigma).abs() < 1e-4,
            "recovered {} vs true {}",
            vol.0,
            sigma
        );
    }
}

// --- Property Test 2: Monotonicity in vol ---

proptest! {
    /// Call price is strictly increasing in σ wherever vega is resolvable.
    #[test]
    fn call_price_increasing_in_vol(
        moneyness in 0.9_f64..1.1,
        expiry in 0.25_f64..2.0,
        rate in 0.0_f64..0.05,
        sigma in 0.1_f64..1.5,
        bump in 0.01_f64..0.5,
    ) {
        let strike = 100.0 * moneyness;
        let low = call_price(100.0, strike, expiry, rate, sigma);
        let high = call_price(100.0, strike, expiry, rate, sigma + bump);
        prop_assert!(high > low, "C({}) = {} not above C({}) = {}", sigma + bump, high, sigma, low);
    }
}

// --- Property Test 3: No-arbitrage rejection ---

proptest! {
    /// Prices below intrinsic or above spot never produce a volatility.
    #[test]
    fn outside_band_is_undefined(
        spot in 20.0_f64..200.0,
        strike in 10.0_f64..150.0,
        expiry in 0.05_f64..2.0,
        rate in 0.0_f64..0.05,
        shift in 0.01_f64..5.0,
    ) {
        let (lower, upper) = call_bounds(spot, strike, expiry, rate);
        let above = upper + shift;
        prop_assert!(implied_volatility_call(above, spot, strike, expiry, rate).is_none());

        let below = lower - shift;
        if below >= 0.01 {
            prop_assert!(implied_volatility_call(below, spot, strike, expiry, rate).is_none());
        }
    }
}

// --- Property Test 4: Domain rejection ---

proptest! {
    /// Non-positive spot, strike or expiry, or a sub-floor price, leaves
    /// both outputs undefined.
    #[test]
    fn domain_violation_is_undefined(
        bad in -50.0_f64..=0.0,
        tiny_price in 0.0_f64..0.01,
        which in 0usize..4,
    ) {
        let quote = match which {
            0 => OptionQuote::new(bad, 100.0, 0.5, 0.02, 5.0),
            1 => OptionQuote::new(100.0, bad, 0.5, 0.02, 5.0),
            2 => OptionQuote::new(100.0, 100.0, bad, 0.02, 5.0),
            _ => OptionQuote::new(100.0, 100.0, 0.5, 0.02, tiny_price),
        };
        let result = evaluate(&quote);
        prop_assert!(result.implied_volatility().is_none());
        prop_assert!(result.probability_itm().is_none());
    }
}

// --- Property Test 5: Boundedness and conditional dependency ---

proptest! {
    /// Any reported vol is in (0, 5]; any reported probability is in [0, 1]
    /// and only appears alongside a vol.
    #[test]
    fn outputs_bounded_and_dependent(
        spot in 1.0_f64..500.0,
        strike in 1.0_f64..800.0,
        expiry in 0.001_f64..3.0,
        rate in -0.02_f64..0.1,
        price_frac in 0.0_f64..1.1,
    ) {
        let result = evaluate(&OptionQuote::new(spot, strike, expiry, rate, spot * price_frac));

        if let Some(vol) = result.implied_volatility() {
            prop_assert!(vol.0 > 0.0 && vol.0 <= MAX_VOL, "vol {} out of band", vol.0);
        }
        if let Some(p) = result.probability_itm() {
            prop_assert!((0.0..=1.0).contains(&p.0), "probability {} out of range", p.0);
            prop_assert!(result.implied_volatility().is_some());
        }
    }
}

// --- Property Test 6: Probability range ---

proptest! {
    /// N(d2) stays in [0, 1] for every in-band vol.
    #[test]
    fn probability_in_unit_interval(
        spot in 1.0_f64..500.0,
        strike in 1.0_f64..500.0,
        expiry in 0.001_f64..5.0,
        rate in -0.02_f64..0.1,
        sigma in 0.001_f64..5.0,
    ) {
        let p = probability_itm(spot, strike, expiry, rate, sigma);
        prop_assert!(p.is_some());
        let p = p.unwrap();
        prop_assert!((0.0..=1.0).contains(&p.0));
    }
}
