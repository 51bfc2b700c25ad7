//! Black-Scholes implied volatility via safeguarded Newton-Raphson.
//!
//! Newton steps on `C(σ) − C_obs` using analytic vega, with a bracket
//! `[σ_lo, σ_hi]` tightened after every price evaluation. Call price is
//! strictly increasing in σ, so the sign of the residual says which side
//! of the root σ lies on. When vega is too small for a useful Newton step,
//! or the step would leave the bracket, the midpoint is taken instead.

use std::f64::consts::PI;

use crate::error::KernelError;
use crate::implied::{MAX_VOL, SolverConfig};
use crate::pricing::{call_price, vega};
use crate::types::Vol;
use crate::validate::{validate_call_price, validate_market};

/// Brenner–Subrahmanyam initial guess `σ₀ = √(2π/T) · C/S`.
///
/// Exact for an at-the-forward call to first order; elsewhere a starting
/// point only. Not clamped.
///
/// # Examples
/// ```
/// use ivkernel::implied::brenner_subrahmanyam_seed;
/// let seed = brenner_subrahmanyam_seed(6.2, 100.0, 0.25);
/// assert!((seed - 0.31).abs() < 0.01);
/// ```
pub fn brenner_subrahmanyam_seed(price: f64, spot: f64, expiry: f64) -> f64 {
    (2.0 * PI / expiry).sqrt() * (price / spot)
}

/// Implied volatility solver for European calls.
///
/// Stateless apart from its [`SolverConfig`]; share one instance across
/// threads freely.
#[derive(Debug, Clone, Default)]
pub struct ImpliedVolSolver {
    config: SolverConfig,
}

impl ImpliedVolSolver {
    /// Create a solver with a custom configuration.
    ///
    /// # Errors
    /// Returns [`KernelError::InvalidConfig`] if `config` fails validation.
    pub fn new(config: SolverConfig) -> crate::error::Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve for the Black-Scholes volatility reproducing `observed_price`.
    ///
    /// # Arguments
    /// * `observed_price` — Market call price `C` (≥ minimum tradeable price)
    /// * `spot` — Underlying price `S` (must be > 0)
    /// * `strike` — Strike `K` (must be > 0)
    /// * `expiry` — Time to expiry in years (must be > 0)
    /// * `rate` — Continuously-compounded rate (must be finite)
    ///
    /// # Errors
    /// - [`KernelError::InvalidInput`] for out-of-domain inputs or a sub-floor price
    /// - [`KernelError::ArbitrageViolation`] if `C` lies outside `[max(0, S − K·e^(−rT)), S]`
    /// - [`KernelError::NonConvergence`] if the iteration budget runs out
    /// - [`KernelError::OutOfBand`] if the converged vol is outside `(0, 5]`
    ///
    /// # Examples
    /// ```
    /// use ivkernel::implied::ImpliedVolSolver;
    /// use ivkernel::pricing::call_price;
    ///
    /// let price = call_price(100.0, 110.0, 0.5, 0.02, 0.35);
    /// let vol = ImpliedVolSolver::default()
    ///     .solve(price, 100.0, 110.0, 0.5, 0.02)
    ///     .unwrap();
    /// assert!((vol.0 - 0.35).abs() < 1e-6);
    /// ```
    pub fn solve(
        &self,
        observed_price: f64,
        spot: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
    ) -> crate::error::Result<Vol> {
        validate_market(spot, strike, expiry, rate)?;
        let price = validate_call_price(
            observed_price,
            spot,
            strike,
            expiry,
            rate,
            self.config.min_price,
            self.config.arbitrage_epsilon,
        )?;

        let vol = self.newton_bisect(price, spot, strike, expiry, rate)?;

        if !(vol > 0.0 && vol <= MAX_VOL) {
            return Err(KernelError::OutOfBand {
                message: format!("implied vol {vol} outside (0, {MAX_VOL}]"),
                value: vol,
            });
        }
        Ok(Vol(vol))
    }

    fn newton_bisect(
        &self,
        price: f64,
        spot: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
    ) -> crate::error::Result<f64> {
        let cfg = &self.config;
        let mut sigma =
            brenner_subrahmanyam_seed(price, spot, expiry).clamp(cfg.seed_min, cfg.seed_max);

        #[cfg(feature = "logging")]
        tracing::debug!(price, spot, strike, expiry, rate, seed = sigma, "implied vol solve started");

        let mut lo = cfg.vol_floor;
        let mut hi = cfg.vol_ceiling;
        // Whether each end has been confirmed by a residual of the right sign.
        let mut lo_confirmed = false;
        let mut hi_confirmed = false;
        let mut residual = f64::NAN;

        for iteration in 1..=cfg.max_iterations {
            residual = call_price(spot, strike, expiry, rate, sigma) - price;
            if !residual.is_finite() {
                return Err(KernelError::NonConvergence {
                    iterations: iteration,
                    last_residual: residual,
                });
            }
            if residual.abs() < cfg.price_tolerance {
                #[cfg(feature = "logging")]
                tracing::debug!(iterations = iteration, vol = sigma, "implied vol converged");
                return Ok(sigma);
            }

            if residual > 0.0 {
                hi = sigma;
                hi_confirmed = true;
            } else {
                lo = sigma;
                lo_confirmed = true;
            }

            if hi - lo < cfg.vol_tolerance {
                if lo_confirmed && hi_confirmed {
                    #[cfg(feature = "logging")]
                    tracing::debug!(iterations = iteration, "implied vol bracket collapsed on root");
                    return Ok(0.5 * (lo + hi));
                }
                // Collapsed onto floor or ceiling: no root inside the range.
                return Err(KernelError::NonConvergence {
                    iterations: iteration,
                    last_residual: residual,
                });
            }

            let v = vega(spot, strike, expiry, rate, sigma);
            let newton = (v >= cfg.min_vega)
                .then(|| (sigma - residual / v).clamp(cfg.vol_floor, cfg.vol_ceiling));

            sigma = match newton {
                Some(next) if next > lo && next < hi => next,
                _ => {
                    #[cfg(feature = "logging")]
                    tracing::trace!(iteration, vega = v, lo, hi, "bisection step");
                    0.5 * (lo + hi)
                }
            };
        }

        #[cfg(feature = "logging")]
        tracing::debug!(max_iterations = cfg.max_iterations, residual, "implied vol did not converge");

        Err(KernelError::NonConvergence {
            iterations: cfg.max_iterations,
            last_residual: residual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn solve(c: f64, s: f64, k: f64, t: f64, r: f64) -> crate::error::Result<Vol> {
        ImpliedVolSolver::default().solve(c, s, k, t, r)
    }

    #[test]
    fn recovers_atm_quarter_year_vol() {
        let price = call_price(100.0, 100.0, 0.25, 0.02, 0.30);
        let vol = solve(price, 100.0, 100.0, 0.25, 0.02).unwrap();
        assert_abs_diff_eq!(vol.0, 0.30, epsilon = 1e-6);
    }

    #[test]
    fn recovers_across_moneyness() {
        for (k, sigma) in [(70.0, 0.4), (90.0, 0.2), (110.0, 0.25), (130.0, 0.6)] {
            let price = call_price(100.0, k, 0.5, 0.03, sigma);
            let vol = solve(price, 100.0, k, 0.5, 0.03).unwrap();
            assert_abs_diff_eq!(vol.0, sigma, epsilon = 1e-5);
        }
    }

    #[test]
    fn recovers_high_vol() {
        let price = call_price(100.0, 100.0, 1.0, 0.0, 3.5);
        let vol = solve(price, 100.0, 100.0, 1.0, 0.0).unwrap();
        assert_abs_diff_eq!(vol.0, 3.5, epsilon = 1e-4);
    }

    #[test]
    fn negative_rate_is_accepted() {
        let price = call_price(100.0, 100.0, 1.0, -0.01, 0.2);
        let vol = solve(price, 100.0, 100.0, 1.0, -0.01).unwrap();
        assert_abs_diff_eq!(vol.0, 0.2, epsilon = 1e-6);
    }

    #[test]
    fn sub_floor_price_is_invalid_input() {
        let err = solve(0.005, 100.0, 150.0, 0.02, 0.02).unwrap_err();
        assert!(matches!(err, KernelError::InvalidInput { .. }));
    }

    #[test]
    fn below_intrinsic_is_arbitrage() {
        let err = solve(5.0, 50.0, 40.0, 0.5, 0.02).unwrap_err();
        assert!(matches!(err, KernelError::ArbitrageViolation { .. }));
    }

    #[test]
    fn non_positive_market_inputs_rejected() {
        assert!(solve(5.0, 0.0, 100.0, 0.5, 0.02).is_err());
        assert!(solve(5.0, 100.0, -1.0, 0.5, 0.02).is_err());
        assert!(solve(5.0, 100.0, 100.0, 0.0, 0.02).is_err());
        assert!(solve(5.0, 100.0, 100.0, 0.5, f64::NAN).is_err());
    }

    #[test]
    fn price_above_ceiling_vol_does_not_converge() {
        // Max attainable price at σ = 5 is ~0.0188.
        let err = solve(1.0, 100.0, 500.0, 0.01, 0.02).unwrap_err();
        assert!(matches!(err, KernelError::NonConvergence { .. }));
    }

    #[test]
    fn deep_otm_near_zero_vega_terminates() {
        match solve(0.01, 100.0, 500.0, 0.01, 0.02) {
            Ok(vol) => {
                assert!(vol.0 > 0.0 && vol.0 <= MAX_VOL);
                let repriced = call_price(100.0, 500.0, 0.01, 0.02, vol.0);
                assert!((repriced - 0.01).abs() < 1e-6);
            }
            Err(e) => assert!(matches!(e, KernelError::NonConvergence { .. })),
        }
    }

    #[test]
    fn tight_budget_reports_non_convergence() {
        let solver = ImpliedVolSolver::new(SolverConfig {
            max_iterations: 1,
            seed_min: 3.0,
            ..SolverConfig::default()
        })
        .unwrap();
        let price = call_price(100.0, 100.0, 0.25, 0.02, 0.30);
        let err = solver.solve(price, 100.0, 100.0, 0.25, 0.02).unwrap_err();
        match err {
            KernelError::NonConvergence { iterations, .. } => assert_eq!(iterations, 1),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_config_rejected() {
        let err = ImpliedVolSolver::new(SolverConfig {
            vol_floor: 0.0,
            ..SolverConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, KernelError::InvalidConfig { .. }));
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let a = solve(7.5, 100.0, 105.0, 0.4, 0.02).unwrap();
        let b = solve(7.5, 100.0, 105.0, 0.4, 0.02).unwrap();
        assert_eq!(a.0.to_bits(), b.0.to_bits());
    }

    #[test]
    fn seed_matches_formula() {
        let seed = brenner_subrahmanyam_seed(6.0, 100.0, 0.25);
        assert_abs_diff_eq!(seed, (8.0 * PI).sqrt() * 0.06, epsilon = 1e-15);
    }
}
