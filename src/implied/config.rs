//! Solver configuration.

use serde::{Deserialize, Serialize};

use crate::error::KernelError;
use crate::implied::{MAX_VOL, MIN_TRADEABLE_PRICE};

/// Tolerances and limits for [`ImpliedVolSolver`](super::ImpliedVolSolver).
///
/// [`Default`] gives the kernel's standard policy. Deserialization runs
/// [`validate`](Self::validate), so a config read from disk is always usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SolverConfigRaw", into = "SolverConfigRaw")]
pub struct SolverConfig {
    /// Maximum Newton/bisection iterations per solve.
    pub max_iterations: usize,
    /// Absolute price residual at which the solve converges.
    pub price_tolerance: f64,
    /// Bracket width at which bisection stops.
    pub vol_tolerance: f64,
    /// Vega below which a Newton step is replaced by bisection.
    pub min_vega: f64,
    /// Lowest vol the iteration may visit.
    pub vol_floor: f64,
    /// Highest vol the iteration may visit. At most 5.0.
    pub vol_ceiling: f64,
    /// Lower clamp for the initial guess.
    pub seed_min: f64,
    /// Upper clamp for the initial guess.
    pub seed_max: f64,
    /// Minimum tradeable option price.
    pub min_price: f64,
    /// Relative slack on the no-arbitrage band, scaled by `1 + S`.
    pub arbitrage_epsilon: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            price_tolerance: 1e-6,
            vol_tolerance: 1e-10,
            min_vega: 1e-8,
            vol_floor: 1e-6,
            vol_ceiling: MAX_VOL,
            seed_min: 0.01,
            seed_max: 3.0,
            min_price: MIN_TRADEABLE_PRICE,
            arbitrage_epsilon: 1e-9,
        }
    }
}

impl SolverConfig {
    /// Check that the limits are internally consistent.
    ///
    /// # Errors
    /// Returns [`KernelError::InvalidConfig`] describing the first violated rule.
    pub fn validate(&self) -> crate::error::Result<()> {
        fn invalid(message: String) -> crate::error::Result<()> {
            Err(KernelError::InvalidConfig { message })
        }

        if self.max_iterations == 0 {
            return invalid("max_iterations must be > 0".into());
        }
        for (name, value) in [
            ("price_tolerance", self.price_tolerance),
            ("vol_tolerance", self.vol_tolerance),
            ("min_vega", self.min_vega),
            ("vol_floor", self.vol_floor),
            ("min_price", self.min_price),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return invalid(format!("{name} must be positive and finite, got {value}"));
            }
        }
        if !self.arbitrage_epsilon.is_finite() || self.arbitrage_epsilon < 0.0 {
            return invalid(format!(
                "arbitrage_epsilon must be non-negative and finite, got {}",
                self.arbitrage_epsilon
            ));
        }
        if !(self.vol_ceiling > self.vol_floor && self.vol_ceiling <= MAX_VOL) {
            return invalid(format!(
                "vol_ceiling must be in ({}, {MAX_VOL}], got {}",
                self.vol_floor, self.vol_ceiling
            ));
        }
        if !(self.vol_floor <= self.seed_min
            && self.seed_min <= self.seed_max
            && self.seed_max <= self.vol_ceiling)
        {
            return invalid(format!(
                "seed range [{}, {}] must lie within [{}, {}]",
                self.seed_min, self.seed_max, self.vol_floor, self.vol_ceiling
            ));
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct SolverConfigRaw {
    max_iterations: usize,
    price_tolerance: f64,
    vol_tolerance: f64,
    min_vega: f64,
    vol_floor: f64,
    vol_ceiling: f64,
    seed_min: f64,
    seed_max: f64,
    min_price: f64,
    arbitrage_epsilon: f64,
}

impl TryFrom<SolverConfigRaw> for SolverConfig {
    type Error = KernelError;
    fn try_from(raw: SolverConfigRaw) -> Result<Self, Self::Error> {
        let config = Self {
            max_iterations: raw.max_iterations,
            price_tolerance: raw.price_tolerance,
            vol_tolerance: raw.vol_tolerance,
            min_vega: raw.min_vega,
            vol_floor: raw.vol_floor,
            vol_ceiling: raw.vol_ceiling,
            seed_min: raw.seed_min,
            seed_max: raw.seed_max,
            min_price: raw.min_price,
            arbitrage_epsilon: raw.arbitrage_epsilon,
        };
        config.validate()?;
        Ok(config)
    }
}

impl From<SolverConfig> for SolverConfigRaw {
    fn from(c: SolverConfig) -> Self {
        Self {
            max_iterations: c.max_iterations,
            price_tolerance: c.price_tolerance,
            vol_tolerance: c.vol_tolerance,
            min_vega: c.min_vega,
            vol_floor: c.vol_floor,
            vol_ceiling: c.vol_ceiling,
            seed_min: c.seed_min,
            seed_max: c.seed_max,
            min_price: c.min_price,
            arbitrage_epsilon: c.arbitrage_epsilon,
        }
    }
}
