//! Core domain types for the implied volatility kernel.
//!
//! # Newtype Strategy
//!
//! **Outputs use newtypes**: [`Vol`] and [`Probability`] wrap return values
//! so callers can't accidentally record a probability in a volatility
//! column. **Inputs use bare `f64`** or the [`OptionQuote`] record.
//!
//! # Why no `Eq` or `Ord`?
//! These types wrap `f64`, which does not implement `Eq` or `Ord` because `NaN`
//! breaks total ordering. We derive `PartialEq` and `PartialOrd` only.

use serde::{Deserialize, Serialize};

use crate::error::KernelError;

/// Implied volatility `σ`, measured as annualized standard deviation.
///
/// A vol of 0.20 represents 20% annualized volatility.
///
/// # Examples
/// ```
/// use ivkernel::types::Vol;
/// let vol = Vol(0.20);
/// assert_eq!(vol.0, 0.20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Vol(pub f64);

/// Risk-neutral probability in `[0, 1]`.
///
/// # Examples
/// ```
/// use ivkernel::types::Probability;
/// let p = Probability(0.48);
/// assert!(p.0 < 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Probability(pub f64);

/// One option-quote record as handed to the kernel.
///
/// A plain value: created per upstream row, consumed once, discarded.
/// Field values are not checked at construction; the kernel's validation
/// gate decides whether a quote is usable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    /// Underlying price `S`.
    pub spot: f64,
    /// Strike price `K`.
    pub strike: f64,
    /// Time to expiry `T` in years.
    pub time_to_expiry_years: f64,
    /// Continuously-compounded annual rate `r`.
    pub risk_free_rate: f64,
    /// Observed call price `C`.
    pub observed_price: f64,
}

impl OptionQuote {
    /// Create a quote from its five scalar fields.
    pub fn new(
        spot: f64,
        strike: f64,
        time_to_expiry_years: f64,
        risk_free_rate: f64,
        observed_price: f64,
    ) -> Self {
        Self {
            spot,
            strike,
            time_to_expiry_years,
            risk_free_rate,
            observed_price,
        }
    }
}

/// Kernel output for one quote.
///
/// Either both fields are absent, only the volatility is present, or both
/// are present. A probability never appears without the volatility it was
/// computed from; fields are private so that cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "SolverResultRaw", into = "SolverResultRaw")]
pub struct SolverResult {
    implied_volatility: Option<Vol>,
    probability_itm: Option<Probability>,
}

#[derive(Serialize, Deserialize)]
struct SolverResultRaw {
    implied_volatility: Option<f64>,
    probability_itm: Option<f64>,
}

impl TryFrom<SolverResultRaw> for SolverResult {
    type Error = KernelError;
    fn try_from(raw: SolverResultRaw) -> Result<Self, Self::Error> {
        match (raw.implied_volatility, raw.probability_itm) {
            (None, None) => Ok(Self::undefined()),
            (None, Some(p)) => Err(KernelError::InvalidInput {
                message: format!("probability_itm {p} present without implied_volatility"),
            }),
            (Some(v), p) => {
                if !(v > 0.0 && v <= crate::implied::MAX_VOL) {
                    return Err(KernelError::OutOfBand {
                        message: format!("implied_volatility {v} outside (0, 5]"),
                        value: v,
                    });
                }
                if let Some(p) = p
                    && !(0.0..=1.0).contains(&p)
                {
                    return Err(KernelError::OutOfBand {
                        message: format!("probability_itm {p} outside [0, 1]"),
                        value: p,
                    });
                }
                Ok(Self {
                    implied_volatility: Some(Vol(v)),
                    probability_itm: p.map(Probability),
                })
            }
        }
    }
}

impl From<SolverResult> for SolverResultRaw {
    fn from(r: SolverResult) -> Self {
        Self {
            implied_volatility: r.implied_volatility.map(|v| v.0),
            probability_itm: r.probability_itm.map(|p| p.0),
        }
    }
}

impl SolverResult {
    /// Result with neither output.
    pub fn undefined() -> Self {
        Self {
            implied_volatility: None,
            probability_itm: None,
        }
    }

    /// Result for a quote whose volatility converged.
    ///
    /// `probability_itm` may still be `None` if the probability computation
    /// itself failed.
    pub fn resolved(vol: Vol, probability_itm: Option<Probability>) -> Self {
        Self {
            implied_volatility: Some(vol),
            probability_itm,
        }
    }

    /// Implied volatility, if the solver converged in band.
    pub fn implied_volatility(&self) -> Option<Vol> {
        self.implied_volatility
    }

    /// Risk-neutral probability of finishing in the money.
    pub fn probability_itm(&self) -> Option<Probability> {
        self.probability_itm
    }

    /// True when neither output is present.
    pub fn is_undefined(&self) -> bool {
        self.implied_volatility.is_none()
    }
}
