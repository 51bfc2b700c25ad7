//! Upstream quote rows and their conversion into [`OptionQuote`]s.
//!
//! Tabular option data arrives with gaps: no mid price on illiquid days,
//! no recorded rate before a rate series starts. [`QuoteRow`] holds a row
//! as it arrives and applies the upstream conventions explicitly:
//!
//! - price: mid if present and positive, else close if present and positive
//! - expiry: calendar days / 365
//! - rate: the recorded rate, else a fallback the caller passes in
//!
//! Rows whose representative price is below the tradeable floor are skipped
//! before reaching the kernel.

use serde::{Deserialize, Serialize};

use crate::conventions::years_from_days;
use crate::implied::MIN_TRADEABLE_PRICE;
use crate::types::OptionQuote;

/// One upstream option row, every field optional.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct QuoteRow {
    pub underlying_spot: Option<f64>,
    pub strike: Option<f64>,
    /// Calendar days from quote date to expiration.
    pub days_to_expiry: Option<f64>,
    pub mid_price: Option<f64>,
    pub close_price: Option<f64>,
    pub risk_free_rate: Option<f64>,
}

fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

impl QuoteRow {
    /// Price the kernel should invert: mid, falling back to close.
    ///
    /// Zero or negative prices count as absent.
    pub fn representative_price(&self) -> Option<f64> {
        present(self.mid_price)
            .filter(|&p| p > 0.0)
            .or_else(|| present(self.close_price).filter(|&p| p > 0.0))
    }

    /// Build the kernel input, substituting `fallback_rate` when the row has
    /// no rate.
    ///
    /// Returns `None` if spot, strike, expiry or a usable price is missing,
    /// or if the price is below the minimum tradeable price. Domain checks
    /// beyond that are left to the kernel.
    ///
    /// # Examples
    /// ```
    /// use ivkernel::conventions::FALLBACK_RISK_FREE_RATE;
    /// use ivkernel::quote::QuoteRow;
    ///
    /// let row = QuoteRow {
    ///     underlying_spot: Some(100.0),
    ///     strike: Some(105.0),
    ///     days_to_expiry: Some(30.0),
    ///     mid_price: None,
    ///     close_price: Some(1.25),
    ///     risk_free_rate: None,
    /// };
    /// let quote = row.to_option_quote(FALLBACK_RISK_FREE_RATE).unwrap();
    /// assert_eq!(quote.observed_price, 1.25);
    /// assert_eq!(quote.risk_free_rate, 0.02);
    /// ```
    pub fn to_option_quote(&self, fallback_rate: f64) -> Option<OptionQuote> {
        let price = self.representative_price()?;
        if price < MIN_TRADEABLE_PRICE {
            return None;
        }
        let spot = present(self.underlying_spot)?;
        let strike = present(self.strike)?;
        let days = present(self.days_to_expiry)?;
        let rate = present(self.risk_free_rate).unwrap_or(fallback_rate);

        Some(OptionQuote::new(
            spot,
            strike,
            years_from_days(days),
            rate,
            price,
        ))
    }
}
