//! Extract implied volatility and ITM probability from call prices.
//!
//! Shows how to:
//!   - Price a call with Black-Scholes
//!   - Recover the implied vol and the risk-neutral ITM probability
//!   - Turn upstream rows into quotes with an explicit fallback rate
//!   - See why a quote was rejected
//!
//! Run with: `cargo run --example implied_vol`

use ivkernel::conventions::FALLBACK_RISK_FREE_RATE;
use ivkernel::pricing::call_price;
use ivkernel::quote::QuoteRow;
use ivkernel::{BatchSummary, ImpliedVolSolver, OptionQuote, evaluate, evaluate_batch};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let spot = 100.0;
    let expiry = 0.25;
    let rate = 0.02;
    let vol = 0.30;

    // ---------------------------------------------------------------
    // 1. Round trip at the money
    // ---------------------------------------------------------------

    let price = call_price(spot, 100.0, expiry, rate, vol);
    let solver = ImpliedVolSolver::default();
    let iv = solver.solve(price, spot, 100.0, expiry, rate)?;

    println!("ATM call, T = {expiry}y, r = {rate}");
    println!("  Price:       {price:.6}");
    println!("  Implied vol: {:.10} (input {vol})", iv.0);

    // ---------------------------------------------------------------
    // 2. Scan across strikes
    // ---------------------------------------------------------------

    println!("\n{:>8} {:>12} {:>12} {:>10}", "Strike", "Call Price", "IV", "P(ITM)");
    println!("{}", "-".repeat(46));

    for k in [80.0, 90.0, 95.0, 100.0, 105.0, 110.0, 120.0] {
        let price = call_price(spot, k, expiry, rate, vol);
        let quote = OptionQuote::new(spot, k, expiry, rate, price);
        let result = evaluate(&quote);
        match (result.implied_volatility(), result.probability_itm()) {
            (Some(iv), Some(p)) => println!("{k:>8.0} {price:>12.6} {:>12.8} {:>10.4}", iv.0, p.0),
            _ => println!("{k:>8.0} {price:>12.6} {:>12} {:>10}", "-", "-"),
        }
    }

    // ---------------------------------------------------------------
    // 3. Upstream rows
    // ---------------------------------------------------------------

    let rows = [
        QuoteRow {
            underlying_spot: Some(250.0),
            strike: Some(260.0),
            days_to_expiry: Some(30.0),
            mid_price: Some(6.85),
            close_price: Some(6.70),
            risk_free_rate: Some(0.045),
        },
        QuoteRow {
            underlying_spot: Some(250.0),
            strike: Some(300.0),
            days_to_expiry: Some(30.0),
            mid_price: None,
            close_price: Some(0.42),
            risk_free_rate: None,
        },
        QuoteRow {
            underlying_spot: Some(50.0),
            strike: Some(40.0),
            days_to_expiry: Some(182.0),
            mid_price: Some(5.0),
            close_price: None,
            risk_free_rate: None,
        },
    ];
    let quotes: Vec<_> = rows
        .iter()
        .filter_map(|row| row.to_option_quote(FALLBACK_RISK_FREE_RATE))
        .collect();
    let results = evaluate_batch(&quotes);
    let summary = BatchSummary::from_results(&results);
    println!(
        "\nRows: {} quotes, {} with IV, {} with P(ITM)",
        summary.total, summary.with_implied_volatility, summary.with_probability_itm
    );

    // ---------------------------------------------------------------
    // 4. Rejection reasons
    // ---------------------------------------------------------------

    for (label, c, s, k, t) in [
        ("sub-penny", 0.005, 100.0, 150.0, 0.02),
        ("below intrinsic", 5.0, 50.0, 40.0, 0.5),
        ("beyond 500% vol", 1.0, 100.0, 500.0, 0.01),
    ] {
        match solver.solve(c, s, k, t, rate) {
            Ok(iv) => println!("{label:>16}: {:.6}", iv.0),
            Err(e) => println!("{label:>16}: {e}"),
        }
    }

    Ok(())
}
