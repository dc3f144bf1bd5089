//! Portfolio volatility estimation.
//!
//! Daily returns of each symbol are combined by current portfolio weight into
//! one synthetic daily return series, whose population standard deviation is
//! then annualized.

use super::PriceMap;
use crate::types::Position;
use std::collections::HashMap;

/// Simple daily returns of a price series.
///
/// A series of `n` prices yields `n - 1` returns. A zero previous price
/// contributes a zero return.
pub fn daily_returns(prices: &[f64]) -> Vec<f64> {
    prices
        .windows(2)
        .map(|w| {
            if w[0] != 0.0 {
                (w[1] - w[0]) / w[0]
            } else {
                0.0
            }
        })
        .collect()
}

/// Weighted sum of per-symbol daily returns, aligned by day index.
///
/// The series runs over the longest per-symbol return series. A symbol whose
/// series is shorter contributes nothing on the missing days. Days are matched
/// by position in the series, not by calendar date.
pub fn weighted_daily_returns(positions: &[Position], prices: &PriceMap) -> Vec<f64> {
    let mut symbol_returns: HashMap<&str, Vec<f64>> = HashMap::new();
    for position in positions {
        let symbol = position.symbol();
        if symbol_returns.contains_key(symbol) {
            continue;
        }
        if let Some(series) = prices.get(symbol) {
            symbol_returns.insert(symbol, daily_returns(&series.prices()));
        }
    }

    let max_len = symbol_returns.values().map(Vec::len).max().unwrap_or(0);

    (0..max_len)
        .map(|i| {
            positions
                .iter()
                .filter_map(|p| {
                    symbol_returns
                        .get(p.symbol())
                        .and_then(|returns| returns.get(i))
                        .map(|r| (p.weight / 100.0) * r)
                })
                .sum()
        })
        .collect()
}

/// Population standard deviation (divides by `n`). Empty input yields 0.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    variance.sqrt()
}

/// Annualize a daily standard deviation into a percentage.
pub fn annualize_volatility(daily_volatility: f64, trading_days_per_year: f64) -> f64 {
    daily_volatility * trading_days_per_year.max(0.0).sqrt() * 100.0
}

/// Annualized portfolio volatility in percent.
///
/// `positions` must already carry normalized weights.
pub fn portfolio_volatility(
    positions: &[Position],
    prices: &PriceMap,
    trading_days_per_year: f64,
) -> f64 {
    if positions.is_empty() {
        return 0.0;
    }

    let returns = weighted_daily_returns(positions, prices);
    let volatility = annualize_volatility(population_std_dev(&returns), trading_days_per_year);

    if volatility.is_finite() {
        volatility
    } else {
        0.0
    }
}
