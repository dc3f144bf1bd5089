//! Historical portfolio value reconstruction for charting.

use super::PriceMap;
use crate::types::{HistoricalValuePoint, Holding};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Total portfolio value on every date that appears in any price history.
///
/// A holding counts on a date only when its symbol has a price for exactly
/// that date and the date is on or after its purchase date. There is no
/// carry-forward from earlier prices. Dates whose total is not positive are
/// omitted.
pub fn historical_value(holdings: &[Holding], prices: &PriceMap) -> Vec<HistoricalValuePoint> {
    if holdings.is_empty() {
        return Vec::new();
    }

    let dates: BTreeSet<NaiveDate> = holdings
        .iter()
        .filter_map(|h| prices.get(&h.symbol))
        .flat_map(|series| series.history.iter().map(|p| p.date))
        .collect();

    dates
        .into_iter()
        .filter_map(|date| {
            let value: f64 = holdings
                .iter()
                .filter(|h| date >= h.purchase_date)
                .filter_map(|h| {
                    prices
                        .get(&h.symbol)
                        .and_then(|series| series.price_on(date))
                        .map(|price| h.shares * price)
                })
                .sum();

            (value > 0.0).then_some(HistoricalValuePoint { date, value })
        })
        .collect()
}
