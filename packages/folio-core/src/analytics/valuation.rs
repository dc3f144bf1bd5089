//! Position valuation and portfolio aggregation.

use super::PriceMap;
use crate::types::{Holding, Position, PriceSeries};
use serde::{Deserialize, Serialize};

/// Positions with normalized weights plus portfolio totals.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PortfolioValuation {
    /// One position per holding with resolved price data, in holding order
    pub positions: Vec<Position>,
    /// Sum of current position values
    pub total_value: f64,
    /// Sum of position cost bases
    pub total_cost: f64,
    /// total value - total cost
    pub total_return: f64,
    /// Total return as a percentage of total cost
    pub total_return_percentage: f64,
}

/// Value one holding against its price series.
///
/// `gain_percentage` falls back to 0 when the cost basis is 0 (zero shares or
/// zero purchase price), and `weight` falls back to 0 when `total_value` is 0.
pub fn value_position(holding: &Holding, series: &PriceSeries, total_value: f64) -> Position {
    let current_value = holding.shares * series.current_price;
    let cost_basis = holding.cost_basis();
    let gain = current_value - cost_basis;
    let gain_percentage = if cost_basis > 0.0 {
        (gain / cost_basis) * 100.0
    } else {
        0.0
    };

    Position {
        holding: holding.clone(),
        name: series.name.clone(),
        current_price: series.current_price,
        current_value,
        cost_basis,
        gain,
        gain_percentage,
        weight: 0.0,
    }
    .with_weight(total_value)
}

/// Value every holding that has price data and normalize weights.
///
/// Holdings whose symbol is missing from `prices` are skipped. Weights are
/// filled in only once the portfolio total is known.
pub fn aggregate_portfolio(holdings: &[Holding], prices: &PriceMap) -> PortfolioValuation {
    let mut total_value = 0.0;
    let mut total_cost = 0.0;
    let mut positions = Vec::with_capacity(holdings.len());

    for holding in holdings {
        let Some(series) = prices.get(&holding.symbol) else {
            continue;
        };

        let position = value_position(holding, series, 0.0);
        total_value += position.current_value;
        total_cost += position.cost_basis;
        positions.push(position);
    }

    let positions: Vec<Position> = positions
        .into_iter()
        .map(|p| p.with_weight(total_value))
        .collect();

    let total_return = total_value - total_cost;
    let total_return_percentage = if total_cost > 0.0 {
        (total_return / total_cost) * 100.0
    } else {
        0.0
    };

    PortfolioValuation {
        positions,
        total_value,
        total_cost,
        total_return,
        total_return_percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PricePoint;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series(symbol: &str, current_price: f64) -> PriceSeries {
        PriceSeries::new(
            symbol,
            symbol,
            current_price,
            vec![PricePoint::new(date(2024, 1, 2), current_price)],
        )
    }

    fn price_map(entries: &[(&str, f64)]) -> PriceMap {
        entries
            .iter()
            .map(|(symbol, price)| (symbol.to_string(), series(symbol, *price)))
            .collect()
    }

    #[test]
    fn test_value_position() {
        let holding = Holding::new("AAPL", 10.0, 150.0, date(2024, 1, 5));
        let position = value_position(&holding, &series("AAPL", 175.0), 3500.0);

        assert_eq!(position.current_value, 1750.0);
        assert_eq!(position.cost_basis, 1500.0);
        assert_eq!(position.gain, 250.0);
        // 250 / 1500 = 16.67%
        assert!((position.gain_percentage - 16.666666666666668).abs() < 0.001);
        assert_eq!(position.weight, 50.0);
    }

    #[test]
    fn test_value_position_zero_cost() {
        let holding = Holding::new("AAPL", 10.0, 0.0, date(2024, 1, 5));
        let position = value_position(&holding, &series("AAPL", 175.0), 0.0);

        assert_eq!(position.gain, 1750.0);
        assert_eq!(position.gain_percentage, 0.0);
        assert_eq!(position.weight, 0.0);
    }

    #[test]
    fn test_aggregate_portfolio() {
        let holdings = vec![
            Holding::new("AAPL", 10.0, 150.0, date(2024, 1, 5)),
            Holding::new("GOOGL", 5.0, 100.0, date(2024, 2, 1)),
        ];
        let prices = price_map(&[("AAPL", 175.0), ("GOOGL", 90.0)]);

        let valuation = aggregate_portfolio(&holdings, &prices);

        assert_eq!(valuation.positions.len(), 2);
        assert_eq!(valuation.total_value, 2200.0); // 1750 + 450
        assert_eq!(valuation.total_cost, 2000.0); // 1500 + 500
        assert_eq!(valuation.total_return, 200.0);
        assert!((valuation.total_return_percentage - 10.0).abs() < 1e-9);
        assert_relative_eq!(valuation.positions[0].weight, 1750.0 / 22.0, epsilon = 1e-9);
        assert_relative_eq!(valuation.positions[1].weight, 450.0 / 22.0, epsilon = 1e-9);
    }

    #[test]
    fn test_weights_sum_to_100() {
        let holdings = vec![
            Holding::new("AAPL", 3.0, 150.0, date(2024, 1, 5)),
            Holding::new("MSFT", 7.5, 300.0, date(2024, 1, 5)),
            Holding::new("TSLA", 1.25, 200.0, date(2024, 1, 5)),
            Holding::new("AAPL", 2.0, 120.0, date(2024, 3, 5)),
        ];
        let prices = price_map(&[("AAPL", 191.3), ("MSFT", 377.7), ("TSLA", 251.9)]);

        let valuation = aggregate_portfolio(&holdings, &prices);
        let weight_sum: f64 = valuation.positions.iter().map(|p| p.weight).sum();

        assert_eq!(valuation.positions.len(), 4);
        assert_relative_eq!(weight_sum, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_unresolved_holdings_are_skipped() {
        let holdings = vec![
            Holding::new("AAPL", 10.0, 100.0, date(2024, 1, 5)),
            Holding::new("ZZZZ", 10.0, 100.0, date(2024, 1, 5)),
        ];
        let prices = price_map(&[("AAPL", 120.0)]);

        let valuation = aggregate_portfolio(&holdings, &prices);

        assert_eq!(valuation.positions.len(), 1);
        assert_eq!(valuation.total_value, 1200.0);
        assert_eq!(valuation.total_cost, 1000.0);
        assert_eq!(valuation.positions[0].weight, 100.0);
    }

    #[test]
    fn test_empty_portfolio() {
        let valuation = aggregate_portfolio(&[], &PriceMap::new());

        assert!(valuation.positions.is_empty());
        assert_eq!(valuation.total_value, 0.0);
        assert_eq!(valuation.total_cost, 0.0);
        assert_eq!(valuation.total_return, 0.0);
        assert_eq!(valuation.total_return_percentage, 0.0);
    }

    #[test]
    fn test_zero_share_portfolio_has_finite_weights() {
        let holdings = vec![Holding::new("AAPL", 0.0, 100.0, date(2024, 1, 5))];
        let prices = price_map(&[("AAPL", 120.0)]);

        let valuation = aggregate_portfolio(&holdings, &prices);

        assert_eq!(valuation.total_value, 0.0);
        assert_eq!(valuation.positions[0].weight, 0.0);
        assert_eq!(valuation.positions[0].gain_percentage, 0.0);
    }
}
