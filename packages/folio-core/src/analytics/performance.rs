//! Return annualization, risk-adjusted return and per-position breakdowns.

use crate::types::{AllocationSlice, Holding, PerformanceEntry, Position};
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Earliest purchase date among `holdings`, never later than `as_of`.
///
/// Future-dated purchases are ignored; with no holdings this is `as_of`.
pub fn oldest_purchase_date(holdings: &[Holding], as_of: NaiveDate) -> NaiveDate {
    holdings
        .iter()
        .map(|h| h.purchase_date)
        .fold(as_of, |oldest, date| oldest.min(date))
}

/// Holding period in years between two dates, floored at one day.
pub fn years_held(since: NaiveDate, as_of: NaiveDate, days_per_year: f64) -> f64 {
    if days_per_year <= 0.0 {
        return 0.0;
    }

    let days = (as_of - since).num_days().max(1) as f64;
    days / days_per_year
}

/// Compound annual growth rate in percent.
///
/// Treats the whole cost as one lump invested at the start of the period, so
/// staggered purchases make this understate true annualized performance.
/// Returns 0 when the cost or the period is not positive, or when the growth
/// factor is not representable.
pub fn annualized_return(total_cost: f64, total_value: f64, years: f64) -> f64 {
    if total_cost <= 0.0 || years <= 0.0 {
        return 0.0;
    }

    let annualized = ((total_value / total_cost).powf(1.0 / years) - 1.0) * 100.0;
    if annualized.is_finite() {
        annualized
    } else {
        0.0
    }
}

/// Sharpe-like ratio: `(annualized_return - risk_free_rate) / volatility`.
///
/// All inputs are percentages. Returns 0 when volatility is not positive.
pub fn sharpe_ratio(annualized_return: f64, volatility: f64, risk_free_rate: f64) -> f64 {
    if volatility <= 0.0 {
        return 0.0;
    }

    (annualized_return - risk_free_rate) / volatility
}

/// Allocation slices in position order.
pub fn allocation(positions: &[Position]) -> Vec<AllocationSlice> {
    positions
        .iter()
        .map(|p| AllocationSlice {
            symbol: p.symbol().to_string(),
            value: p.current_value,
            weight: p.weight,
        })
        .collect()
}

/// Positions ranked by gain percentage, best first.
pub fn performance_ranking(positions: &[Position]) -> Vec<PerformanceEntry> {
    let mut entries: Vec<PerformanceEntry> = positions
        .iter()
        .map(|p| PerformanceEntry {
            symbol: p.symbol().to_string(),
            gain_percentage: p.gain_percentage,
            gain: p.gain,
        })
        .collect();

    entries.sort_by(|a, b| {
        b.gain_percentage
            .partial_cmp(&a.gain_percentage)
            .unwrap_or(Ordering::Equal)
    });
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::value_position;
    use crate::config::{DAYS_PER_YEAR, DEFAULT_RISK_FREE_RATE};
    use crate::types::{PricePoint, PriceSeries};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn position(symbol: &str, shares: f64, cost: f64, price: f64) -> Position {
        let holding = Holding::new(symbol, shares, cost, date(2024, 1, 5));
        let series = PriceSeries::new(
            symbol,
            symbol,
            price,
            vec![PricePoint::new(date(2024, 1, 5), price)],
        );
        value_position(&holding, &series, 0.0)
    }

    #[test]
    fn test_annualized_return_two_years() {
        // (1.21)^(1/2) - 1 = 10%
        let annualized = annualized_return(1000.0, 1210.0, 2.0);
        assert!((annualized - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_annualized_return_half_year() {
        // 10% over half a year compounds to 21%
        let annualized = annualized_return(1000.0, 1100.0, 0.5);
        assert!((annualized - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_annualized_return_zero_cost() {
        assert_eq!(annualized_return(0.0, 1000.0, 1.0), 0.0);
        assert_eq!(annualized_return(1000.0, 1000.0, 0.0), 0.0);
    }

    #[test]
    fn test_annualized_return_total_loss() {
        assert_eq!(annualized_return(1000.0, 0.0, 1.0), -100.0);
    }

    #[test]
    fn test_annualized_return_overflow_is_zero() {
        // 10x in a single day would compound to 10^365
        let annualized = annualized_return(1.0, 10.0, 1.0 / DAYS_PER_YEAR);
        assert_eq!(annualized, 0.0);
    }

    #[test]
    fn test_years_held() {
        let years = years_held(date(2022, 1, 1), date(2024, 1, 1), DAYS_PER_YEAR);
        assert!((years - 730.0 / 365.0).abs() < 1e-12);
    }

    #[test]
    fn test_years_held_same_day_floor() {
        let years = years_held(date(2024, 1, 1), date(2024, 1, 1), DAYS_PER_YEAR);
        assert!((years - 1.0 / 365.0).abs() < 1e-12);
    }

    #[test]
    fn test_oldest_purchase_date() {
        let holdings = vec![
            Holding::new("AAPL", 1.0, 1.0, date(2024, 3, 1)),
            Holding::new("MSFT", 1.0, 1.0, date(2023, 6, 15)),
            Holding::new("TSLA", 1.0, 1.0, date(2030, 1, 1)),
        ];

        assert_eq!(
            oldest_purchase_date(&holdings, date(2024, 6, 1)),
            date(2023, 6, 15)
        );
    }

    #[test]
    fn test_oldest_purchase_date_ignores_future() {
        let holdings = vec![Holding::new("TSLA", 1.0, 1.0, date(2030, 1, 1))];
        assert_eq!(
            oldest_purchase_date(&holdings, date(2024, 6, 1)),
            date(2024, 6, 1)
        );
        assert_eq!(oldest_purchase_date(&[], date(2024, 6, 1)), date(2024, 6, 1));
    }

    #[test]
    fn test_sharpe_ratio() {
        let sharpe = sharpe_ratio(14.5, 20.0, DEFAULT_RISK_FREE_RATE);
        assert!((sharpe - 0.5).abs() < 1e-12);

        let negative = sharpe_ratio(0.5, 20.0, DEFAULT_RISK_FREE_RATE);
        assert!(negative < 0.0);
    }

    #[test]
    fn test_sharpe_ratio_zero_volatility() {
        let sharpe = sharpe_ratio(10.0, 0.0, DEFAULT_RISK_FREE_RATE);
        assert_eq!(sharpe, 0.0);
    }

    #[test]
    fn test_allocation() {
        let positions = vec![
            position("AAPL", 10.0, 100.0, 150.0).with_weight(2000.0),
            position("MSFT", 5.0, 100.0, 100.0).with_weight(2000.0),
        ];

        let slices = allocation(&positions);

        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].symbol, "AAPL");
        assert_eq!(slices[0].value, 1500.0);
        assert_eq!(slices[0].weight, 75.0);
        assert_eq!(slices[1].weight, 25.0);
    }

    #[test]
    fn test_performance_ranking() {
        let positions = vec![
            position("AAPL", 10.0, 100.0, 90.0),
            position("MSFT", 10.0, 100.0, 130.0),
            position("TSLA", 10.0, 100.0, 110.0),
        ];

        let ranking = performance_ranking(&positions);
        let symbols: Vec<&str> = ranking.iter().map(|e| e.symbol.as_str()).collect();

        assert_eq!(symbols, vec!["MSFT", "TSLA", "AAPL"]);
        assert!((ranking[0].gain_percentage - 30.0).abs() < 1e-9);
        assert!((ranking[2].gain + 100.0).abs() < 1e-9);
    }
}
