//! Portfolio analytics engine.
//!
//! Pure functions of the holding set and a symbol to price series map. Every
//! numeric output is finite: divisions by zero and empty inputs fall back to 0.

mod history;
mod performance;
mod risk;
mod valuation;

pub use history::historical_value;
pub use performance::{
    allocation, annualized_return, oldest_purchase_date, performance_ranking, sharpe_ratio,
    years_held,
};
pub use risk::{
    annualize_volatility, daily_returns, population_std_dev, portfolio_volatility,
    weighted_daily_returns,
};
pub use valuation::{aggregate_portfolio, value_position, PortfolioValuation};

use crate::config::AnalyticsConfig;
use crate::types::{
    AllocationSlice, HistoricalValuePoint, Holding, PerformanceEntry, PortfolioMetrics, Position,
    PriceSeries,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Price series keyed by uppercase symbol.
pub type PriceMap = HashMap<String, PriceSeries>;

/// Everything derived from one holding set and price map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioAnalysis {
    pub metrics: PortfolioMetrics,
    pub positions: Vec<Position>,
    pub history: Vec<HistoricalValuePoint>,
    pub allocation: Vec<AllocationSlice>,
    pub performance: Vec<PerformanceEntry>,
}

impl PortfolioAnalysis {
    /// Run the whole engine as of a given date.
    ///
    /// Holdings without an entry in `prices` are left out of valuation, risk
    /// and history, but still count toward the oldest purchase date.
    pub fn compute(
        holdings: &[Holding],
        prices: &PriceMap,
        as_of: NaiveDate,
        config: &AnalyticsConfig,
    ) -> Self {
        let valuation = aggregate_portfolio(holdings, prices);

        let oldest = oldest_purchase_date(holdings, as_of);
        let years = years_held(oldest, as_of, config.days_per_year);
        let annualized = annualized_return(valuation.total_cost, valuation.total_value, years);

        let volatility =
            portfolio_volatility(&valuation.positions, prices, config.trading_days_per_year);
        let sharpe = sharpe_ratio(annualized, volatility, config.risk_free_rate);

        tracing::debug!(
            holdings = holdings.len(),
            positions = valuation.positions.len(),
            total_value = valuation.total_value,
            "Recomputed portfolio analytics"
        );

        let metrics = PortfolioMetrics {
            total_value: valuation.total_value,
            total_cost: valuation.total_cost,
            total_return: valuation.total_return,
            total_return_percentage: valuation.total_return_percentage,
            annualized_return: annualized,
            volatility,
            sharpe_ratio: sharpe,
        };

        Self {
            metrics,
            history: historical_value(holdings, prices),
            allocation: allocation(&valuation.positions),
            performance: performance_ranking(&valuation.positions),
            positions: valuation.positions,
        }
    }
}
