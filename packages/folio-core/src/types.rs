//! Core data types for the portfolio analytics engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single static lot of a stock: shares bought at one price on one date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Holding {
    /// Identity used for removal
    pub id: Uuid,
    /// Stock ticker symbol (uppercase)
    pub symbol: String,
    /// Number of shares held
    pub shares: f64,
    /// Price paid per share
    pub purchase_price: f64,
    /// Day the lot was bought
    pub purchase_date: NaiveDate,
}

impl Holding {
    /// Create a new holding with a fresh identity.
    ///
    /// The symbol is upper-cased; negative shares or prices are coerced to zero.
    pub fn new(symbol: &str, shares: f64, purchase_price: f64, purchase_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: symbol.trim().to_uppercase(),
            shares: shares.max(0.0),
            purchase_price: purchase_price.max(0.0),
            purchase_date,
        }
    }

    /// Calculate the cost basis of this lot (shares * purchase price).
    pub fn cost_basis(&self) -> f64 {
        self.shares * self.purchase_price
    }
}

/// One dated closing price.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// Current price and daily history for one symbol, as supplied by a provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceSeries {
    /// Stock ticker symbol (uppercase)
    pub symbol: String,
    /// Display name of the company
    pub name: String,
    /// Latest price
    pub current_price: f64,
    /// Daily prices, ascending by date
    pub history: Vec<PricePoint>,
}

impl PriceSeries {
    /// Create a price series. History is sorted ascending by date.
    pub fn new(symbol: &str, name: &str, current_price: f64, mut history: Vec<PricePoint>) -> Self {
        history.sort_by_key(|p| p.date);
        Self {
            symbol: symbol.to_uppercase(),
            name: name.to_string(),
            current_price,
            history,
        }
    }

    /// Price recorded for exactly `date`, if any.
    pub fn price_on(&self, date: NaiveDate) -> Option<f64> {
        self.history.iter().find(|p| p.date == date).map(|p| p.price)
    }

    /// Prices in history order.
    pub fn prices(&self) -> Vec<f64> {
        self.history.iter().map(|p| p.price).collect()
    }
}

/// Valuation of one holding against its current price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Position {
    /// The lot being valued
    pub holding: Holding,
    /// Display name from the price series
    pub name: String,
    /// Latest market price
    pub current_price: f64,
    /// shares * current price
    pub current_value: f64,
    /// shares * purchase price
    pub cost_basis: f64,
    /// current value - cost basis
    pub gain: f64,
    /// gain / cost basis * 100, 0 when the cost basis is 0
    pub gain_percentage: f64,
    /// Share of total portfolio value in percent, 0 when the total is 0
    pub weight: f64,
}

impl Position {
    /// Symbol of the underlying holding.
    pub fn symbol(&self) -> &str {
        &self.holding.symbol
    }

    /// Recompute the weight against a portfolio total.
    pub fn with_weight(self, total_value: f64) -> Self {
        let weight = if total_value > 0.0 {
            (self.current_value / total_value) * 100.0
        } else {
            0.0
        };

        Self { weight, ..self }
    }
}

/// Portfolio-level summary metrics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct PortfolioMetrics {
    /// Sum of current position values
    pub total_value: f64,
    /// Sum of position cost bases
    pub total_cost: f64,
    /// total value - total cost
    pub total_return: f64,
    /// Total return as a percentage of total cost
    pub total_return_percentage: f64,
    /// Compound annual growth rate since the oldest purchase, percent
    pub annualized_return: f64,
    /// Annualized standard deviation of daily portfolio returns, percent
    pub volatility: f64,
    /// (annualized return - risk-free rate) / volatility
    pub sharpe_ratio: f64,
}

/// Reconstructed total portfolio value on one date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HistoricalValuePoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// One slice of the allocation breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllocationSlice {
    pub symbol: String,
    pub value: f64,
    pub weight: f64,
}

/// One entry of the per-position performance ranking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformanceEntry {
    pub symbol: String,
    pub gain_percentage: f64,
    pub gain: f64,
}

/// API response wrapper for CLI output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response.
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }
}
