//! Folio Core - Portfolio analytics library.
//!
//! This crate turns a set of stock holdings plus daily price histories into
//! portfolio analytics:
//!
//! - **Valuation**: per-position cost basis, market value, gain and weight
//! - **Returns**: total return and compound annualized return
//! - **Risk**: annualized volatility and a Sharpe-like ratio
//! - **History**: reconstructed portfolio value per date for charting
//! - **Price data**: async provider trait with a simulated catalog
//!
//! # Example
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use folio_core::{PortfolioTracker, SimulatedPriceProvider};
//!
//! # async fn run() -> folio_core::Result<()> {
//! let mut tracker = PortfolioTracker::new();
//! let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
//! tracker.add_holding("AAPL", 10.0, 150.0, date)?;
//!
//! let provider = SimulatedPriceProvider::new();
//! tracker.refresh_prices(&provider).await;
//!
//! let analysis = tracker.analyze();
//! println!("Total value: {:.2}", analysis.metrics.total_value);
//! # Ok(())
//! # }
//! ```

pub mod analytics;
pub mod config;
pub mod providers;
pub mod tracker;
pub mod types;

// Re-export commonly used types
pub use types::{
    AllocationSlice, ApiResponse, HistoricalValuePoint, Holding, PerformanceEntry,
    PortfolioMetrics, Position, PricePoint, PriceSeries,
};

// Re-export main functionality
pub use analytics::{
    aggregate_portfolio, allocation, annualized_return, daily_returns, historical_value,
    performance_ranking, portfolio_volatility, sharpe_ratio, value_position, PortfolioAnalysis,
    PriceMap,
};
pub use config::{AnalyticsConfig, FetchMode, ProviderConfig, Settings};
pub use providers::{InMemoryPriceProvider, PriceSeriesProvider, SimulatedPriceProvider};
pub use tracker::PortfolioTracker;

/// Error types for folio-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Holding not found: {0}")]
    HoldingNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Provider error: {0}")]
    Provider(String),
}

/// Result type for folio-core operations.
pub type Result<T> = std::result::Result<T, Error>;
