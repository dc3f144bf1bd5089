//! Session state: the holding collection, the per-symbol price cache and the
//! fetch workflow that feeds the analytics engine.

use crate::analytics::{PortfolioAnalysis, PriceMap};
use crate::config::{AnalyticsConfig, FetchMode, Settings};
use crate::providers::PriceSeriesProvider;
use crate::types::{Holding, PriceSeries};
use crate::{Error, Result};
use chrono::{Local, NaiveDate};
use std::collections::HashSet;
use uuid::Uuid;

/// Portfolio tracker that owns the holdings and caches fetched price series.
///
/// Each symbol is requested from a provider at most once per tracker: fetched
/// series are cached, and symbols the provider could not resolve are
/// remembered and never retried.
#[derive(Debug, Default)]
pub struct PortfolioTracker {
    /// Holdings in insertion order
    holdings: Vec<Holding>,
    /// Fetched series keyed by uppercase symbol
    prices: PriceMap,
    /// Symbols the provider returned nothing for
    unresolved: HashSet<String>,
    config: AnalyticsConfig,
    fetch_mode: FetchMode,
}

impl PortfolioTracker {
    /// Create an empty tracker with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty tracker using loaded settings.
    pub fn with_settings(settings: &Settings) -> Self {
        Self {
            config: settings.analytics,
            fetch_mode: settings.provider.fetch_mode,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Get all holdings.
    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    /// Get the cached price series.
    pub fn prices(&self) -> &PriceMap {
        &self.prices
    }

    /// Symbols the provider could not resolve, sorted.
    pub fn unresolved_symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.unresolved.iter().cloned().collect();
        symbols.sort();
        symbols
    }

    /// Find a holding by identity.
    pub fn find_holding(&self, id: Uuid) -> Option<&Holding> {
        self.holdings.iter().find(|h| h.id == id)
    }

    /// Add a holding.
    ///
    /// The symbol is trimmed and upper-cased and must not be empty. Shares and
    /// purchase price must be finite; negative values are coerced to zero.
    pub fn add_holding(
        &mut self,
        symbol: &str,
        shares: f64,
        purchase_price: f64,
        purchase_date: NaiveDate,
    ) -> Result<Holding> {
        if symbol.trim().is_empty() {
            return Err(Error::InvalidInput("symbol is required".to_string()));
        }
        if !shares.is_finite() {
            return Err(Error::InvalidInput(format!("invalid share count: {}", shares)));
        }
        if !purchase_price.is_finite() {
            return Err(Error::InvalidInput(format!(
                "invalid purchase price: {}",
                purchase_price
            )));
        }

        let holding = Holding::new(symbol, shares, purchase_price, purchase_date);
        tracing::debug!(symbol = %holding.symbol, id = %holding.id, "Added holding");
        self.holdings.push(holding.clone());
        Ok(holding)
    }

    /// Remove a holding by identity.
    ///
    /// Returns the removed holding if found. Cached price data is kept.
    pub fn remove_holding(&mut self, id: Uuid) -> Result<Holding> {
        if let Some(idx) = self.holdings.iter().position(|h| h.id == id) {
            let removed = self.holdings.remove(idx);
            tracing::debug!(symbol = %removed.symbol, id = %id, "Removed holding");
            Ok(removed)
        } else {
            Err(Error::HoldingNotFound(id.to_string()))
        }
    }

    /// Remove all holdings (keeps the price cache).
    pub fn clear_holdings(&mut self) {
        self.holdings.clear();
    }

    /// Held symbols that have neither been fetched nor marked unresolved, in
    /// holding order.
    pub fn missing_symbols(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.holdings
            .iter()
            .map(|h| h.symbol.as_str())
            .filter(|s| !self.prices.contains_key(*s) && !self.unresolved.contains(*s))
            .filter(|s| seen.insert(*s))
            .map(str::to_string)
            .collect()
    }

    /// Fetch every missing symbol from `provider` and merge the results.
    ///
    /// Absent symbols and provider failures are logged and marked unresolved.
    /// Returns the number of newly cached series.
    pub async fn refresh_prices<P>(&mut self, provider: &P) -> usize
    where
        P: PriceSeriesProvider + ?Sized,
    {
        let missing = self.missing_symbols();
        if missing.is_empty() {
            tracing::debug!("All held symbols already cached");
            return 0;
        }

        let results = match self.fetch_mode {
            FetchMode::Sequential => {
                let mut results = Vec::with_capacity(missing.len());
                for symbol in &missing {
                    results.push(provider.fetch(symbol).await);
                }
                results
            }
            FetchMode::Concurrent => {
                futures::future::join_all(missing.iter().map(|s| provider.fetch(s))).await
            }
        };

        let mut fetched = 0;
        for (symbol, result) in missing.into_iter().zip(results) {
            match result {
                Ok(Some(series)) => {
                    tracing::info!(
                        symbol = %symbol,
                        provider = provider.name(),
                        points = series.history.len(),
                        "Fetched price series"
                    );
                    self.insert_series(symbol, series);
                    fetched += 1;
                }
                Ok(None) => {
                    tracing::warn!(symbol = %symbol, provider = provider.name(), "Unknown symbol");
                    self.unresolved.insert(symbol);
                }
                Err(e) => {
                    tracing::warn!(
                        symbol = %symbol,
                        provider = provider.name(),
                        error = %e,
                        "Price fetch failed"
                    );
                    self.unresolved.insert(symbol);
                }
            }
        }

        fetched
    }

    /// Cache a series directly, bypassing any provider.
    pub fn insert_series(&mut self, symbol: String, series: PriceSeries) {
        let symbol = symbol.to_uppercase();
        self.unresolved.remove(&symbol);
        self.prices.insert(symbol, series);
    }

    /// Recompute all analytics as of today.
    pub fn analyze(&self) -> PortfolioAnalysis {
        self.analyze_as_of(Local::now().date_naive())
    }

    /// Recompute all analytics as of a given date.
    pub fn analyze_as_of(&self, as_of: NaiveDate) -> PortfolioAnalysis {
        PortfolioAnalysis::compute(&self.holdings, &self.prices, as_of, &self.config)
    }
}
