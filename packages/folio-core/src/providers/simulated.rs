//! Simulated market data for a fixed catalog of stocks.

use super::PriceSeriesProvider;
use crate::config::{ProviderConfig, TRADING_DAYS_PER_YEAR};
use crate::types::{PricePoint, PriceSeries};
use crate::Result;
use async_trait::async_trait;
use chrono::{Datelike, Days, Local, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Static description of a simulated stock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockProfile {
    pub symbol: &'static str,
    pub name: &'static str,
    /// Price at the start of the simulated history
    pub base_price: f64,
    /// Annualized volatility as a fraction
    pub volatility: f64,
}

const fn profile(
    symbol: &'static str,
    name: &'static str,
    base_price: f64,
    volatility: f64,
) -> StockProfile {
    StockProfile {
        symbol,
        name,
        base_price,
        volatility,
    }
}

/// Symbols the simulated provider knows about.
pub static STOCK_CATALOG: &[StockProfile] = &[
    profile("AAPL", "Apple Inc.", 195.0, 0.25),
    profile("GOOGL", "Alphabet Inc.", 140.0, 0.28),
    profile("MSFT", "Microsoft Corporation", 378.0, 0.23),
    profile("AMZN", "Amazon.com Inc.", 155.0, 0.32),
    profile("TSLA", "Tesla Inc.", 248.0, 0.45),
    profile("NVDA", "NVIDIA Corporation", 495.0, 0.38),
    profile("META", "Meta Platforms Inc.", 355.0, 0.35),
    profile("NFLX", "Netflix Inc.", 485.0, 0.40),
    profile("JPM", "JPMorgan Chase & Co.", 165.0, 0.22),
    profile("V", "Visa Inc.", 275.0, 0.20),
    profile("WMT", "Walmart Inc.", 165.0, 0.18),
    profile("DIS", "The Walt Disney Company", 95.0, 0.30),
    profile("COST", "Costco Wholesale Corporation", 745.0, 0.21),
    profile("BA", "The Boeing Company", 172.0, 0.42),
    profile("XOM", "Exxon Mobil Corporation", 112.0, 0.27),
];

/// Generates a random-walk price history per symbol.
///
/// Each weekday the price moves by `drift + (volatility / sqrt(252)) * shock`
/// with `shock` uniform in `[-1, 1)`. Weekends are skipped. With a seed the
/// path for each symbol is reproducible.
#[derive(Debug, Clone)]
pub struct SimulatedPriceProvider {
    history_days: u32,
    latency: Duration,
    drift: f64,
    seed: Option<u64>,
    end_date: Option<NaiveDate>,
}

impl SimulatedPriceProvider {
    /// Create a provider with default settings.
    pub fn new() -> Self {
        Self::from_config(&ProviderConfig::default())
    }

    pub fn from_config(config: &ProviderConfig) -> Self {
        Self {
            history_days: config.history_days,
            latency: Duration::from_millis(config.latency_ms),
            drift: config.drift,
            seed: config.seed,
            end_date: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Fix the last day of generated history (defaults to today).
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Symbols in catalog order.
    pub fn available_symbols() -> Vec<&'static str> {
        STOCK_CATALOG.iter().map(|p| p.symbol).collect()
    }

    pub fn is_known_symbol(symbol: &str) -> bool {
        Self::lookup(symbol).is_some()
    }

    fn lookup(symbol: &str) -> Option<(usize, &'static StockProfile)> {
        let symbol_upper = symbol.trim().to_uppercase();
        STOCK_CATALOG
            .iter()
            .enumerate()
            .find(|(_, p)| p.symbol == symbol_upper)
    }

    fn rng_for(&self, catalog_index: usize) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(catalog_index as u64)),
            None => StdRng::from_entropy(),
        }
    }

    fn generate_history(&self, profile: &StockProfile, rng: &mut StdRng) -> Vec<PricePoint> {
        let end = self.end_date.unwrap_or_else(|| Local::now().date_naive());
        let daily_volatility = profile.volatility / TRADING_DAYS_PER_YEAR.sqrt();

        let mut price = profile.base_price;
        let mut history = Vec::new();

        for offset in (0..=self.history_days).rev() {
            let Some(date) = end.checked_sub_days(Days::new(offset.into())) else {
                continue;
            };
            if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                continue;
            }

            history.push(PricePoint::new(date, price));

            let shock: f64 = rng.gen_range(-1.0..1.0);
            price *= 1.0 + self.drift + daily_volatility * shock;
        }

        history
    }
}

impl Default for SimulatedPriceProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceSeriesProvider for SimulatedPriceProvider {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn fetch(&self, symbol: &str) -> Result<Option<PriceSeries>> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let Some((index, profile)) = Self::lookup(symbol) else {
            return Ok(None);
        };

        let mut rng = self.rng_for(index);
        let history = self.generate_history(profile, &mut rng);
        let current_price = history
            .last()
            .map(|p| p.price)
            .unwrap_or(profile.base_price);

        Ok(Some(PriceSeries::new(
            profile.symbol,
            profile.name,
            current_price,
            history,
        )))
    }
}
