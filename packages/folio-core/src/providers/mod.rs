//! Price series providers.
//!
//! The analytics engine only consumes `PriceSeries` values; where they come
//! from is behind the `PriceSeriesProvider` trait.

mod memory;
mod simulated;

pub use memory::InMemoryPriceProvider;
pub use simulated::{SimulatedPriceProvider, StockProfile, STOCK_CATALOG};

use crate::types::PriceSeries;
use crate::Result;
use async_trait::async_trait;

/// Source of current price and daily history for a symbol.
#[async_trait]
pub trait PriceSeriesProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the series for `symbol`.
    ///
    /// Returns `Ok(None)` when the symbol is unknown to this provider.
    async fn fetch(&self, symbol: &str) -> Result<Option<PriceSeries>>;
}
