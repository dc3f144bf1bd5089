use super::PriceSeriesProvider;
use crate::types::PriceSeries;
use crate::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Serves a fixed set of price series.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPriceProvider {
    series: HashMap<String, PriceSeries>,
}

impl InMemoryPriceProvider {
    pub fn new(series: impl IntoIterator<Item = PriceSeries>) -> Self {
        Self {
            series: series
                .into_iter()
                .map(|s| (s.symbol.to_uppercase(), s))
                .collect(),
        }
    }

    /// Load a JSON array of price series.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let series: Vec<PriceSeries> = serde_json::from_str(&content)?;
        Ok(Self::new(series.into_iter().map(|s| {
            PriceSeries::new(&s.symbol, &s.name, s.current_price, s.history)
        })))
    }

    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.series.keys().cloned().collect();
        symbols.sort();
        symbols
    }
}

#[async_trait]
impl PriceSeriesProvider for InMemoryPriceProvider {
    fn name(&self) -> &str {
        "in-memory"
    }

    async fn fetch(&self, symbol: &str) -> Result<Option<PriceSeries>> {
        Ok(self.series.get(&symbol.to_uppercase()).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PricePoint;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn sample() -> PriceSeries {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        PriceSeries::new("AAPL", "Apple Inc.", 190.0, vec![PricePoint::new(date, 190.0)])
    }

    #[tokio::test]
    async fn test_fetch_known_and_unknown() {
        let provider = InMemoryPriceProvider::new([sample()]);

        let series = provider.fetch("aapl").await.unwrap();
        assert_eq!(series.map(|s| s.current_price), Some(190.0));
        assert!(provider.fetch("ZZZZ").await.unwrap().is_none());
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prices.json");
        let json = r#"[
            {
                "symbol": "msft",
                "name": "Microsoft Corporation",
                "current_price": 380.0,
                "history": [
                    { "date": "2024-01-03", "price": 380.0 },
                    { "date": "2024-01-02", "price": 375.0 }
                ]
            }
        ]"#;
        fs::write(&path, json).unwrap();

        let provider = InMemoryPriceProvider::from_json_file(&path).unwrap();

        assert_eq!(provider.symbols(), vec!["MSFT".to_string()]);
        let series = &provider.series["MSFT"];
        assert_eq!(series.prices(), vec![375.0, 380.0]);
    }
}
