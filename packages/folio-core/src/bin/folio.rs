//! Folio CLI - Command line interface for portfolio analytics.
//!
//! Holdings are passed on the command line or in a JSON file; results are
//! printed as JSON. Logs go to stderr.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use folio_core::{
    ApiResponse, InMemoryPriceProvider, PortfolioTracker, PriceSeriesProvider, Settings,
    SimulatedPriceProvider,
};
use serde::Deserialize;
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Folio portfolio analytics CLI - valuation, returns, volatility")]
#[command(version)]
struct Cli {
    /// Settings file (defaults to FOLIO_CONFIG_FILE or ~/.config/folio/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List symbols available from the simulated provider
    Symbols,
    /// Compute metrics, positions, allocation and value history
    Analyze {
        #[command(flatten)]
        input: PortfolioInput,
    },
    /// Compute only the reconstructed portfolio value history
    History {
        #[command(flatten)]
        input: PortfolioInput,
    },
}

#[derive(Args)]
struct PortfolioInput {
    /// Holding as SYMBOL:SHARES:PRICE:YYYY-MM-DD (repeatable)
    #[arg(long = "holding", value_parser = parse_holding)]
    holdings: Vec<HoldingInput>,

    /// JSON file with an array of holdings
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// JSON file with an array of price series (replaces the simulator)
    #[arg(short, long)]
    prices: Option<PathBuf>,

    /// Valuation date (defaults to today)
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// Seed for the simulated price paths
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
struct HoldingInput {
    symbol: String,
    shares: f64,
    purchase_price: f64,
    purchase_date: NaiveDate,
}

fn parse_holding(s: &str) -> Result<HoldingInput, String> {
    let parts: Vec<&str> = s.split(':').collect();
    let [symbol, shares, price, date] = parts.as_slice() else {
        return Err(format!(
            "expected SYMBOL:SHARES:PRICE:YYYY-MM-DD, got '{}'",
            s
        ));
    };

    Ok(HoldingInput {
        symbol: symbol.to_string(),
        shares: shares
            .parse()
            .map_err(|e| format!("invalid shares '{}': {}", shares, e))?,
        purchase_price: price
            .parse()
            .map_err(|e| format!("invalid price '{}': {}", price, e))?,
        purchase_date: date
            .parse()
            .map_err(|e| format!("invalid date '{}': {}", date, e))?,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging on stderr so stdout stays JSON
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from_path(path)?,
        None => Settings::load()?,
    };

    let result = match cli.command {
        Commands::Symbols => Ok(handle_symbols()),
        Commands::Analyze { input } => handle_analyze(&settings, input, false).await,
        Commands::History { input } => handle_analyze(&settings, input, true).await,
    };

    let output = match result {
        Ok(data) => serde_json::to_string_pretty(&ApiResponse::ok(data))?,
        Err(e) => {
            tracing::error!("{}", e);
            serde_json::to_string_pretty(&ApiResponse::<()>::err(e.to_string()))?
        }
    };

    println!("{}", output);
    Ok(())
}

fn handle_symbols() -> serde_json::Value {
    let symbols: Vec<_> = folio_core::providers::STOCK_CATALOG
        .iter()
        .map(|p| json!({ "symbol": p.symbol, "name": p.name }))
        .collect();

    json!({ "symbols": symbols })
}

async fn handle_analyze(
    settings: &Settings,
    input: PortfolioInput,
    history_only: bool,
) -> anyhow::Result<serde_json::Value> {
    let mut holdings = input.holdings;
    if let Some(path) = &input.file {
        let content = fs::read_to_string(path)?;
        let from_file: Vec<HoldingInput> = serde_json::from_str(&content)?;
        holdings.extend(from_file);
    }

    let mut tracker = PortfolioTracker::with_settings(settings);
    for h in &holdings {
        tracker.add_holding(&h.symbol, h.shares, h.purchase_price, h.purchase_date)?;
    }

    let provider: Box<dyn PriceSeriesProvider> = match &input.prices {
        Some(path) => Box::new(InMemoryPriceProvider::from_json_file(path)?),
        None => {
            let mut simulated = SimulatedPriceProvider::from_config(&settings.provider);
            if let Some(seed) = input.seed {
                simulated = simulated.with_seed(seed);
            }
            if let Some(as_of) = input.as_of {
                simulated = simulated.with_end_date(as_of);
            }
            Box::new(simulated)
        }
    };

    tracker.refresh_prices(provider.as_ref()).await;

    let analysis = match input.as_of {
        Some(as_of) => tracker.analyze_as_of(as_of),
        None => tracker.analyze(),
    };

    if history_only {
        return Ok(json!({
            "history": analysis.history,
            "unresolved": tracker.unresolved_symbols(),
        }));
    }

    Ok(json!({
        "metrics": analysis.metrics,
        "positions": analysis.positions,
        "allocation": analysis.allocation,
        "performance": analysis.performance,
        "history": analysis.history,
        "unresolved": tracker.unresolved_symbols(),
    }))
}
