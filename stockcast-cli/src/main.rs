//! Stockcast CLI: load price history, run forecasts, print the dashboard page.

mod text_surface;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stockcast_core::dashboard::display::INSUFFICIENT_DATA;
use stockcast_core::forecast::MIN_OBSERVATIONS;
use stockcast_core::frame::{forecast_frame, series_frame, TablePreview};
use stockcast_core::{
    present, AdditiveEngine, DashboardController, DataLoader, ForecastEngine, ForecastHorizon,
    StockcastConfig, SystemClock, YearsOfPrediction,
};

use text_surface::{format_table, TextSurface};

#[derive(Parser)]
#[command(name = "stockcast", about = "Stock trend loading and forecasting", version)]
struct Cli {
    /// Path to config.toml (default: <config dir>/stockcast/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load daily history for a ticker and print its most recent rows
    Load {
        /// Ticker symbol (must be in the configured list)
        ticker: String,

        /// Number of trailing rows to print
        #[arg(long, default_value_t = 5)]
        rows: usize,
    },

    /// Fit the model on a ticker's closes and forecast ahead
    Forecast {
        /// Ticker symbol (must be in the configured list)
        ticker: String,

        /// Prediction period in days
        #[arg(long)]
        days: Option<u32>,

        /// Number of trailing forecast rows to print
        #[arg(long, default_value_t = 5)]
        rows: usize,

        /// Write the full forecast table to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print the full forecast table as JSON instead of a preview
        #[arg(long)]
        json: bool,
    },

    /// Render the dashboard page as text
    Dashboard {
        /// Ticker symbol (default: first configured ticker)
        #[arg(long)]
        ticker: Option<String>,

        /// Years of prediction
        #[arg(long)]
        years: Option<u8>,

        /// Prediction period in days
        #[arg(long)]
        days: Option<u32>,

        /// Print the display model as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = StockcastConfig::load(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Commands::Load { ticker, rows } => run_load(&config, &ticker, rows),
        Commands::Forecast {
            ticker,
            days,
            rows,
            csv,
            json,
        } => run_forecast(&config, &ticker, days, rows, csv, json),
        Commands::Dashboard {
            ticker,
            years,
            days,
            json,
        } => run_dashboard(&config, ticker, years, days, json),
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "stockcast=debug" } else { "stockcast=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn loader(config: &StockcastConfig) -> Result<DataLoader> {
    DataLoader::from_config(config, Arc::new(SystemClock)).context("building market data provider")
}

fn run_load(config: &StockcastConfig, ticker: &str, rows: usize) -> Result<()> {
    let loader = loader(config)?;
    let ticker = ticker.to_uppercase();
    let series = loader
        .load(&ticker)
        .with_context(|| format!("loading {ticker} from {}", loader.provider_name()))?;

    let df = series_frame(&series)?;
    let preview = TablePreview::tail_of(&df, rows)?;
    print!("{}", format_table(&preview));

    match (series.first_date(), series.last_date()) {
        (Some(first), Some(last)) => {
            println!("\n{ticker}: {} rows, {first} to {last}", series.len());
        }
        _ => println!("\n{ticker}: no rows since {}", loader.start_date()),
    }
    Ok(())
}

fn run_forecast(
    config: &StockcastConfig,
    ticker: &str,
    days: Option<u32>,
    rows: usize,
    csv: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let horizon = match days {
        Some(d) => ForecastHorizon::new(d)?,
        None => ForecastHorizon::new(config.dashboard.default_period_days)?,
    };

    let loader = loader(config)?;
    let ticker = ticker.to_uppercase();
    let series = loader.load(&ticker).with_context(|| format!("loading {ticker}"))?;
    if series.len() < MIN_OBSERVATIONS {
        bail!("{INSUFFICIENT_DATA} ({ticker} has {} rows)", series.len());
    }

    let engine = AdditiveEngine::new(config.forecast.clone());
    let result = engine
        .forecast(&series, horizon)
        .with_context(|| format!("forecasting {ticker}"))?;

    if let Some(path) = &csv {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        result
            .table
            .write_csv(BufWriter::new(file))
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), rows = result.table.len(), "forecast written");
    }

    if json {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        serde_json::to_writer_pretty(&mut out, &result.table)?;
        writeln!(out)?;
        return Ok(());
    }

    let df = forecast_frame(&result.table)?;
    let preview = TablePreview::tail_of(&df, rows)?;
    print!("{}", format_table(&preview));

    let end = horizon.end_date_from(loader.today());
    println!(
        "\n{ticker}: fitted on {} closes with {}; end date {end} ({} days ahead)",
        result.table.history_len(),
        engine.name(),
        horizon.days()
    );
    Ok(())
}

fn run_dashboard(
    config: &StockcastConfig,
    ticker: Option<String>,
    years: Option<u8>,
    days: Option<u32>,
    json: bool,
) -> Result<()> {
    let controller = DashboardController::from_config(config, Arc::new(SystemClock))
        .context("building market data provider")?;

    let mut selection = controller.initial_selection(config);
    if let Some(ticker) = ticker {
        let ticker = ticker.to_uppercase();
        controller.tickers().check(&ticker)?;
        selection.ticker = ticker;
    }
    if let Some(years) = years {
        selection.years = YearsOfPrediction::new(years)?;
    }
    if let Some(days) = days {
        selection.horizon = ForecastHorizon::new(days)?;
    }

    let model = controller.render(&selection);

    if json {
        println!("{}", serde_json::to_string_pretty(&model)?);
        return Ok(());
    }

    let mut surface = TextSurface::new();
    present(&model, &mut surface);
    println!("{}", model.years_label());
    println!("{}", model.horizon_label());
    println!();
    print!("{}", surface.into_string());
    Ok(())
}
