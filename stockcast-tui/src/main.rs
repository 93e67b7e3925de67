//! Stockcast TUI binary.
//!
//! Loads configuration, wires the controller, then runs a synchronous
//! draw → read key → update loop. Logs go to a file because the terminal
//! belongs to the UI.

use std::fs::{self, File};
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use stockcast_core::{
    DashboardController, ForecastHorizon, StockcastConfig, SystemClock, YearsOfPrediction,
};
use stockcast_tui::{input, ui, App};

#[derive(Parser)]
#[command(name = "stockcast-tui", about = "Stock trend prediction dashboard", version)]
struct Args {
    /// Path to config.toml (default: <config dir>/stockcast/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file (default: <data dir>/stockcast/stockcast.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Initial ticker (must be in the configured list)
    #[arg(long)]
    ticker: Option<String>,

    /// Initial years of prediction
    #[arg(long)]
    years: Option<u8>,

    /// Initial prediction period in days
    #[arg(long)]
    days: Option<u32>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_path = args.log_file.clone().unwrap_or_else(default_log_path);
    init_logging(&log_path)?;

    let config = StockcastConfig::load(args.config.as_deref()).context("loading configuration")?;
    let controller = DashboardController::from_config(&config, Arc::new(SystemClock))
        .context("building market data provider")?;

    let mut selection = controller.initial_selection(&config);
    if let Some(ticker) = args.ticker {
        let ticker = ticker.to_uppercase();
        controller.tickers().check(&ticker)?;
        selection.ticker = ticker;
    }
    if let Some(years) = args.years {
        selection.years = YearsOfPrediction::new(years)?;
    }
    if let Some(days) = args.days {
        selection.horizon = ForecastHorizon::new(days)?;
    }
    tracing::info!(ticker = %selection.ticker, log = %log_path.display(), "starting dashboard");

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // First cycle runs before the terminal switches so load errors are
    // visible in the log even if drawing fails.
    let mut app = App::new(controller, selection);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!(reruns = app.render_count, "dashboard closed");
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|f| ui::draw(f, app))?;

        // Nothing runs in the background, so block until the next event.
        if let Event::Key(key) = event::read()? {
            input::handle_key(app, key);
        }
    }
    Ok(())
}

fn default_log_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stockcast")
        .join("stockcast.log")
}

fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("stockcast=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
