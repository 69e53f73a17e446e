//! GradeChart TUI: grade distribution viewer with next/previous navigation.
//!
//! Startup: resolve config → load the gradebook (fatal on failure) → build
//! one assessment per record → hand the navigator to the event loop. The
//! chart is redrawn from a fresh `RenderSpec` every frame.

mod app;
mod input;
mod theme;
mod ui;

#[cfg(test)]
mod test_helpers;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{error, info};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use gradechart_core::config::{self, ViewerConfig};
use gradechart_core::render::MeanMode;
use gradechart_core::{logging, source, BucketPolicy, ChartNavigator};

use crate::app::AppState;

#[derive(Parser)]
#[command(
    name = "gradechart-tui",
    about = "Browse grade distributions, one assessment at a time"
)]
struct Args {
    /// Config file. Defaults to <config dir>/gradechart/config.toml if present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// GitHub contents API URL of the gradebook.
    #[arg(long, conflicts_with = "file")]
    url: Option<String>,

    /// Read the gradebook from a local JSON file instead.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Draw the mean line at the true average instead of its floor.
    #[arg(long, default_value_t = false)]
    exact_mean: bool,

    /// Fail on scores outside 0..=max instead of clamping them.
    #[arg(long, default_value_t = false)]
    strict_buckets: bool,

    /// Log file. Defaults to <config dir>/gradechart/gradechart.log.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// More logging (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_path = args
        .log_file
        .clone()
        .or_else(|| config::app_dir().map(|d| d.join("gradechart.log")))
        .unwrap_or_else(|| PathBuf::from("gradechart.log"));
    logging::init_file(&log_path, logging::level_from_verbosity(args.verbose.max(1)))
        .with_context(|| format!("cannot start logging to {}", log_path.display()))?;

    let config = resolve_config(&args)?;
    let navigator = log_startup_failure(load_navigator(&config))?;
    let source_label = match &config.source.file {
        Some(path) => path.display().to_string(),
        None => config.source.url.clone(),
    };
    let mut app = AppState::new(navigator, source_label);

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen, DisableMouseCapture);
        default_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    info!("exiting");
    result
}

fn resolve_config(args: &Args) -> Result<ViewerConfig> {
    let mut config = ViewerConfig::resolve(args.config.as_deref()).context("loading config")?;
    if let Some(url) = &args.url {
        config.source.url = url.clone();
        config.source.file = None;
    }
    if let Some(file) = &args.file {
        config.source.file = Some(file.clone());
    }
    if args.exact_mean {
        config.chart.mean_mode = MeanMode::Exact;
    }
    if args.strict_buckets {
        config.chart.bucket_policy = BucketPolicy::Reject;
    }
    config.validate()?;
    Ok(config)
}

fn load_navigator(config: &ViewerConfig) -> Result<ChartNavigator> {
    let source = source::from_config(&config.source)?;
    let assessments = source::load_assessments(source.as_ref(), config.chart.bucket_policy)
        .with_context(|| format!("loading gradebook from {}", source.describe()))?;
    Ok(ChartNavigator::new(assessments)?.with_style(config.chart.style()))
}

/// The terminal is not ours yet, so anyhow prints the error; the log file
/// gets a copy.
fn log_startup_failure<T>(result: Result<T>) -> Result<T> {
    result.map_err(|e| {
        error!("startup failed: {e:#}");
        e
    })
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Wait for the next input event; nothing changes between events.
        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) => input::handle_key(app, key),
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    input::handle_mouse(app, mouse, Rect::new(0, 0, size.width, size.height));
                }
                _ => {}
            }
        }

        // 3. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
