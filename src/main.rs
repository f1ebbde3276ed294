//! Charm Checker - Entry Point
//!
//! Loads the charm dataset, initializes the terminal and runs the
//! event loop until the user quits.

use std::fs::{self, OpenOptions};
use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use charm_checker::config::Cli;
use charm_checker::ui::App;
use charm_checker::{load_dataset, RarityTier};

/// How long to wait for a key before redrawing
const POLL_INTERVAL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging to file (to avoid interfering with TUI)
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&cli.log_file)
        .with_context(|| format!("Failed to open log file {}", cli.log_file.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    log::info!("Starting Charm Checker v{}", env!("CARGO_PKG_VERSION"));

    // Load data before touching the terminal so errors stay readable
    let data_path = cli.data_path();
    let text = fs::read_to_string(&data_path)
        .with_context(|| format!("Failed to read charm data from {}", data_path.display()))?;
    let (dataset, report) = load_dataset(&text)
        .with_context(|| format!("Failed to parse charm data in {}", data_path.display()))?;

    log::info!(
        "Loaded {}: {} tiers, {} combinations, {} sub-rarities, {} skill entries ({} skipped)",
        data_path.display(),
        report.tiers,
        report.combinations,
        report.sub_rarities,
        report.skill_entries,
        report.skipped
    );

    let mut app = App::new(dataset, cli.rarity.map(RarityTier));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        log::error!("Exited with error: {}", e);
    }

    log::info!("Charm Checker shut down cleanly");
    result
}

/// Draw, then wait for the next key press
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events, not releases
                if key.kind == KeyEventKind::Press && app.handle_input(key) {
                    break;
                }
            }
        }
    }

    Ok(())
}
