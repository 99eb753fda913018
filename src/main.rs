use crate::app::App;
use crate::config::AppConfig;
use crate::error::AppError;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod error;
mod input;
mod view;

const DEFAULT_CONFIG_PATH: &str = "memory.toml";

fn main() {
    let file_appender = tracing_appender::rolling::daily("./logs", "memory-puzzle.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(non_blocking)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: could not install logger: {}", err);
    }

    if let Err(err) = run() {
        error!("{}", err);
        eprintln!("Error: {}", err);
        // exit skips destructors, so flush the log first
        drop(guard);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let arg = std::env::args().nth(1);
    if arg.as_deref() == Some("--print-config") {
        let toml = AppConfig::default_toml()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        print!("{}", toml);
        return Ok(());
    }
    let path = arg
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = AppConfig::load_or_default(&path)?;
    info!("loaded configuration: {:?}", config);

    let mut rng = config.session.deck_rng();
    let mut app = App::new(&config, &mut rng, Instant::now())?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal, always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture);
    let _ = terminal.show_cursor();

    res?;
    match app.outcome() {
        Some(outcome) => {
            info!("game over: {:?}", outcome);
            println!("{}", view::banner_text(outcome));
        }
        None => info!("quit before the game ended"),
    }
    Ok(())
}
