//! YAN Portal
//!
//! Terminal front end for the Youth Advocacy Network membership platform:
//! membership applications, admin review, events and opportunities.
//!
//! Usage: `yan [CONFIG]` where `CONFIG` defaults to `yan.toml`.

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use yan_portal::application::{App, AppMode};
use yan_portal::infrastructure::{init_logging, AppConfig, FileStore, DEFAULT_CONFIG_FILE};
use yan_portal::presentation::{render_ui, InputHandler};

const TICK_RATE: Duration = Duration::from_millis(250);

/// Entry point for the YAN portal.
///
/// Loads configuration, starts file logging, opens the data directory
/// and runs the main event loop until the user quits.
///
/// # Errors
///
/// Returns an error if the configuration or user directory cannot be read,
/// or if terminal setup fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());
    let config = AppConfig::load_from(&config_path)?;
    let _guard = init_logging(&config)?;
    tracing::info!(config = %config_path, data_dir = %config.storage.data_dir.display(), "starting portal");

    let directory = config.user_directory()?;
    let store = FileStore::new(config.storage.data_dir.clone());
    let mut app = App::new(Box::new(store), Box::new(directory), &config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "terminal loop failed");
        println!("{err:?}");
        eprintln!("details in {}", config.log_path().display());
    }
    tracing::info!("portal closed");

    Ok(())
}

/// Main application event loop.
///
/// Redraws on every tick so transient notices expire without input.
/// Continues running until the user presses 'q' in normal mode.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        app.tick(Instant::now());
        terminal.draw(|f| render_ui(f, app))?;

        if !event::poll(TICK_RATE)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if app.mode == AppMode::Normal => return Ok(()),
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}
