//! Authway demo - a terminal sign-in screen driving the SDK.
//!
//! Shows the core loop a host application implements: restore the session
//! at startup, sign in, watch the session holder for the global
//! "logged out" broadcast, sign out.

mod app;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use authway_core::{AuthClient, ClientConfig, KeyringStore};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::App;
use ui::render;

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Keyring service name namespacing the demo's stored token
const SERVICE_NAME: &str = "authway-demo";

/// Server origin used when AUTHWAY_BASE_URL is unset
const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    info!("Authway demo starting");

    let base_url =
        std::env::var("AUTHWAY_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let client = AuthClient::new(
        ClientConfig::new(base_url),
        Arc::new(KeyringStore::new(SERVICE_NAME)),
    )?;

    let mut app = App::new(client);
    app.bootstrap().await;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("Authway demo shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.poll_session_cleared();
        terminal.draw(|frame| render(frame, app))?;

        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key).await;
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
