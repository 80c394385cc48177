//! University Portal terminal dashboard.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use portal_backend::{BackendConfig, InMemoryBackend, RestBackend, DEMO_ACCOUNTS, DEMO_PASSWORD};
use portal_records::{RecordSource, RecordsService};
use portal_session::{AuthGateway, RoutePath, RouteTable, SessionConfig, SessionStore};
use portal_telemetry::{init_telemetry, TelemetryConfig};
use portal_tui::{ui, App, Portal, Router};

/// University Portal terminal dashboard
#[derive(Parser, Debug)]
#[command(name = "portal-tui")]
#[command(about = "Role-based university portal in the terminal")]
struct Args {
    /// Backend base URL (overrides PORTAL_BACKEND_URL)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Public API key (overrides PORTAL_ANON_KEY)
    #[arg(long)]
    anon_key: Option<String>,

    /// Directory holding the saved session (overrides PORTAL_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Run against an in-memory backend with demo accounts
    #[arg(long)]
    demo: bool,

    /// Log file; the terminal is taken by the UI
    #[arg(long, default_value = "portal-tui.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let telemetry = TelemetryConfig::from_env().with_log_file(&args.log_file);
    let _logging = init_telemetry(&telemetry).context("initializing telemetry")?;

    let (gateway, source): (Arc<dyn AuthGateway>, Arc<dyn RecordSource>) = if args.demo {
        let backend = Arc::new(InMemoryBackend::demo().with_latency(Duration::from_millis(300)));
        info!(accounts = DEMO_ACCOUNTS.len(), "Demo mode");
        (backend.clone(), backend)
    } else {
        let mut config = BackendConfig::from_env();
        if let Some(endpoint) = args.endpoint {
            config.base_url = endpoint;
        }
        if let Some(key) = args.anon_key {
            config.anon_key = key;
        }
        if let Some(dir) = args.data_dir {
            config.data_dir = dir;
        }
        info!(base_url = %config.base_url, "Using hosted backend");
        let backend = Arc::new(RestBackend::new(config).context("creating HTTP client")?);
        (backend.clone(), backend)
    };

    let session_config = SessionConfig::from_env();
    let router = Router::new(RouteTable::portal(), RoutePath::new(&session_config.login_path));
    let store = Arc::new(SessionStore::with_config(gateway, session_config));
    let records = Arc::new(RecordsService::new(source, store.clone()));

    let mut app = App::new(router);
    if args.demo {
        app.status = Some(format!(
            "Demo: {} / {}",
            DEMO_ACCOUNTS[0].email, DEMO_PASSWORD
        ));
    }
    let portal = Portal::new(store, records, app);
    portal.spawn_restore();
    let watch = portal.spawn_session_watch();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run_app(&mut terminal, &portal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    watch.abort();

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    portal: &Portal,
) -> anyhow::Result<()> {
    loop {
        portal.tick().await;

        {
            let app = portal.app().lock().await;
            terminal.draw(|frame| ui::render(frame, &app))?;
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    let action = portal.app().lock().await.handle_key(key);
                    if let Some(action) = action {
                        portal.spawn(action);
                    }
                }
            }
        }

        if portal.app().lock().await.should_quit() {
            info!("Quit");
            return Ok(());
        }
    }
}
