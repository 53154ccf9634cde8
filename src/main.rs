use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, path::PathBuf, time::Duration};

use qrtui::{app::preview, config::Config, handlers, logging, logic, ui, utils, App, AppSettings};

/// QR code generator TUI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging to qrtui-debug.log in the temp dir
    #[arg(short, long)]
    debug: bool,

    /// Path to config file (default: platform-specific, see docs)
    #[arg(short, long)]
    config: Option<String>,

    /// API base URL, absolute or relative to the configured server
    #[arg(long)]
    base_url: Option<String>,

    /// Directory downloads are saved into
    #[arg(long)]
    download_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Keep the guard alive until exit so buffered log lines are flushed
    let _log_guard = if args.debug {
        let log_path = utils::get_debug_log_path();
        let log_dir = log_path.parent().map(PathBuf::from).unwrap_or_else(std::env::temp_dir);
        Some(logging::init_logging(&log_dir, utils::DEBUG_LOG_FILE)?)
    } else {
        None
    };

    // Load configuration (defaults when no file exists)
    let config = Config::load(args.config.as_deref())?;
    tracing::debug!(?config, "configuration loaded");

    let env_base = std::env::var(logic::urls::API_BASE_ENV).ok();
    let settings = AppSettings {
        api_base_url: config.api_base_url(args.base_url.as_deref(), env_base.as_deref()),
        server_url: config.server_url.clone(),
        download_dir: config.download_dir(args.download_dir),
    };

    // Terminal graphics detection has to happen before raw mode
    let image_picker = config
        .image_preview_enabled
        .then(|| preview::create_picker(&config.image_protocol));

    // Initialize app
    let mut app = App::new(settings, image_picker)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app with error handler
    let result = run_app(&mut terminal, &mut app).await;

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %format!("{:#}", e), "app exited with error");
    }

    // Return result after cleanup
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Always render (Elm Architecture approach)
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        if app.model.ui.should_dismiss_toast() {
            app.model.ui.dismiss_toast();
        }

        if app.model.ui.should_quit {
            break;
        }

        // Process API responses (non-blocking)
        app.drain_api_responses();

        // Process image updates from background loading tasks (non-blocking)
        app.drain_image_updates();

        // Short poll keeps spinners and toasts moving while requests run
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                handlers::handle_key(app, key);
            }
        }
    }

    Ok(())
}
