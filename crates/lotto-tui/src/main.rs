// Lotto draw entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Build the page and the draw controller
// 4. Build the form transport
// 5. Create mpsc channels and the application state
// 6. Page load: stamp the date and make the first draw
// 7. Spawn app logic task
// 8. Run the TUI until the user quits
// 9. Cleanup on exit

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use lotto_core::app;
use lotto_core::config;
use lotto_core::draw::DrawController;
use lotto_core::form::{validate_endpoint, FormTransport, HttpTransport};
use lotto_core::page::Page;
use lotto_tui::tui;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("Lotto draw starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: stagger={}ms, {} form fields, {} omitted elements",
        config.draw.stagger_ms,
        config.form.fields.len(),
        config.page.omit.len()
    );

    // 3. Build the page and the draw controller
    let page = Page::build(&config);
    let draws = DrawController::from_config(&config.draw);
    if config.draw.seed.is_some() {
        info!("Draws are seeded; sequence is reproducible");
    }

    // 4. Build the form transport
    if validate_endpoint(&config.form.action).is_err() {
        warn!("Form action is not configured; submissions will be refused");
    }
    let transport: Arc<dyn FormTransport> = Arc::new(
        HttpTransport::new(config.form.timeout()).context("failed to build HTTP client")?,
    );

    // 5. Create mpsc channels and the application state
    let (outcome_tx, outcome_rx) = mpsc::channel(16);
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(64);

    let mut app_state = app::AppState::new(config, page, draws, transport, outcome_tx);

    // 6. Page load
    app_state.start(chrono::Local::now().date_naive());

    // 7. Spawn app logic task
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, outcome_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    // 8. Run the TUI event loop (blocking until user quits)
    info!("Application ready");
    if let Err(e) = tui::run(ui_rx, cmd_tx).await {
        error!("TUI error: {}", e);
    }

    // 9. Cleanup: wait for app task to finish (with timeout)
    let _ = tokio::time::timeout(Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("Lotto draw shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("lotto.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("lotto_core=info,lotto_tui=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
