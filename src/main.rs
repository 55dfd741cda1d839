//! Horn Timer - A period timer with interval horns
//!
//! This is the main entry point for the horn-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use horn_timer::{
    api::create_router,
    config::Config,
    services::check_horn_asset,
    state::AppState,
    tasks::{display_task, horn_player_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("horn_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting horn-timer v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, offset={}s, interval={}s, total={}min, direction={:?}",
        config.host, config.port, config.offset, config.interval, config.total, config.direction
    );

    let horn = config.horn_settings();

    // A missing horn is reported, not fatal
    if let Err(e) = check_horn_asset(&horn).await {
        warn!("{}", e);
    }

    let (state, alerts) = AppState::new(config.port, config.host.clone(), config.timer_config(), horn)?;
    let state = Arc::new(state);

    // Start the horn player background task
    let player_state = Arc::clone(&state);
    tokio::spawn(async move {
        horn_player_task(player_state, alerts).await;
    });

    if !config.quiet {
        tokio::spawn(display_task(state.subscribe_display()));
    }

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /configure  - Set offset, interval, total and direction");
    info!("  POST /start      - Start the clock");
    info!("  POST /stop       - Stop the clock");
    info!("  POST /horn       - Play the horn once");
    info!("  GET  /status     - Current display, configuration and notices");
    info!("  GET  /health     - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    if let Err(e) = state.stop() {
        warn!("Failed to stop timer during shutdown: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
