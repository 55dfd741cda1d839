//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    error::TimerError,
    services::play_horn,
    state::{AppState, TimerConfig},
};
use super::responses::{ApiResponse, HealthResponse, StatusResponse};

type ApiResult = Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)>;

/// Map an engine error to a status code and an error body carrying the
/// current display
fn reject(state: &AppState, err: TimerError) -> (StatusCode, Json<ApiResponse>) {
    let status = match err {
        TimerError::InvalidConfig { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        TimerError::AlreadyRunning | TimerError::NotRunning => StatusCode::CONFLICT,
        TimerError::StateUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!("{}", err);
    } else {
        warn!("Rejected request: {}", err);
    }
    (status, Json(ApiResponse::error(err.to_string(), state.get_display())))
}

/// Handle POST /configure - Replace the timer parameters
pub async fn configure_handler(
    State(state): State<Arc<AppState>>,
    Json(config): Json<TimerConfig>,
) -> ApiResult {
    match state.configure(config) {
        Ok(display) => {
            let message = if display.running {
                "Configuration saved, applies on next start"
            } else {
                "Configuration applied"
            };
            info!("Configure endpoint called - {:?}", config);
            Ok(Json(ApiResponse::for_display(message.to_string(), display)))
        }
        Err(e) => Err(reject(&state, e)),
    }
}

/// Handle POST /start - Start the clock
pub async fn start_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    match state.start() {
        Ok(display) => {
            info!("Start endpoint called - timer running");
            Ok(Json(ApiResponse::running("Timer started".to_string(), display)))
        }
        Err(e) => Err(reject(&state, e)),
    }
}

/// Handle POST /stop - Stop the clock
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    match state.stop() {
        Ok(display) => {
            info!("Stop endpoint called - timer stopped");
            Ok(Json(ApiResponse::stopped("Timer stopped".to_string(), display)))
        }
        Err(e) => Err(reject(&state, e)),
    }
}

/// Handle POST /horn - Play the horn once to test it
pub async fn horn_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    match play_horn(&state.horn).await {
        Ok(()) => {
            state.clear_notices_for("horn");
            let display = state.get_display();
            Json(ApiResponse::for_display("Horn played".to_string(), display))
        }
        Err(e) => {
            let message = format!("Horn playback failed: {}", e);
            warn!("{}", message);
            state.add_notice(message.clone());
            Json(ApiResponse::error(message, state.get_display()))
        }
    }
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, StatusCode> {
    let (active_config, pending_config) = match state.get_configs() {
        Ok(configs) => configs,
        Err(e) => {
            error!("Failed to read timer configuration: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let running = match state.is_running() {
        Ok(running) => running,
        Err(e) => {
            error!("Failed to read timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        display: state.get_display(),
        running,
        active_config,
        pending_config,
        notices: state.get_notices(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
