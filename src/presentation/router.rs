// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{get_charts, health_check, list_channels, select_scale, stream_charts};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/channels", get(list_channels))
        .route("/charts", get(get_charts))
        .route("/charts/stream", get(stream_charts))
        .route("/scale", post(select_scale))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
