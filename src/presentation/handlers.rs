// HTTP request handlers
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::infrastructure::sse::chart_sse;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct ScaleQuery {
    pub scale: Option<String>,
}

#[derive(Serialize)]
struct ChannelView<'a> {
    id: &'a str,
    topic: &'a str,
    label: &'a str,
    color: &'a str,
    fill_color: String,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List the configured channels
pub async fn list_channels(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let views: Vec<ChannelView> = state
        .channels
        .iter()
        .map(|c| ChannelView {
            id: &c.id,
            topic: &c.topic,
            label: &c.label,
            color: &c.color,
            fill_color: c.fill_color(),
        })
        .collect();

    match json_response(&views, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Latest frame of every chart
pub async fn get_charts(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    match json_response(&state.board.frames(), accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Stream chart frames as they change
pub async fn stream_charts(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    chart_sse(&state.board)
}

/// Time-scale selector: reload every chart from history for the chosen scale
pub async fn select_scale(
    Query(query): Query<ScaleQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    match query.scale.filter(|s| !s.is_empty()) {
        Some(scale) => {
            tracing::info!("Time scale changed to {}", scale);
            state.dashboard.request_history(scale);
            StatusCode::ACCEPTED.into_response()
        }
        None => (StatusCode::BAD_REQUEST, "missing scale").into_response(),
    }
}
