// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard::Dashboard;
use crate::application::event_loop::EventLoop;
use crate::application::message_source::MessageSource;
use crate::domain::channel::Channel;
use crate::domain::registry::ChannelRegistry;
use crate::infrastructure::chart_board::ChartBoard;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::http_history::HttpHistoryRepository;
use crate::infrastructure::mqtt_transport::MqttTransport;
use crate::presentation::app_state::AppState;
use crate::presentation::router::router;

const EVENT_QUEUE_SIZE: usize = 256;
const FRAME_FEED_CAPACITY: usize = 256;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("flow_dashboard=info,tower_http=info")),
        )
        .init();

    // Load configuration
    let config = load_dashboard_config().context("Failed to load dashboard configuration")?;

    // Channel registry (domain layer)
    let channels: Vec<Channel> = config.channels.iter().map(|c| c.to_channel()).collect();
    let registry = ChannelRegistry::new(channels.clone()).context("Invalid channel table")?;
    let topics: Vec<String> = registry.topics().into_iter().map(String::from).collect();

    // Render sink and history source (infrastructure layer)
    let board = ChartBoard::new(&channels, FRAME_FEED_CAPACITY);
    let history = Arc::new(HttpHistoryRepository::new(config.history.clone()));

    // Event loop owning the dashboard (application layer)
    let dashboard = Dashboard::new(registry, config.series_capacity);
    let (event_loop, handle) = EventLoop::new(dashboard, board.clone(), history, EVENT_QUEUE_SIZE);
    tokio::spawn(event_loop.run());

    // Live transport
    let transport: Box<dyn MessageSource> = Box::new(MqttTransport::new(config.broker.clone(), topics));
    tracing::info!("Subscribing to {:?}", transport.topics());
    let transport_handle = handle.clone();
    tokio::spawn(async move {
        if let Err(e) = transport.run(transport_handle).await {
            tracing::error!("MQTT transport stopped: {:#}", e);
        }
    });

    // Initial load with the default scale
    handle.request_history(config.history.default_scale.clone());

    // Create application state
    let state = Arc::new(AppState {
        channels,
        board,
        dashboard: handle,
    });

    // Start server
    let addr: SocketAddr = config
        .server
        .addr
        .parse()
        .with_context(|| format!("Invalid server address {}", config.server.addr))?;
    tracing::info!("Starting flow-dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router(state)).await?;

    Ok(())
}
