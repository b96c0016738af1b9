// Infrastructure layer - External dependencies and adapters
pub mod chart_board;
pub mod config;
pub mod http_history;
pub mod http_response;
pub mod mqtt_transport;
pub mod sse;
