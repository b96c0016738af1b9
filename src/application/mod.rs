// Application layer - Use cases over the dashboard context
pub mod dashboard;
pub mod event_loop;
pub mod history_repository;
pub mod live_ingest;
pub mod message_source;
pub mod render_sink;
pub mod replace_all;
