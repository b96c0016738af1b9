// Application state for HTTP handlers
use crate::application::event_loop::DashboardHandle;
use crate::domain::channel::Channel;
use crate::infrastructure::chart_board::ChartBoard;

#[derive(Clone)]
pub struct AppState {
    pub channels: Vec<Channel>,
    pub board: ChartBoard,
    pub dashboard: DashboardHandle,
}
