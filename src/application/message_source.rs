// Message source - anything that delivers (topic, payload) pairs to the dashboard
use crate::application::event_loop::DashboardHandle;
use async_trait::async_trait;

#[async_trait]
pub trait MessageSource: Send {
    /// Topics this source should deliver.
    fn topics(&self) -> &[String];

    /// Deliver messages until the dashboard stops or the source gives up.
    async fn run(self: Box<Self>, dashboard: DashboardHandle) -> anyhow::Result<()>;
}
