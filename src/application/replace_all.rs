// Replace-all - install a historical batch on every channel
use crate::application::dashboard::Dashboard;
use crate::application::render_sink::RenderSink;
use crate::domain::reading::{HistoricalRecord, Reading};

/// For each channel, keep the records whose sensor label matches it (input
/// order) and overwrite the channel's series with them. Channels with no
/// matching record are cleared.
pub fn replace_all(
    dashboard: &mut Dashboard,
    sink: &mut dyn RenderSink,
    records: &[HistoricalRecord],
) {
    let channel_count = dashboard.registry().len();

    for idx in 0..channel_count {
        let label = match dashboard.registry().get(idx) {
            Some(channel) => channel.label.clone(),
            None => continue,
        };

        let readings: Vec<Reading> = records
            .iter()
            .filter(|r| r.sensor_type == label)
            .map(HistoricalRecord::to_reading)
            .collect();

        tracing::debug!("Replacing {} with {} historical readings", label, readings.len());
        dashboard.replace_all(idx, readings, sink);
    }

    let unmatched = records
        .iter()
        .filter(|r| dashboard.registry().by_label(&r.sensor_type).is_empty())
        .count();
    if unmatched > 0 {
        tracing::trace!("{} historical records matched no channel", unmatched);
    }
}
