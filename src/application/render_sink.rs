// Render sink - whatever draws a channel's chart
use crate::domain::channel::Channel;
use crate::domain::reading::Reading;

/// Receives the full contents of one channel's series every time it changes.
pub trait RenderSink: Send {
    fn render(&mut self, channel: &Channel, snapshot: &[Reading]);
}
