// Dashboard context - the registry plus one series buffer per channel
use crate::application::render_sink::RenderSink;
use crate::domain::reading::Reading;
use crate::domain::registry::ChannelRegistry;
use crate::domain::series::SeriesBuffer;

/// Owns every series buffer. Built once at startup and handed to whichever
/// task processes dashboard events; buffers are only reachable through it.
#[derive(Debug)]
pub struct Dashboard {
    registry: ChannelRegistry,
    buffers: Vec<SeriesBuffer>,
}

impl Dashboard {
    pub fn new(registry: ChannelRegistry, capacity: usize) -> Self {
        let buffers = (0..registry.len())
            .map(|_| SeriesBuffer::new(capacity))
            .collect();
        Self { registry, buffers }
    }

    pub fn registry(&self) -> &ChannelRegistry {
        &self.registry
    }

    #[cfg(test)]
    pub fn buffer(&self, channel_id: &str) -> Option<&SeriesBuffer> {
        self.registry
            .position(channel_id)
            .and_then(|idx| self.buffers.get(idx))
    }

    pub(crate) fn append(&mut self, idx: usize, reading: Reading, sink: &mut dyn RenderSink) {
        if let Some(buffer) = self.buffers.get_mut(idx) {
            buffer.append(reading);
        }
        self.render(idx, sink);
    }

    pub(crate) fn replace_all(
        &mut self,
        idx: usize,
        readings: Vec<Reading>,
        sink: &mut dyn RenderSink,
    ) {
        if let Some(buffer) = self.buffers.get_mut(idx) {
            buffer.replace_all(readings);
        }
        self.render(idx, sink);
    }

    fn render(&self, idx: usize, sink: &mut dyn RenderSink) {
        if let (Some(channel), Some(buffer)) = (self.registry.get(idx), self.buffers.get(idx)) {
            sink.render(channel, &buffer.snapshot());
        }
    }
}
