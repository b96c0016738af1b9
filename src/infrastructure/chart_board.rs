// Chart board - render sink that turns series snapshots into chart frames for browsers
use crate::application::render_sink::RenderSink;
use crate::domain::channel::Channel;
use crate::domain::reading::Reading;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

const LINE_TENSION: f64 = 0.4;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartStyle {
    pub border_color: String,
    pub background_color: String,
    pub fill: bool,
    pub tension: f64,
    pub time_unit: &'static str,
    pub time_format: &'static str,
    pub time_step_size: u32,
    pub tick_rotation: u32,
    pub max_ticks_limit: u32,
    pub auto_skip_ticks: bool,
    pub grid_lines: bool,
    pub begin_at_zero: bool,
    pub padding: Padding,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Padding {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl ChartStyle {
    fn for_channel(channel: &Channel) -> Self {
        Self {
            border_color: channel.color.clone(),
            background_color: channel.fill_color(),
            fill: true,
            tension: LINE_TENSION,
            time_unit: "second",
            time_format: "HH:mm:ss",
            time_step_size: 5,
            tick_rotation: 45,
            max_ticks_limit: 8,
            auto_skip_ticks: true,
            grid_lines: true,
            begin_at_zero: true,
            padding: Padding {
                left: 10,
                right: 30,
                top: 10,
                bottom: 20,
            },
        }
    }
}

/// Everything a browser chart needs to redraw one channel.
///
/// `labels` and `values` are parallel. NaN values serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartFrame {
    pub chart_id: String,
    pub label: String,
    pub labels: Vec<DateTime<Utc>>,
    pub values: Vec<f64>,
    pub style: ChartStyle,
}

impl ChartFrame {
    pub fn new(channel: &Channel, snapshot: &[Reading]) -> Self {
        Self {
            chart_id: channel.id.clone(),
            label: channel.label.clone(),
            labels: snapshot.iter().map(|r| r.time).collect(),
            values: snapshot.iter().map(|r| r.value).collect(),
            style: ChartStyle::for_channel(channel),
        }
    }
}

/// Latest frame per channel plus a feed of every new frame.
///
/// Clones share state; the event loop writes through one clone while HTTP
/// handlers read through others.
#[derive(Clone)]
pub struct ChartBoard {
    frames: Arc<RwLock<Vec<ChartFrame>>>,
    updates: broadcast::Sender<ChartFrame>,
}

impl ChartBoard {
    /// Start with an empty chart for every channel, in registration order.
    pub fn new(channels: &[Channel], feed_capacity: usize) -> Self {
        let frames = channels.iter().map(|c| ChartFrame::new(c, &[])).collect();
        let (updates, _) = broadcast::channel(feed_capacity);
        Self {
            frames: Arc::new(RwLock::new(frames)),
            updates,
        }
    }

    pub fn frames(&self) -> Vec<ChartFrame> {
        match self.frames.read() {
            Ok(frames) => frames.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    #[cfg(test)]
    pub fn frame(&self, chart_id: &str) -> Option<ChartFrame> {
        self.frames().into_iter().find(|f| f.chart_id == chart_id)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChartFrame> {
        self.updates.subscribe()
    }

    fn store(&self, frame: ChartFrame) {
        let mut frames = match self.frames.write() {
            Ok(frames) => frames,
            Err(poisoned) => poisoned.into_inner(),
        };
        match frames.iter_mut().find(|f| f.chart_id == frame.chart_id) {
            Some(existing) => *existing = frame,
            None => frames.push(frame),
        }
    }
}

impl RenderSink for ChartBoard {
    fn render(&mut self, channel: &Channel, snapshot: &[Reading]) {
        let frame = ChartFrame::new(channel, snapshot);
        self.store(frame.clone());
        // No subscribers is fine; the stored frame is served on request
        let _ = self.updates.send(frame);
    }
}
