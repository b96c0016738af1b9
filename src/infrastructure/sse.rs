// Server-Sent Events stream of chart frames
use crate::infrastructure::chart_board::{ChartBoard, ChartFrame};
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{Stream, StreamExt};
use std::convert::Infallible;
use tokio::sync::broadcast::error::RecvError;

fn frame_event(frame: &ChartFrame) -> Option<Event> {
    match serde_json::to_string(frame) {
        Ok(data) => Some(Event::default().event("chart").id(frame.chart_id.clone()).data(data)),
        Err(e) => {
            tracing::error!("Failed to serialize frame for {}: {}", frame.chart_id, e);
            None
        }
    }
}

/// Current frames first, then every new frame as it is rendered. A
/// subscriber that falls behind gets every current frame again.
fn frame_stream(board: &ChartBoard) -> impl Stream<Item = ChartFrame> + use<> {
    // Subscribe before taking the snapshot so nothing rendered in between is lost
    let mut rx = board.subscribe();
    let snapshot = board.frames();
    let board = board.clone();

    async_stream::stream! {
        for frame in snapshot {
            yield frame;
        }

        loop {
            match rx.recv().await {
                Ok(frame) => {
                    yield frame;
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!("SSE client lagged, skipped {} frames, resending all", skipped);
                    for frame in board.frames() {
                        yield frame;
                    }
                }
                Err(RecvError::Closed) => break,
            }
        }
    }
}

pub fn chart_stream(board: &ChartBoard) -> impl Stream<Item = Result<Event, Infallible>> + use<> {
    frame_stream(board).filter_map(|frame| async move { frame_event(&frame).map(Ok::<Event, Infallible>) })
}

pub fn chart_sse(board: &ChartBoard) -> Sse<impl Stream<Item = Result<Event, Infallible>> + use<>> {
    Sse::new(chart_stream(board)).keep_alive(KeepAlive::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::render_sink::RenderSink;
    use crate::domain::channel::Channel;
    use crate::domain::reading::Reading;
    use chrono::Utc;

    fn flow_channel() -> Channel {
        Channel::new(
            "flowChart".to_string(),
            "/MQTT/FlowRate".to_string(),
            "Flow Rate".to_string(),
            "rgb(255, 99, 132)".to_string(),
        )
    }

    #[tokio::test]
    async fn test_snapshot_then_live_frames() {
        let channel = flow_channel();
        let mut board = ChartBoard::new(std::slice::from_ref(&channel), 8);
        let stream = chart_stream(&board);
        futures::pin_mut!(stream);

        board.render(&channel, &[Reading::new(Utc::now(), 2.0)]);

        let first = stream.next().await;
        let second = stream.next().await;
        assert!(matches!(first, Some(Ok(_))));
        assert!(matches!(second, Some(Ok(_))));
    }

    #[tokio::test]
    async fn test_lagging_subscriber_gets_latest_frames() {
        let channel = flow_channel();
        let mut board = ChartBoard::new(std::slice::from_ref(&channel), 1);
        let stream = frame_stream(&board);
        futures::pin_mut!(stream);

        for value in [1.0, 2.0, 3.0] {
            board.render(&channel, &[Reading::new(Utc::now(), value)]);
        }

        let initial = stream.next().await.unwrap();
        assert!(initial.values.is_empty());

        let resent = stream.next().await.unwrap();
        assert_eq!(resent.chart_id, "flowChart");
        assert_eq!(resent.values, vec![3.0]);
    }
}
