// Live ingest - one transport message in, one reading per matching channel
use crate::application::dashboard::Dashboard;
use crate::application::render_sink::RenderSink;
use crate::domain::reading::Reading;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Longest leading decimal number, the way browser `parseFloat` reads one.
fn numeric_prefix() -> &'static Regex {
    static PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^[+-]?(?:Infinity|[0-9]+\.?[0-9]*(?:[eE][+-]?[0-9]+)?|\.[0-9]+(?:[eE][+-]?[0-9]+)?)")
            .expect("Valid numeric prefix regex")
    });
    &PATTERN
}

/// Decimal text to f64. Leading whitespace is skipped and anything after
/// the numeric prefix is ignored ("23.5 C" is 23.5). No prefix means NaN,
/// which is still recorded.
pub fn parse_payload(payload: &[u8]) -> f64 {
    let text = String::from_utf8_lossy(payload);
    numeric_prefix()
        .find(text.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Append the payload to every channel subscribed to `topic` and render each.
/// Returns how many channels were updated; zero means the message was dropped.
pub fn ingest_message(
    dashboard: &mut Dashboard,
    sink: &mut dyn RenderSink,
    topic: &str,
    payload: &[u8],
    now: DateTime<Utc>,
) -> usize {
    let matches = dashboard.registry().by_topic(topic).to_vec();
    if matches.is_empty() {
        tracing::trace!("Dropping message on unregistered topic {}", topic);
        return 0;
    }

    let reading = Reading::new(now, parse_payload(payload));
    if reading.value.is_nan() {
        tracing::debug!("Unparseable payload on {}, recording NaN", topic);
    }

    for idx in &matches {
        dashboard.append(*idx, reading, sink);
    }

    matches.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::render_sink::testing::RecordingSink;
    use crate::domain::channel::Channel;
    use crate::domain::registry::ChannelRegistry;

    fn dashboard(channels: &[(&str, &str, &str)]) -> Dashboard {
        let channels = channels
            .iter()
            .map(|(id, topic, label)| {
                Channel::new(
                    id.to_string(),
                    topic.to_string(),
                    label.to_string(),
                    "rgb(1,2,3)".to_string(),
                )
            })
            .collect();
        Dashboard::new(ChannelRegistry::new(channels).unwrap(), 60)
    }

    fn values(dashboard: &Dashboard, id: &str) -> Vec<f64> {
        dashboard
            .buffer(id)
            .unwrap()
            .snapshot()
            .iter()
            .map(|r| r.value)
            .collect()
    }

    #[test]
    fn test_parse_payload() {
        assert_eq!(parse_payload(b"12.5"), 12.5);
        assert_eq!(parse_payload(b" -3 \n"), -3.0);
        assert_eq!(parse_payload(b"1e3"), 1000.0);
        assert_eq!(parse_payload(b".5"), 0.5);
        assert_eq!(parse_payload(b"-Infinity"), f64::NEG_INFINITY);
        assert!(parse_payload(b"abc").is_nan());
        assert!(parse_payload(b"").is_nan());
        assert!(parse_payload(&[0xff, 0xfe]).is_nan());
    }

    #[test]
    fn test_parse_payload_reads_numeric_prefix() {
        assert_eq!(parse_payload(b"12abc"), 12.0);
        assert_eq!(parse_payload(b"23.5 C"), 23.5);
        assert_eq!(parse_payload(b"1e"), 1.0);
        assert_eq!(parse_payload(b"4.2e1x"), 42.0);
        assert_eq!(parse_payload(b"7."), 7.0);
        assert!(parse_payload(b"inf").is_nan());
        assert!(parse_payload(b"NaN").is_nan());
        assert!(parse_payload(b".").is_nan());
        assert!(parse_payload(b"x12").is_nan());
    }

    #[test]
    fn test_only_matching_channel_changes() {
        let mut dashboard = dashboard(&[("a", "/t/a", "A"), ("b", "/t/b", "B"), ("c", "/t/c", "C")]);
        let mut sink = RecordingSink::default();

        let updated = ingest_message(&mut dashboard, &mut sink, "/t/b", b"4.2", Utc::now());

        assert_eq!(updated, 1);
        assert!(values(&dashboard, "a").is_empty());
        assert_eq!(values(&dashboard, "b"), vec![4.2]);
        assert!(values(&dashboard, "c").is_empty());
        assert_eq!(sink.renders.len(), 1);
        assert_eq!(sink.count_for("b"), 1);
    }

    #[test]
    fn test_unknown_topic_is_dropped() {
        let mut dashboard = dashboard(&[("a", "/t/a", "A")]);
        let mut sink = RecordingSink::default();

        let updated = ingest_message(&mut dashboard, &mut sink, "/t/zzz", b"1", Utc::now());

        assert_eq!(updated, 0);
        assert!(values(&dashboard, "a").is_empty());
        assert!(sink.renders.is_empty());
    }

    #[test]
    fn test_aliased_topic_appends_to_every_match() {
        let mut dashboard = dashboard(&[("a", "/t/x", "A"), ("b", "/t/x", "B")]);
        let mut sink = RecordingSink::default();

        let now = Utc::now();
        let updated = ingest_message(&mut dashboard, &mut sink, "/t/x", b"7", now);

        assert_eq!(updated, 2);
        assert_eq!(values(&dashboard, "a"), vec![7.0]);
        assert_eq!(values(&dashboard, "b"), vec![7.0]);
        assert_eq!(dashboard.buffer("a").unwrap().latest().unwrap().time, now);
        assert_eq!(sink.count_for("a"), 1);
        assert_eq!(sink.count_for("b"), 1);
    }

    #[test]
    fn test_bad_payload_appends_nan() {
        let mut dashboard = dashboard(&[("a", "/t/a", "A")]);
        let mut sink = RecordingSink::default();

        ingest_message(&mut dashboard, &mut sink, "/t/a", b"1", Utc::now());
        ingest_message(&mut dashboard, &mut sink, "/t/a", b"abc", Utc::now());

        let buffer = dashboard.buffer("a").unwrap();
        assert_eq!(buffer.len(), 2);
        assert!(buffer.latest().unwrap().value.is_nan());
        assert!(sink.renders[1].1[1].value.is_nan());
    }

    #[test]
    fn test_sixty_one_messages_keep_last_sixty() {
        let mut dashboard = dashboard(&[("flow", "/t1", "Flow")]);
        let mut sink = RecordingSink::default();

        for i in 0..=60 {
            let payload = i.to_string();
            ingest_message(&mut dashboard, &mut sink, "/t1", payload.as_bytes(), Utc::now());
        }

        let expected: Vec<f64> = (1..=60).map(|i| i as f64).collect();
        assert_eq!(values(&dashboard, "flow"), expected);
        assert_eq!(sink.count_for("flow"), 61);
    }
}
