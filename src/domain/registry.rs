// Channel registry - fixed table of charts, indexed by topic and by label
use super::channel::Channel;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("no channels configured")]
    Empty,
    #[error("duplicate channel id: {0}")]
    DuplicateChannel(String),
}

/// Read-only after construction.
///
/// Topic and label are indexed separately and never checked against each
/// other; two channels sharing a topic (or label) both match it.
#[derive(Debug, Clone)]
pub struct ChannelRegistry {
    channels: Vec<Channel>,
    by_topic: HashMap<String, Vec<usize>>,
    by_label: HashMap<String, Vec<usize>>,
}

impl ChannelRegistry {
    pub fn new(channels: Vec<Channel>) -> Result<Self, RegistryError> {
        if channels.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut ids = HashMap::new();
        let mut by_topic: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_label: HashMap<String, Vec<usize>> = HashMap::new();

        for (idx, channel) in channels.iter().enumerate() {
            if ids.insert(channel.id.clone(), idx).is_some() {
                return Err(RegistryError::DuplicateChannel(channel.id.clone()));
            }
            by_topic.entry(channel.topic.clone()).or_default().push(idx);
            by_label.entry(channel.label.clone()).or_default().push(idx);
        }

        Ok(Self {
            channels,
            by_topic,
            by_label,
        })
    }

    #[cfg(test)]
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn get(&self, idx: usize) -> Option<&Channel> {
        self.channels.get(idx)
    }

    #[cfg(test)]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.channels.iter().position(|c| c.id == id)
    }

    /// Indices of every channel subscribed to `topic`, in registration order.
    pub fn by_topic(&self, topic: &str) -> &[usize] {
        self.by_topic.get(topic).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Indices of every channel displayed under `label`, in registration order.
    pub fn by_label(&self, label: &str) -> &[usize] {
        self.by_label.get(label).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Distinct topics to subscribe to, in registration order.
    pub fn topics(&self) -> Vec<&str> {
        let mut topics: Vec<&str> = Vec::new();
        for channel in &self.channels {
            if !topics.contains(&channel.topic.as_str()) {
                topics.push(&channel.topic);
            }
        }
        topics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(id: &str, topic: &str, label: &str) -> Channel {
        Channel::new(
            id.to_string(),
            topic.to_string(),
            label.to_string(),
            "rgb(1, 2, 3)".to_string(),
        )
    }

    #[test]
    fn test_lookups() {
        let registry = ChannelRegistry::new(vec![
            channel("a", "/t/a", "A"),
            channel("b", "/t/b", "B"),
        ])
        .unwrap();

        assert_eq!(registry.by_topic("/t/b"), &[1]);
        assert_eq!(registry.by_label("A"), &[0]);
        assert!(registry.by_topic("/t/missing").is_empty());
        assert!(registry.by_label("missing").is_empty());
        assert_eq!(registry.position("b"), Some(1));
    }

    #[test]
    fn test_aliased_topic_matches_every_channel() {
        let registry = ChannelRegistry::new(vec![
            channel("a", "/t/shared", "A"),
            channel("b", "/t/other", "B"),
            channel("c", "/t/shared", "C"),
        ])
        .unwrap();

        assert_eq!(registry.by_topic("/t/shared"), &[0, 2]);
        assert_eq!(registry.topics(), vec!["/t/shared", "/t/other"]);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let err = ChannelRegistry::new(vec![
            channel("a", "/t/a", "A"),
            channel("a", "/t/b", "B"),
        ])
        .unwrap_err();

        assert_eq!(err, RegistryError::DuplicateChannel("a".to_string()));
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(ChannelRegistry::new(Vec::new()).unwrap_err(), RegistryError::Empty);
    }
}
