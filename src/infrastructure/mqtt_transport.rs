// MQTT transport - forwards broker messages to the dashboard event loop
use crate::application::event_loop::DashboardHandle;
use crate::application::message_source::MessageSource;
use crate::infrastructure::config::BrokerSettings;
use async_trait::async_trait;
use rumqttc::{AsyncClient, Event, MqttOptions, Packet, QoS, SubscribeFilter};
use std::time::Duration;

const REQUEST_CAPACITY: usize = 10;

pub struct MqttTransport {
    settings: BrokerSettings,
    topics: Vec<String>,
}

impl MqttTransport {
    pub fn new(settings: BrokerSettings, topics: Vec<String>) -> Self {
        Self { settings, topics }
    }

    fn options(&self) -> MqttOptions {
        let mut options = MqttOptions::new(
            self.settings.client_id.clone(),
            self.settings.host.clone(),
            self.settings.port,
        );
        options.set_keep_alive(Duration::from_secs(self.settings.keep_alive_secs));
        options
    }

    fn subscriptions(&self) -> Vec<SubscribeFilter> {
        self.topics
            .iter()
            .map(|t| SubscribeFilter::new(t.clone(), QoS::AtMostOnce))
            .collect()
    }
}

/// Extract (topic, payload) from an incoming publish; everything else is
/// protocol chatter.
fn incoming_message(event: &Event) -> Option<(String, Vec<u8>)> {
    match event {
        Event::Incoming(Packet::Publish(publish)) => {
            Some((publish.topic.clone(), publish.payload.to_vec()))
        }
        _ => None,
    }
}

#[async_trait]
impl MessageSource for MqttTransport {
    fn topics(&self) -> &[String] {
        &self.topics
    }

    async fn run(self: Box<Self>, dashboard: DashboardHandle) -> anyhow::Result<()> {
        let (client, mut eventloop) = AsyncClient::new(self.options(), REQUEST_CAPACITY);
        let reconnect_delay = Duration::from_millis(self.settings.reconnect_delay_ms);

        tracing::info!(
            "Connecting to MQTT broker {}:{}",
            self.settings.host,
            self.settings.port
        );

        loop {
            match eventloop.poll().await {
                Ok(Event::Incoming(Packet::ConnAck(_))) => {
                    // Sessions are clean, so subscribe again after every (re)connect
                    tracing::info!("Connected, subscribing to {} topics", self.topics.len());
                    client.subscribe_many(self.subscriptions()).await?;
                }
                Ok(event) => {
                    if let Some((topic, payload)) = incoming_message(&event) {
                        if dashboard.publish(topic, payload).await.is_err() {
                            tracing::info!("Dashboard stopped, disconnecting from broker");
                            let _ = client.disconnect().await;
                            return Ok(());
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!("MQTT connection error: {}", e);
                    tokio::time::sleep(reconnect_delay).await;
                }
            }
        }
    }
}
