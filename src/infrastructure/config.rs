use crate::domain::channel::Channel;
use crate::domain::series::DEFAULT_CAPACITY;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub broker: BrokerSettings,
    #[serde(default)]
    pub history: HistorySettings,
    #[serde(default = "default_channels")]
    pub channels: Vec<ChannelConfig>,
    #[serde(default = "default_series_capacity")]
    pub series_capacity: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BrokerSettings {
    pub host: String,
    pub port: u16,
    pub client_id: String,
    pub keep_alive_secs: u64,
    pub reconnect_delay_ms: u64,
}

impl Default for BrokerSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 1883,
            client_id: "flow-dashboard".to_string(),
            keep_alive_secs: 30,
            reconnect_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HistorySettings {
    pub base_url: String,
    pub path: String,
    pub scale_param: String,
    pub default_scale: String,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            path: "/api/sensor-data".to_string(),
            scale_param: "scale".to_string(),
            default_scale: "realtime".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ChannelConfig {
    pub id: String,
    pub topic: String,
    pub label: String,
    pub color: String,
}

impl ChannelConfig {
    fn new(id: &str, topic: &str, label: &str, color: &str) -> Self {
        Self {
            id: id.to_string(),
            topic: topic.to_string(),
            label: label.to_string(),
            color: color.to_string(),
        }
    }

    pub fn to_channel(&self) -> Channel {
        Channel::new(
            self.id.clone(),
            self.topic.clone(),
            self.label.clone(),
            self.color.clone(),
        )
    }
}

fn default_channels() -> Vec<ChannelConfig> {
    vec![
        ChannelConfig::new("flowChart", "/MQTT/FlowRate", "Flow Rate", "rgb(255, 99, 132)"),
        ChannelConfig::new("velocityChart", "/MQTT/FlowVelocity", "Flow Velocity", "rgb(54, 162, 235)"),
        ChannelConfig::new("percentChart", "/MQTT/FlowPercentage", "Flow Percentage", "rgb(255, 206, 86)"),
        ChannelConfig::new("heatChart", "/MQTT/InstantHeat", "Instant Heat", "rgb(75, 192, 192)"),
        ChannelConfig::new("inputTempChart", "/MQTT/InputTemp", "Input Temperature", "rgb(153, 102, 255)"),
        ChannelConfig::new("outputTempChart", "/MQTT/OutputTemp", "Output Temperature", "rgb(255, 159, 64)"),
    ]
}

fn default_series_capacity() -> usize {
    DEFAULT_CAPACITY
}

/// Load `config/dashboard.*` (optional) overlaid with `DASHBOARD__*`
/// environment variables.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(environment())
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// `DASHBOARD__BROKER__HOST` overrides `broker.host`, and so on.
fn environment() -> config::Environment {
    config::Environment::with_prefix("DASHBOARD")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Build the request URL for one time scale.
pub fn history_url(settings: &HistorySettings, scale: &str) -> String {
    format!(
        "{}{}?{}={}",
        settings.base_url.trim_end_matches('/'),
        settings.path,
        settings.scale_param,
        urlencoding::encode(scale)
    )
}
