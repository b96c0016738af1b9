// Reading domain models
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub time: DateTime<Utc>,
    pub value: f64,
}

impl Reading {
    pub fn new(time: DateTime<Utc>, value: f64) -> Self {
        Self { time, value }
    }
}

/// One element of a historical batch: a reading tagged with the label of
/// the sensor it belongs to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoricalRecord {
    #[serde(deserialize_with = "deserialize_time")]
    pub time: DateTime<Utc>,
    pub sensor_type: String,
    pub reading: f64,
}

impl HistoricalRecord {
    #[cfg(test)]
    pub fn new(time: DateTime<Utc>, sensor_type: String, reading: f64) -> Self {
        Self {
            time,
            sensor_type,
            reading,
        }
    }

    pub fn to_reading(&self) -> Reading {
        Reading::new(self.time, self.reading)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTime {
    Millis(i64),
    Text(String),
}

/// Accepts RFC 3339 strings or integer epoch milliseconds.
fn deserialize_time<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    match RawTime::deserialize(deserializer)? {
        RawTime::Millis(ms) => Utc
            .timestamp_millis_opt(ms)
            .single()
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp out of range: {}", ms))),
        RawTime::Text(text) => DateTime::parse_from_rfc3339(&text)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| serde::de::Error::custom(format!("invalid time '{}': {}", text, e))),
    }
}
