use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single temperature / humidity reading from the device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorData {
    pub temp: f32,
    pub hum: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricSensorData {
    /// Unix seconds.
    pub time: u64,
    pub data: SensorData,
}

impl HistoricSensorData {
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(i64::try_from(self.time).ok()?, 0)
    }
}

/// Climate targets the device regulates towards while a project runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub hum: f32,
    pub temp: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hum: 75.0,
            temp: 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub created_at: u64,
    pub start_at: Option<u64>,
    // sic, the device spells it this way
    #[serde(rename = "endend_at")]
    pub end_at: Option<u64>,
    #[serde(default)]
    pub settings: Settings,
}

impl Project {
    pub fn is_running(&self) -> bool {
        self.start_at.is_some() && self.end_at.is_none()
    }

    pub fn is_finished(&self) -> bool {
        self.end_at.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateProject {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateProject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
