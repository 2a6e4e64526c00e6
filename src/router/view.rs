use std::rc::Rc;

use chrono::{DateTime, Utc};

use super::ViewId;
use crate::api::models::{HistoricSensorData, Project, SensorData};

/// Everything the Sensor page needs before its first render.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorBundle {
    pub current: SensorData,
    pub history: Vec<HistoricSensorData>,
    /// When `current` was read. The bundle may be served from the cache long after.
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettingsBundle {
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WebcamBundle {
    pub projects: Vec<Project>,
    /// Device origin the time-lapse GIFs are served from.
    pub api_url: String,
}

impl WebcamBundle {
    pub fn gif_url(&self, project: u32) -> String {
        crate::api::gif_url(&self.api_url, project)
    }
}

/// A renderable page, handed to the rendering host once loaded.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Home,
    Sensor(Rc<SensorBundle>),
    Settings(Rc<SettingsBundle>),
    Webcam(Rc<WebcamBundle>),
}

impl View {
    /// The view for a resident id, available without any fetch.
    pub fn resident(id: ViewId) -> Option<View> {
        match id {
            ViewId::Home => Some(View::Home),
            _ => None,
        }
    }

    pub fn id(&self) -> ViewId {
        match self {
            View::Home => ViewId::Home,
            View::Sensor(_) => ViewId::Sensor,
            View::Settings(_) => ViewId::Settings,
            View::Webcam(_) => ViewId::Webcam,
        }
    }
}
