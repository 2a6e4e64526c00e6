//! Typed client for the fermentation device's HTTP API.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

pub mod loader;
pub mod models;

use models::{CreateProject, HistoricSensorData, Project, SensorData, Settings, UpdateProject};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to the device failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("the device could not provide {0}")]
    Unavailable(&'static str),
}

/// URL of the time-lapse GIF the device renders for a project.
pub fn gif_url(api_url: &str, project: u32) -> String {
    format!("{}/webcam/gif/{project}", api_url.trim_end_matches('/'))
}

#[derive(Debug, Clone)]
pub struct DeviceClient {
    http: reqwest::Client,
    base_url: String,
}

impl DeviceClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!(path, "GET");
        let response = self.http.get(self.url(path)).send().await?;
        Ok(response.error_for_status()?.json().await?)
    }

    async fn post(&self, path: &str, body: Option<&impl Serialize>) -> Result<(), ApiError> {
        debug!(path, "POST");
        let mut request = self.http.post(self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        request.send().await?.error_for_status()?;
        Ok(())
    }

    pub async fn current_reading(&self) -> Result<SensorData, ApiError> {
        self.get_json("/sensor").await
    }

    /// Readings logged between `start` and `end`, inclusive.
    pub async fn history(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<HistoricSensorData>, ApiError> {
        let start = start.timestamp().max(0);
        let end = end.timestamp().max(0);
        self.get_json(&format!("/sensor/historic/{start}/{end}"))
            .await
    }

    pub async fn projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get_json::<Option<Vec<Project>>>("/project")
            .await?
            .ok_or(ApiError::Unavailable("the project list"))
    }

    pub async fn project(&self, id: u32) -> Result<Project, ApiError> {
        self.get_json::<Option<Project>>(&format!("/project/{id}"))
            .await?
            .ok_or(ApiError::Unavailable("the project"))
    }

    pub async fn create_project(&self, project: &CreateProject) -> Result<(), ApiError> {
        self.post("/project", Some(project)).await
    }

    pub async fn update_project(
        &self,
        id: u32,
        update: &UpdateProject,
    ) -> Result<Project, ApiError> {
        let path = format!("/project/{id}");
        debug!(%path, "PUT");
        let response = self.http.put(self.url(&path)).json(update).send().await?;
        response
            .error_for_status()?
            .json::<Option<Project>>()
            .await?
            .ok_or(ApiError::Unavailable("the updated project"))
    }

    pub async fn delete_project(&self, id: u32) -> Result<(), ApiError> {
        let path = format!("/project/{id}");
        debug!(%path, "DELETE");
        self.http
            .delete(self.url(&path))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn start_project(&self, id: u32) -> Result<(), ApiError> {
        self.post(&format!("/project/{id}/start"), None::<&()>).await
    }

    pub async fn end_project(&self, id: u32) -> Result<(), ApiError> {
        self.post(&format!("/project/{id}/end"), None::<&()>).await
    }

    pub async fn set_settings(&self, id: u32, settings: &Settings) -> Result<(), ApiError> {
        self.post(&format!("/project/{id}/settings"), Some(settings))
            .await
    }
}
