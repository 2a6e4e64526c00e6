use std::rc::Rc;

use chrono::{Duration, Utc};
use futures::future::LocalBoxFuture;
use futures::FutureExt;

use super::{ApiError, DeviceClient};
use crate::router::{
    LoadFailure, SensorBundle, SettingsBundle, View, ViewId, ViewLoader, WebcamBundle,
};

/// Hours of history the Sensor page opens with.
pub const HISTORY_HOURS: i64 = 24;

/// The current reading together with the last [`HISTORY_HOURS`] of history.
pub async fn sensor_bundle(client: &DeviceClient) -> Result<SensorBundle, ApiError> {
    let fetched_at = Utc::now();
    let start = fetched_at - Duration::hours(HISTORY_HOURS);
    let (current, history) =
        futures::try_join!(client.current_reading(), client.history(start, fetched_at))?;
    Ok(SensorBundle {
        current,
        history,
        fetched_at,
    })
}

/// Fetches deferred view bundles from the device.
#[derive(Debug, Clone)]
pub struct DeviceViewLoader {
    client: DeviceClient,
}

impl DeviceViewLoader {
    pub fn new(client: DeviceClient) -> Self {
        Self { client }
    }

    async fn fetch_view(client: DeviceClient, view: ViewId) -> Result<View, ApiError> {
        match view {
            ViewId::Home => Ok(View::Home),
            ViewId::Sensor => Ok(View::Sensor(Rc::new(sensor_bundle(&client).await?))),
            ViewId::Settings => {
                let projects = client.projects().await?;
                Ok(View::Settings(Rc::new(SettingsBundle { projects })))
            }
            ViewId::Webcam => {
                let projects = client.projects().await?;
                Ok(View::Webcam(Rc::new(WebcamBundle {
                    projects,
                    api_url: client.base_url().to_string(),
                })))
            }
        }
    }
}

impl ViewLoader for DeviceViewLoader {
    fn fetch(&self, view: ViewId) -> LocalBoxFuture<'static, Result<View, LoadFailure>> {
        let client = self.client.clone();
        async move {
            Self::fetch_view(client, view)
                .await
                .map_err(|e| LoadFailure::new(view, e))
        }
        .boxed_local()
    }
}
