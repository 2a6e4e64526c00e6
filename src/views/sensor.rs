use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dioxus::prelude::*;
use tracing::warn;

use crate::api::loader::sensor_bundle;
use crate::components::{HistoryPoint, ReadingAge, ReadingCard};
use crate::navigation::AppRouter;
use crate::router::SensorBundle;

/// How often the reading is refreshed. Matches the device's logging interval.
const REFRESH_SECS: u64 = 60;

/// Time left until a bundle read at `fetched_at` is due for a refresh. A bundle from the
/// view cache may already be overdue.
pub fn refresh_delay(fetched_at: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    let age = (now - fetched_at).to_std().unwrap_or_default();
    Duration::from_secs(REFRESH_SECS).saturating_sub(age)
}

/// The Sensor page: live temperature and humidity with the last day of history.
#[component]
pub fn SensorPage(bundle: Rc<SensorBundle>) -> Element {
    let router = use_context::<AppRouter>();
    let mut reading = use_signal(|| bundle.current);
    let mut history = use_signal(|| bundle.history.clone());
    let mut updated = use_signal(|| bundle.fetched_at);
    let mut error = use_signal(|| None::<String>);

    use_future(move || {
        let client = router.client.clone();
        async move {
            let mut delay = refresh_delay(*updated.peek(), Utc::now());
            loop {
                #[cfg(feature = "desktop")]
                tokio::time::sleep(delay).await;
                #[cfg(not(feature = "desktop"))]
                gloo_timers::future::sleep(delay).await;
                delay = Duration::from_secs(REFRESH_SECS);

                match sensor_bundle(&client).await {
                    Ok(fresh) => {
                        reading.set(fresh.current);
                        history.set(fresh.history);
                        updated.set(fresh.fetched_at);
                        error.set(None);
                    }
                    Err(e) => {
                        warn!(error = %e, "failed to refresh sensor reading");
                        error.set(Some(e.to_string()));
                    }
                }
            }
        }
    });

    let temperatures = HistoryPoint::temperatures(&history.read());
    let humidities = HistoryPoint::humidities(&history.read());
    let current = reading();
    let now = updated();
    let logged = history.read().len();

    rsx! {
        div {
            class: "container mx-auto p-4",
            div {
                class: "flex justify-between items-baseline mb-6",
                h1 { class: "text-2xl font-bold", "Sensor" }
                ReadingAge { last_update: updated }
            }
            if let Some(e) = error() {
                div { class: "mb-4 text-sm text-orange-600 dark:text-orange-400", "Showing the last known reading: {e}" }
            }
            div {
                class: "grid grid-cols-1 md:grid-cols-2 gap-4",
                ReadingCard {
                    label: "Temperature",
                    value: current.temp,
                    unit: "°C",
                    history: temperatures,
                    color: "#60a5fa",
                    reference_time: now,
                }
                ReadingCard {
                    label: "Humidity",
                    value: current.hum,
                    unit: "%",
                    history: humidities,
                    color: "#34d399",
                    reference_time: now,
                }
            }
            p {
                class: "mt-4 text-xs text-gray-500",
                "{logged} readings over the last 24 hours"
            }
        }
    }
}
