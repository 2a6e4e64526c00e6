use chrono::{DateTime, Utc};
use dioxus::prelude::*;

/// Seconds after which a reading counts as stale. The device logs once a minute.
pub const STALE_AFTER_SECS: i64 = 180;

/// 1.0 for a reading taken just now, falling to 0.0 at `stale_after` seconds.
pub fn freshness(elapsed_secs: i64, stale_after: i64) -> f64 {
    (1.0 - elapsed_secs as f64 / stale_after.max(1) as f64).clamp(0.0, 1.0)
}

pub fn freshness_class(freshness: f64) -> &'static str {
    if freshness > 0.5 {
        "text-green-500"
    } else if freshness > 0.2 {
        "text-yellow-500"
    } else if freshness > 0.0 {
        "text-orange-500"
    } else {
        "text-red-500 animate-pulse"
    }
}

/// Ring that drains as the last sensor reading ages.
#[component]
pub fn ReadingAge(last_update: ReadSignal<DateTime<Utc>>) -> Element {
    let mut now = use_signal(Utc::now);

    use_future(move || async move {
        loop {
            #[cfg(feature = "desktop")]
            tokio::time::sleep(std::time::Duration::from_secs(1)).await;
            #[cfg(not(feature = "desktop"))]
            gloo_timers::future::sleep(std::time::Duration::from_secs(1)).await;
            now.set(Utc::now());
        }
    });

    let elapsed = (now() - last_update()).num_seconds();
    let level = freshness(elapsed, STALE_AFTER_SECS);
    let color = freshness_class(level);

    let radius = 10.0;
    let circumference = 2.0 * std::f64::consts::PI * radius;
    let offset = circumference * (1.0 - level);

    rsx! {
        div {
            class: "flex items-center gap-2 text-xs text-gray-500",
            title: "{elapsed}s since the last reading",
            svg {
                width: "24",
                height: "24",
                view_box: "0 0 32 32",
                class: "transform -rotate-90",
                circle {
                    cx: "16",
                    cy: "16",
                    r: "{radius}",
                    fill: "none",
                    stroke: "currentColor",
                    stroke_width: "3",
                    class: "text-gray-200 dark:text-gray-800"
                }
                circle {
                    cx: "16",
                    cy: "16",
                    r: "{radius}",
                    fill: "none",
                    stroke: "currentColor",
                    stroke_width: "3",
                    stroke_dasharray: "{circumference}",
                    stroke_dashoffset: "{offset}",
                    stroke_linecap: "round",
                    class: "{color} transition-all duration-1000"
                }
            }
            span { "{elapsed}s ago" }
        }
    }
}
