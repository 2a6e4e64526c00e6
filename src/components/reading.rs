use chrono::{DateTime, Utc};
use dioxus::prelude::*;
use std::cmp::Ordering;

use crate::components::{HistoryPoint, Sparkline};

/// Direction of change between two readings, ignoring jitter below `threshold`.
pub fn trend(previous: f32, current: f32, threshold: f32) -> Ordering {
    if (current - previous).abs() <= threshold {
        Ordering::Equal
    } else {
        current.partial_cmp(&previous).unwrap_or(Ordering::Equal)
    }
}

/// One measured quantity: current value, trend arrow and recent history.
#[component]
pub fn ReadingCard(
    label: String,
    value: f32,
    unit: String,
    history: Vec<HistoryPoint>,
    color: String,
    reference_time: DateTime<Utc>,
) -> Element {
    let mut last_value = use_signal(|| value);
    let mut direction = use_signal(|| Ordering::Equal);

    use_effect(use_reactive((&value,), move |(value,)| {
        let previous = *last_value.peek();
        if previous != value {
            direction.set(trend(previous, value, 0.05));
            last_value.set(value);
        }
    }));

    rsx! {
        div { class: "p-4 rounded-lg border-4 border-gray-300 dark:border-gray-600 bg-white dark:bg-gray-800",
            div { class: "flex items-baseline justify-between mb-2",
                span { class: "text-gray-600 dark:text-gray-400 text-lg", "{label}" }
                span { class: "text-3xl font-semibold",
                    "{value:.1}{unit}"
                    match direction() {
                        Ordering::Greater => rsx! {
                            span { class: "text-red-500 ml-1 text-sm animate-pulse", "↑" }
                        },
                        Ordering::Less => rsx! {
                            span { class: "text-blue-500 ml-1 text-sm animate-pulse", "↓" }
                        },
                        Ordering::Equal => rsx! { "" },
                    }
                }
            }
            Sparkline {
                history,
                color,
                reference_time,
            }
        }
    }
}
