use chrono::{DateTime, Duration, Utc};
use dioxus::prelude::*;

use crate::api::models::HistoricSensorData;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryPoint {
    pub value: f64,
    pub time: DateTime<Utc>,
}

impl HistoryPoint {
    pub fn temperatures(history: &[HistoricSensorData]) -> Vec<HistoryPoint> {
        Self::series(history, |p| p.data.temp)
    }

    pub fn humidities(history: &[HistoricSensorData]) -> Vec<HistoryPoint> {
        Self::series(history, |p| p.data.hum)
    }

    fn series(
        history: &[HistoricSensorData],
        value: impl Fn(&HistoricSensorData) -> f32,
    ) -> Vec<HistoryPoint> {
        let mut points: Vec<_> = history
            .iter()
            .filter_map(|p| {
                Some(HistoryPoint {
                    time: p.timestamp()?,
                    value: f64::from(value(p)),
                })
            })
            .collect();
        points.sort_by_key(|p| p.time);
        points
    }
}

/// Value range with 10% padding, widened when the series is nearly flat.
fn value_range(points: &[HistoryPoint]) -> (f64, f64) {
    let min = points.iter().map(|p| p.value).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|p| p.value).fold(f64::NEG_INFINITY, f64::max);
    if (max - min).abs() < 0.1 {
        (min - 1.0, max + 1.0)
    } else {
        let padding = (max - min) * 0.1;
        (min - padding, max + padding)
    }
}

/// SVG path for `points` over the `window` ending at `end`. The last value is held
/// to the right edge.
pub fn sparkline_path(
    points: &[HistoryPoint],
    width: u32,
    height: u32,
    window: Duration,
    end: DateTime<Utc>,
) -> Option<String> {
    if points.len() < 2 {
        return None;
    }

    let start = end - window;
    let (width, height) = (f64::from(width), f64::from(height));
    let total = window.num_seconds().max(1) as f64;
    let (min_v, max_v) = value_range(points);

    let x_scale = |t: DateTime<Utc>| ((t - start).num_seconds() as f64 / total * width).clamp(0.0, width);
    let y_scale = |v: f64| height - ((v - min_v) / (max_v - min_v) * height).clamp(0.0, height);

    let mut path = String::new();
    for (i, p) in points.iter().enumerate() {
        let (x, y) = (x_scale(p.time), y_scale(p.value));
        if i == 0 {
            path.push_str(&format!("M {x:.1} {y:.1}"));
        } else {
            path.push_str(&format!(" L {x:.1} {y:.1}"));
        }
        if i == points.len() - 1 && x < width {
            path.push_str(&format!(" L {width:.1} {y:.1}"));
        }
    }
    Some(path)
}

#[component]
pub fn Sparkline(
    history: Vec<HistoryPoint>,
    #[props(default = 240)] width: u32,
    #[props(default = 48)] height: u32,
    #[props(default = 24)] window_hours: i64,
    color: String,
    reference_time: DateTime<Utc>,
) -> Element {
    let Some(path_data) = sparkline_path(
        &history,
        width,
        height,
        Duration::hours(window_hours),
        reference_time,
    ) else {
        return rsx! {
            svg { width, height, class: "opacity-20",
                line { x1: "0", y1: height / 2, x2: width, y2: height / 2, stroke: "{color}", stroke_width: "1" }
            }
        };
    };

    rsx! {
        svg {
            width,
            height,
            view_box: "0 0 {width} {height}",
            class: "block overflow-visible",
            path {
                d: "{path_data}",
                fill: "none",
                stroke: "{color}",
                stroke_width: "1.5",
                stroke_linejoin: "round",
                stroke_linecap: "round",
            }
        }
    }
}
