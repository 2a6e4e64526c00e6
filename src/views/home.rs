use crate::components::NavLink;
use dioxus::prelude::*;

const CARD: &str = "block p-6 rounded-lg border border-gray-300 dark:border-gray-600 hover:bg-gray-50 dark:hover:bg-gray-800 transition-colors";

/// The Home page, rendered for both `/` and `/dummy`.
#[component]
pub fn Home() -> Element {
    rsx! {
        div {
            class: "container mx-auto p-4 text-center",
            h1 {
                class: "text-4xl font-bold mb-4",
                "Fermentation Pi"
            }
            p {
                class: "text-lg text-gray-600 dark:text-gray-400 mb-8",
                "Watch the climate of your running batch, tune its targets and review the webcam time-lapse."
            }
            div {
                class: "grid grid-cols-1 md:grid-cols-3 gap-4 text-left",
                NavLink { class: CARD, to: "Sensor",
                    h2 { class: "text-xl font-semibold", "🌡️ Sensor" }
                    p { class: "text-gray-500", "Temperature and humidity, live and over the last day." }
                }
                NavLink { class: CARD, to: "Settings",
                    h2 { class: "text-xl font-semibold", "⚙️ Settings" }
                    p { class: "text-gray-500", "Projects and their climate targets." }
                }
                NavLink { class: CARD, to: "Webcam",
                    h2 { class: "text-xl font-semibold", "📷 Webcam" }
                    p { class: "text-gray-500", "Time-lapse of a project." }
                }
            }
        }
    }
}
