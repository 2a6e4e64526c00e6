use crate::components::NavLink;
use crate::navigation::AppRoute;
use dioxus::prelude::*;

/// The Navbar component that will be rendered on all pages of our app since every page is under the layout.
///
/// Every location goes through the catch-all [`AppRoute::Dashboard`], rendered in the outlet below the links.
#[component]
pub fn Navbar() -> Element {
    rsx! {
        div { id: "navbar", class: "flex flex-row gap-4 mb-5 p-4 border-b border-gray-200 dark:border-gray-700",
            NavLink { class: "nav-link", to: "home", "Home" }
            NavLink { class: "nav-link", to: "Sensor", "Sensor" }
            NavLink { class: "nav-link", to: "Settings", "Settings" }
            NavLink { class: "nav-link", to: "Webcam", "Webcam" }
        }

        Outlet::<AppRoute> {}
    }
}
