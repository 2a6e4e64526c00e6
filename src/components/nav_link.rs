use dioxus::prelude::*;
use tracing::warn;

use crate::navigation::{location_of, AppRoute, AppRouter};

/// Link to a route by its symbolic name. Aliases of the current view count as active.
#[component]
pub fn NavLink(
    #[props(into)] to: String,
    #[props(into, default = String::new())] class: String,
    #[props(into, default = "font-bold underline".to_string())] active_class: String,
    children: Element,
) -> Element {
    let router = use_context::<AppRouter>();
    let current = match use_route::<AppRoute>() {
        AppRoute::Dashboard { segments } => location_of(&segments),
    };

    let href = match router.href(&to) {
        Ok(href) => href,
        Err(missing) => {
            warn!(error = %missing, "link to unknown route");
            return rsx! {
                span { class: "{class} opacity-50", {children} }
            };
        }
    };
    let active = if router.is_active(&to, &current) { active_class } else { String::new() };

    rsx! {
        Link { class: "{class} {active}", to: AppRoute::at(&href), {children} }
    }
}
