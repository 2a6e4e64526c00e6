use crate::navigation::AppRouter;
use dioxus::prelude::*;

#[component]
pub fn NotFoundPage(missing: String) -> Element {
    let router = use_context::<AppRouter>();

    rsx! {
        div {
            class: "container mx-auto p-4 text-center",
            h1 { class: "text-2xl font-bold mb-2", "Page not found" }
            p { class: "text-gray-500 mb-4", "{missing}" }
            button {
                class: "px-4 py-2 rounded border border-gray-300 hover:bg-gray-100 dark:hover:bg-gray-800",
                onclick: move |_| {
                    if let Err(e) = router.push_named("home") {
                        tracing::warn!(error = %e, "cannot leave the not-found page");
                    }
                },
                "Back to the dashboard"
            }
        }
    }
}

/// Shown when a page's data could not be fetched from the device.
#[component]
pub fn LoadFailed(message: String, on_retry: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "container mx-auto p-4 text-center",
            h1 { class: "text-2xl font-bold mb-2 text-red-600 dark:text-red-400", "Could not reach the device" }
            p { class: "text-gray-500 mb-4 font-mono text-sm", "{message}" }
            button {
                class: "px-4 py-2 rounded bg-blue-600 text-white hover:bg-blue-700",
                onclick: move |_| on_retry.call(()),
                "Retry"
            }
        }
    }
}
