use std::rc::Rc;

use chrono::Utc;
use dioxus::prelude::*;
use tracing::warn;

use crate::api::models::Project;
use crate::navigation::AppRouter;
use crate::router::WebcamBundle;

/// The project whose time-lapse is shown first: the running one, else the newest.
pub fn default_project(projects: &[Project]) -> Option<u32> {
    projects
        .iter()
        .find(|p| p.is_running())
        .or_else(|| projects.iter().max_by_key(|p| p.created_at))
        .map(|p| p.id)
}

/// The Webcam page: the device renders a GIF from the frames captured for a project.
#[component]
pub fn WebcamPage(bundle: Rc<WebcamBundle>) -> Element {
    let router = use_context::<AppRouter>();
    let mut projects = use_signal(|| bundle.projects.clone());
    let mut selected = use_signal(|| default_project(&bundle.projects));
    // bumped to make the browser fetch a freshly rendered GIF
    let mut generation = use_signal(|| Utc::now().timestamp());

    let client = router.client.clone();
    use_future(move || {
        let client = client.clone();
        async move {
            match client.projects().await {
                Ok(list) => {
                    if selected.peek().is_none() {
                        selected.set(default_project(&list));
                    }
                    projects.set(list);
                }
                Err(e) => warn!(error = %e, "failed to refresh webcam projects"),
            }
        }
    });

    let gif = selected().map(|id| format!("{}?t={}", bundle.gif_url(id), generation()));

    rsx! {
        div {
            class: "container mx-auto p-4",
            div {
                class: "flex justify-between items-baseline mb-6",
                h1 { class: "text-2xl font-bold", "Webcam" }
                div { class: "flex gap-2 items-center",
                    select {
                        class: "p-1 rounded border border-gray-300 dark:bg-gray-800",
                        onchange: move |e| selected.set(e.value().parse().ok()),
                        for project in projects.read().iter() {
                            option {
                                key: "{project.id}",
                                value: "{project.id}",
                                selected: selected() == Some(project.id),
                                "{project.name}"
                            }
                        }
                    }
                    button {
                        class: "px-3 py-1 rounded bg-blue-600 text-white",
                        onclick: move |_| generation.set(Utc::now().timestamp()),
                        "Refresh"
                    }
                }
            }
            match gif {
                Some(src) => rsx! {
                    img {
                        class: "w-full max-w-4xl rounded-lg shadow",
                        src: "{src}",
                        alt: "Time-lapse of the selected project",
                    }
                },
                None => rsx! {
                    div { class: "text-gray-400 italic", "No project has webcam frames yet." }
                },
            }
        }
    }
}
