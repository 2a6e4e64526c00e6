use std::rc::Rc;

use chrono::DateTime;
use dioxus::prelude::*;
use tracing::warn;

use crate::api::models::{CreateProject, Project, Settings, UpdateProject};
use crate::api::{ApiError, DeviceClient};
use crate::navigation::AppRouter;
use crate::router::SettingsBundle;

/// Parses the climate target inputs. Humidity is relative, in percent.
pub fn parse_settings(temp: &str, hum: &str) -> Result<Settings, String> {
    let temp: f32 = temp
        .trim()
        .parse()
        .map_err(|_| format!("`{temp}` is not a temperature"))?;
    let hum: f32 = hum
        .trim()
        .parse()
        .map_err(|_| format!("`{hum}` is not a humidity"))?;
    if !(0.0..=100.0).contains(&hum) {
        return Err(format!("humidity must be between 0 and 100%, got {hum}"));
    }
    Ok(Settings { hum, temp })
}

fn format_time(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|s| DateTime::from_timestamp(s, 0))
        .map(|t| t.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

async fn reload(
    client: &DeviceClient,
    mut projects: Signal<Vec<Project>>,
    mut status: Signal<Option<String>>,
) {
    match client.projects().await {
        Ok(list) => projects.set(list),
        Err(e) => {
            warn!(error = %e, "failed to reload projects");
            status.set(Some(e.to_string()));
        }
    }
}

/// The Settings page: projects and the climate targets the device regulates to.
#[component]
pub fn SettingsPage(bundle: Rc<SettingsBundle>) -> Element {
    let router = use_context::<AppRouter>();
    let projects = use_signal(|| bundle.projects.clone());
    let mut status = use_signal(|| None::<String>);
    let mut name = use_signal(String::new);
    let mut description = use_signal(String::new);

    // The bundle is cached across visits; catch up with changes made since.
    let client = router.client.clone();
    use_future(move || {
        let client = client.clone();
        async move { reload(&client, projects, status).await }
    });

    let client = router.client.clone();
    let refresh = use_callback(move |_: ()| {
        let client = client.clone();
        spawn(async move { reload(&client, projects, status).await });
    });

    let client = router.client.clone();
    let create = move |_: MouseEvent| {
        let client = client.clone();
        async move {
            let request = CreateProject {
                name: name().trim().to_string(),
                description: description().trim().to_string(),
            };
            if request.name.is_empty() {
                status.set(Some("a project needs a name".to_string()));
                return;
            }
            match client.create_project(&request).await {
                Ok(()) => {
                    name.set(String::new());
                    description.set(String::new());
                    status.set(None);
                    reload(&client, projects, status).await;
                }
                Err(e) => status.set(Some(e.to_string())),
            }
        }
    };

    let running = projects.read().iter().any(Project::is_running);

    rsx! {
        div {
            class: "container mx-auto p-4",
            h1 { class: "text-2xl font-bold mb-6", "Settings" }
            if let Some(message) = status() {
                div { class: "mb-4 text-sm text-red-600 dark:text-red-400", "{message}" }
            }
            div {
                class: "grid grid-cols-1 lg:grid-cols-2 gap-4 mb-8",
                for project in projects.read().iter().cloned() {
                    ProjectCard {
                        key: "{project.id}",
                        project,
                        can_start: !running,
                        on_changed: refresh,
                        on_error: move |message| status.set(Some(message)),
                    }
                }
            }
            div {
                class: "p-4 rounded-lg border border-gray-300 dark:border-gray-600 max-w-xl",
                h2 { class: "text-lg font-semibold mb-2", "New project" }
                input {
                    class: "block w-full mb-2 p-2 rounded border border-gray-300 dark:bg-gray-800",
                    placeholder: "Name",
                    value: "{name}",
                    oninput: move |e| name.set(e.value()),
                }
                textarea {
                    class: "block w-full mb-2 p-2 rounded border border-gray-300 dark:bg-gray-800",
                    placeholder: "Description",
                    value: "{description}",
                    oninput: move |e| description.set(e.value()),
                }
                button {
                    class: "px-4 py-2 rounded bg-blue-600 text-white hover:bg-blue-700",
                    onclick: create,
                    "Create"
                }
            }
        }
    }
}

#[component]
fn ProjectCard(
    project: Project,
    can_start: bool,
    on_changed: EventHandler<()>,
    on_error: EventHandler<String>,
) -> Element {
    let router = use_context::<AppRouter>();
    let mut temp = use_signal(|| project.settings.temp.to_string());
    let mut hum = use_signal(|| project.settings.hum.to_string());
    let mut description = use_signal(|| project.description.clone());
    let id = project.id;

    // Every action reports back the same way.
    let finish = move |result: Result<(), ApiError>| match result {
        Ok(()) => on_changed.call(()),
        Err(e) => on_error.call(e.to_string()),
    };

    let client = router.client.clone();
    let save = move |_: MouseEvent| {
        let client = client.clone();
        async move {
            let settings = match parse_settings(&temp(), &hum()) {
                Ok(settings) => settings,
                Err(message) => return on_error.call(message),
            };
            let update = UpdateProject {
                description: Some(description()),
                ..Default::default()
            };
            let result: Result<(), ApiError> = async {
                client.set_settings(id, &settings).await?;
                client.update_project(id, &update).await?;
                client.project(id).await.map(|_| ())
            }
            .await;
            finish(result);
        }
    };

    let client = router.client.clone();
    let start = move |_: MouseEvent| {
        let client = client.clone();
        async move { finish(client.start_project(id).await) }
    };

    let client = router.client.clone();
    let end = move |_: MouseEvent| {
        let client = client.clone();
        async move { finish(client.end_project(id).await) }
    };

    let client = router.client.clone();
    let delete = move |_: MouseEvent| {
        let client = client.clone();
        async move { finish(client.delete_project(id).await) }
    };

    let (badge, badge_class) = if project.is_running() {
        ("Running", "bg-green-600")
    } else if project.is_finished() {
        ("Finished", "bg-gray-500")
    } else {
        ("Not started", "bg-blue-500")
    };
    let created = format_time(project.created_at);
    let started = project.start_at.map(format_time);
    let ended = project.end_at.map(format_time);

    rsx! {
        div {
            class: "p-4 rounded-lg border-4 border-gray-300 dark:border-gray-600 bg-white dark:bg-gray-800 relative",
            div { class: "absolute top-0 right-0 {badge_class} text-white text-[10px] font-bold px-2 py-0.5 rounded-bl-md uppercase tracking-tighter",
                "{badge}"
            }
            h3 { class: "text-lg font-bold mb-1", "{project.name}" }
            div { class: "text-xs text-gray-500 mb-3",
                "created {created}"
                if let Some(started) = started {
                    " · started {started}"
                }
                if let Some(ended) = ended {
                    " · ended {ended}"
                }
            }
            textarea {
                class: "block w-full mb-3 p-2 rounded border border-gray-300 dark:bg-gray-900",
                value: "{description}",
                oninput: move |e| description.set(e.value()),
            }
            div { class: "grid grid-cols-[7rem_1fr] gap-2 items-center mb-3",
                label { "Temperature °C" }
                input {
                    r#type: "number",
                    step: "0.5",
                    class: "p-1 rounded border border-gray-300 dark:bg-gray-900",
                    value: "{temp}",
                    oninput: move |e| temp.set(e.value()),
                }
                label { "Humidity %" }
                input {
                    r#type: "number",
                    step: "1",
                    class: "p-1 rounded border border-gray-300 dark:bg-gray-900",
                    value: "{hum}",
                    oninput: move |e| hum.set(e.value()),
                }
            }
            div { class: "flex gap-2",
                button { class: "px-3 py-1 rounded bg-blue-600 text-white", onclick: save, "Save" }
                if project.start_at.is_none() {
                    button {
                        class: "px-3 py-1 rounded bg-green-600 text-white disabled:opacity-50",
                        disabled: !can_start,
                        onclick: start,
                        "Start"
                    }
                }
                if project.is_running() {
                    button { class: "px-3 py-1 rounded bg-orange-600 text-white", onclick: end, "End" }
                }
                button { class: "px-3 py-1 rounded bg-red-600 text-white ml-auto", onclick: delete, "Delete" }
            }
        }
    }
}
