use dioxus::prelude::*;

use crate::navigation::{location_of, AppRouter};
use crate::router::{LoadFailure, NotFound, RenderHost, Route, View};
use crate::views::{Home, LoadFailed, NotFoundPage, SensorPage, SettingsPage, WebcamPage};

/// What the outlet currently shows.
#[derive(Debug, Clone, PartialEq)]
enum Screen {
    Idle,
    Loading(String),
    Page(View),
    NotFound(NotFound),
    Failed(LoadFailure),
}

#[derive(Clone, Copy)]
struct SignalHost(Signal<Screen>);

impl SignalHost {
    fn show(&self, screen: Screen) {
        let mut signal = self.0;
        signal.set(screen);
    }
}

impl RenderHost for SignalHost {
    fn loading(&self, route: &Route) {
        self.show(Screen::Loading(route.name.clone()));
    }

    fn render(&self, _route: &Route, view: View) {
        self.show(Screen::Page(view));
    }

    fn not_found(&self, missing: NotFound) {
        self.show(Screen::NotFound(missing));
    }

    fn load_failed(&self, _route: &Route, failure: LoadFailure) {
        self.show(Screen::Failed(failure));
    }
}

/// Page for the catch-all route: every location the router sees is resolved by the route table.
#[component]
pub fn Dashboard(segments: Vec<String>) -> Element {
    rsx! {
        RouteOutlet { location: location_of(&segments) }
    }
}

/// Renders the page for `location`.
///
/// Each location change restarts the navigation resource, dropping the previous one; the
/// navigator additionally refuses to render a load that a newer navigation overtook.
#[component]
pub fn RouteOutlet(location: String) -> Element {
    let router = use_context::<AppRouter>();
    let screen = use_signal(|| Screen::Idle);

    let nav = router.clone();
    let _navigation = use_resource(use_reactive((&location,), move |(location,)| {
        let router = nav.clone();
        let attempt = router.attempt();
        async move {
            tracing::debug!(%location, attempt, "outlet navigating");
            router.navigator.navigate(&location, &SignalHost(screen)).await
        }
    }));

    match screen() {
        Screen::Idle => rsx! { Loading { what: "dashboard" } },
        Screen::Loading(name) => rsx! { Loading { what: name } },
        Screen::Page(View::Home) => rsx! { Home {} },
        Screen::Page(View::Sensor(bundle)) => rsx! { SensorPage { bundle } },
        Screen::Page(View::Settings(bundle)) => rsx! { SettingsPage { bundle } },
        Screen::Page(View::Webcam(bundle)) => rsx! { WebcamPage { bundle } },
        Screen::NotFound(missing) => rsx! { NotFoundPage { missing: missing.to_string() } },
        Screen::Failed(failure) => rsx! {
            LoadFailed {
                message: failure.to_string(),
                on_retry: move |_| router.retry(),
            }
        },
    }
}

#[component]
fn Loading(what: String) -> Element {
    rsx! {
        div {
            width: "100%",
            height: "100%",
            display: "flex",
            align_items: "center",
            justify_content: "center",
            class: "p-8 text-gray-500",
            "Loading {what}..."
        }
    }
}
