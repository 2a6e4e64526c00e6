use dioxus::prelude::*;

mod api;
mod components;
mod config;
mod navigation;
mod router;
mod views;

use config::Config;
use navigation::{AppRoute, AppRouter};

fn main() {
    dioxus_logger::init(tracing::Level::INFO).expect("failed to init logger");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(Config::from_env);
    let attempt = use_signal(|| 0u32);

    use_context_provider(|| {
        tracing::info!(base = config.base_path.as_str(), api = %config.api_url, "starting dashboard");
        AppRouter::new(&config, attempt).expect("dashboard route table is well formed")
    });

    rsx! {
        Router::<AppRoute> {}
    }
}
