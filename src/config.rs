use crate::router::BasePath;

/// Where the app is mounted and where the device API lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_path: BasePath,
    pub api_url: String,
}

const BASE_URL_VAR: &str = "FERMENTPI_BASE_URL";
const API_URL_VAR: &str = "FERMENTPI_API_URL";

impl Config {
    /// Reads the build-time environment, with runtime overrides on desktop builds.
    pub fn from_env() -> Self {
        let base = runtime_var(BASE_URL_VAR)
            .or_else(|| option_env!("FERMENTPI_BASE_URL").map(String::from));
        let api = runtime_var(API_URL_VAR)
            .or_else(|| option_env!("FERMENTPI_API_URL").map(String::from));
        Self::from_vars(base.as_deref(), api.as_deref())
    }

    pub fn from_vars(base: Option<&str>, api: Option<&str>) -> Self {
        let api_url = api
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(default_api_url);

        Self {
            base_path: BasePath::new(base.unwrap_or("/")),
            api_url,
        }
    }
}

fn runtime_var(key: &str) -> Option<String> {
    #[cfg(feature = "desktop")]
    {
        std::env::var(key).ok()
    }
    #[cfg(not(feature = "desktop"))]
    {
        let _ = key;
        None
    }
}

/// The page's own origin in the browser, the device's default Rocket port elsewhere.
fn default_api_url() -> String {
    #[cfg(all(feature = "web", target_arch = "wasm32"))]
    {
        web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default()
    }
    #[cfg(not(all(feature = "web", target_arch = "wasm32")))]
    {
        "http://localhost:8000".to_string()
    }
}
