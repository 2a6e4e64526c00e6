//! Glue between the route table and dioxus-router. The router owns history; every location
//! lands on the single catch-all [`AppRoute::Dashboard`] and is resolved by the route table.

use dioxus::prelude::*;

use crate::api::loader::DeviceViewLoader;
use crate::api::DeviceClient;
use crate::config::Config;
use crate::router::{Navigator, NotFound, RouteTable, RouteTableError};
use crate::views::{Dashboard, Navbar};

#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum AppRoute {
    #[layout(Navbar)]
        #[route("/:..segments")]
        Dashboard { segments: Vec<String> },
}

impl AppRoute {
    /// The router location for an href, base path included. Query and fragment are dropped.
    pub fn at(href: &str) -> Self {
        let path = href.split(['?', '#']).next().unwrap_or_default();
        let segments = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(String::from)
            .collect();
        AppRoute::Dashboard { segments }
    }
}

/// Location string for the segments the catch-all route captured.
pub fn location_of(segments: &[String]) -> String {
    format!("/{}", segments.join("/"))
}

#[derive(Clone)]
pub struct AppRouter {
    pub navigator: Navigator<DeviceViewLoader>,
    pub client: DeviceClient,
    attempt: Signal<u32>,
}

impl AppRouter {
    pub fn new(config: &Config, attempt: Signal<u32>) -> Result<Self, RouteTableError> {
        let table = RouteTable::fermentation(config.base_path.clone())?;
        let client = DeviceClient::new(&config.api_url);
        let navigator = Navigator::new(table, DeviceViewLoader::new(client.clone()));

        Ok(Self {
            navigator,
            client,
            attempt,
        })
    }

    fn table(&self) -> &RouteTable {
        self.navigator.table()
    }

    /// Reading it subscribes the caller.
    pub fn attempt(&self) -> u32 {
        (self.attempt)()
    }

    pub fn href(&self, name: &str) -> Result<String, NotFound> {
        let table = self.table();
        table.resolve_by_name(name).map(|route| table.href(route))
    }

    /// Whether the route named `name` shows the same view as `location`.
    pub fn is_active(&self, name: &str, location: &str) -> bool {
        match (
            self.table().resolve_by_name(name),
            self.table().resolve_location(location),
        ) {
            (Ok(target), Ok(current)) => target.view == current.view,
            _ => false,
        }
    }

    pub fn push_named(&self, name: &str) -> Result<(), NotFound> {
        let href = self.href(name)?;
        navigator().push(AppRoute::at(&href));
        Ok(())
    }

    /// Navigates to the current location again, e.g. after a failed load.
    pub fn retry(&self) {
        let mut attempt = self.attempt;
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::BasePath;

    fn segments(route: AppRoute) -> Vec<String> {
        match route {
            AppRoute::Dashboard { segments } => segments,
        }
    }

    #[test]
    fn hrefs_become_catch_all_segments() {
        assert_eq!(segments(AppRoute::at("/")), Vec::<String>::new());
        assert_eq!(segments(AppRoute::at("/Sensor")), vec!["Sensor".to_string()]);
        assert_eq!(
            segments(AppRoute::at("/fermentation/Webcam?project=2#gif")),
            vec!["fermentation".to_string(), "Webcam".to_string()]
        );
    }

    #[test]
    fn captured_segments_resolve_through_the_table() {
        let table = RouteTable::fermentation(BasePath::new("/fermentation")).unwrap();
        for name in ["home", "dummy", "Sensor", "Settings", "Webcam"] {
            let route = table.resolve_by_name(name).unwrap();
            let href = table.href(route);
            let location = location_of(&segments(AppRoute::at(&href)));
            assert_eq!(table.resolve_location(&location).unwrap(), route);
        }
        assert!(table.resolve_location(&location_of(&[])).is_err());
    }
}
