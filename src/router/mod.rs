//! Client-side routing for the fermentation dashboard.
//!
//! The [`RouteTable`] is built once at start-up from a fixed list and handed to the
//! [`Navigator`], which resolves browser locations to views and loads deferred views
//! through a [`ViewLoader`].

use std::fmt;
use std::rc::Rc;

pub mod error;
pub mod loader;
pub mod navigator;
pub mod view;

#[cfg(test)]
mod tests;

pub use error::{LoadFailure, NavigationError, NotFound, RouteTableError};
pub use loader::{Load, ViewCache, ViewLoader};
pub use navigator::{NavigationOutcome, Navigator, RenderHost};
pub use view::{SensorBundle, SettingsBundle, View, WebcamBundle};

/// Whether a view ships with the initial bundle or is fetched on first visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadStrategy {
    Eager,
    Deferred,
}

/// Identity of a page-level view. Two routes may share one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    Home,
    Sensor,
    Settings,
    Webcam,
}

impl ViewId {
    /// Resident views need no fetch and may back an eager route.
    pub fn is_resident(self) -> bool {
        View::resident(self).is_some()
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewId::Home => "home",
            ViewId::Sensor => "sensor",
            ViewId::Settings => "settings",
            ViewId::Webcam => "webcam",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: String,
    pub name: String,
    pub load: LoadStrategy,
    pub view: ViewId,
}

impl Route {
    pub fn eager(path: &str, name: &str, view: ViewId) -> Self {
        Self {
            path: path.to_string(),
            name: name.to_string(),
            load: LoadStrategy::Eager,
            view,
        }
    }

    pub fn deferred(path: &str, name: &str, view: ViewId) -> Self {
        Self {
            path: path.to_string(),
            name: name.to_string(),
            load: LoadStrategy::Deferred,
            view,
        }
    }
}

/// Prefix applied uniformly to every route path, e.g. `/fermentation`.
///
/// Stored without a trailing slash; the root base is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasePath(String);

impl BasePath {
    pub fn new(base: &str) -> Self {
        let trimmed = base.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Self(String::new());
        }
        if trimmed.starts_with('/') {
            Self(trimmed.to_string())
        } else {
            Self(format!("/{trimmed}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Strips the base from a browser path. `None` when the path lies outside the base.
    pub fn strip<'a>(&self, path: &'a str) -> Option<&'a str> {
        let rest = path.strip_prefix(self.0.as_str())?;
        if rest.is_empty() {
            Some("/")
        } else if rest.starts_with('/') {
            Some(rest)
        } else {
            None
        }
    }

    pub fn join(&self, path: &str) -> String {
        format!("{}{}", self.0, path)
    }
}

/// The immutable route table. Cloning shares the underlying list.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Rc<[Route]>,
    base: BasePath,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>, base: BasePath) -> Result<Self, RouteTableError> {
        for (i, route) in routes.iter().enumerate() {
            let earlier = &routes[..i];
            if earlier.iter().any(|r| r.path == route.path) {
                return Err(RouteTableError::DuplicatePath(route.path.clone()));
            }
            if earlier.iter().any(|r| r.name == route.name) {
                return Err(RouteTableError::DuplicateName(route.name.clone()));
            }
            if route.load == LoadStrategy::Eager && !route.view.is_resident() {
                return Err(RouteTableError::EagerNotResident {
                    name: route.name.clone(),
                    view: route.view,
                });
            }
        }

        Ok(Self {
            routes: routes.into(),
            base,
        })
    }

    /// The dashboard's routes. `/dummy` is an alias of `/`.
    pub fn fermentation(base: BasePath) -> Result<Self, RouteTableError> {
        Self::new(
            vec![
                Route::eager("/dummy", "dummy", ViewId::Home),
                Route::eager("/", "home", ViewId::Home),
                Route::deferred("/Sensor", "Sensor", ViewId::Sensor),
                Route::deferred("/Settings", "Settings", ViewId::Settings),
                Route::deferred("/Webcam", "Webcam", ViewId::Webcam),
            ],
            base,
        )
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    /// Exact, case-sensitive match on the route path.
    pub fn resolve(&self, path: &str) -> Result<&Route, NotFound> {
        self.routes
            .iter()
            .find(|r| r.path == path)
            .ok_or_else(|| NotFound::path(path))
    }

    pub fn resolve_by_name(&self, name: &str) -> Result<&Route, NotFound> {
        self.routes
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| NotFound::name(name))
    }

    /// Resolves a full browser location: base prefix, query string and fragment are ignored.
    pub fn resolve_location(&self, location: &str) -> Result<&Route, NotFound> {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let path = self
            .base
            .strip(path)
            .ok_or_else(|| NotFound::path(location))?;
        self.resolve(path)
    }

    pub fn href(&self, route: &Route) -> String {
        self.base.join(&route.path)
    }
}
