use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;

use super::{
    LoadFailure, NavigationError, NotFound, Route, RouteTable, View, ViewCache, ViewId, ViewLoader,
};

/// The surface that displays whatever the navigator resolves.
pub trait RenderHost {
    /// A deferred view is being fetched for `route`.
    fn loading(&self, route: &Route);
    fn render(&self, route: &Route, view: View);
    fn not_found(&self, missing: NotFound);
    fn load_failed(&self, route: &Route, failure: LoadFailure);
}

#[derive(Debug, Clone, PartialEq)]
pub enum NavigationOutcome {
    Rendered(ViewId),
    Failed(NavigationError),
    /// A newer navigation was issued while this one waited on a load; nothing was rendered.
    Superseded,
}

/// Resolves navigation requests against the route table and hands views to a host.
///
/// Every request takes a ticket. Only the holder of the newest ticket may render, so a
/// slow deferred load never overwrites a page the user has since moved to.
pub struct Navigator<L> {
    table: RouteTable,
    cache: ViewCache<L>,
    latest: Rc<Cell<u64>>,
}

impl<L> Clone for Navigator<L> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            cache: self.cache.clone(),
            latest: self.latest.clone(),
        }
    }
}

impl<L: ViewLoader + 'static> Navigator<L> {
    pub fn new(table: RouteTable, loader: L) -> Self {
        Self {
            table,
            cache: ViewCache::new(loader),
            latest: Rc::new(Cell::new(0)),
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn cache(&self) -> &ViewCache<L> {
        &self.cache
    }

    /// Navigates to a browser location (base path included).
    pub async fn navigate(&self, location: &str, host: &impl RenderHost) -> NavigationOutcome {
        let ticket = self.issue_ticket();
        debug!(location, ticket, "navigating");

        match self.table.resolve_location(location) {
            Ok(route) => self.show(ticket, route.clone(), host).await,
            Err(missing) => Self::missing(missing, host),
        }
    }

    fn missing(missing: NotFound, host: &impl RenderHost) -> NavigationOutcome {
        debug!(error = %missing, "no matching route");
        host.not_found(missing.clone());
        NavigationOutcome::Failed(missing.into())
    }

    async fn show(&self, ticket: u64, route: Route, host: &impl RenderHost) -> NavigationOutcome {
        let load = self.cache.load(&route);
        debug!(route = %route.name, cached = self.cache.is_cached(route.view), "loading view");
        if !load.is_ready() {
            host.loading(&route);
        }

        let result = load.await;
        if ticket != self.latest.get() {
            debug!(route = %route.name, ticket, "navigation superseded, dropping view");
            return NavigationOutcome::Superseded;
        }

        match result {
            Ok(view) => {
                let id = view.id();
                host.render(&route, view);
                NavigationOutcome::Rendered(id)
            }
            Err(failure) => {
                host.load_failed(&route, failure.clone());
                NavigationOutcome::Failed(failure.into())
            }
        }
    }

    fn issue_ticket(&self) -> u64 {
        let ticket = self.latest.get() + 1;
        self.latest.set(ticket);
        ticket
    }
}
