use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures::future::{LocalBoxFuture, Shared};
use futures::FutureExt;
use tracing::{info, warn};

use super::{LoadFailure, LoadStrategy, Route, View, ViewId};

type SharedFetch = Shared<LocalBoxFuture<'static, Result<View, LoadFailure>>>;

/// Capability that fetches the bundle behind a deferred view.
pub trait ViewLoader {
    fn fetch(&self, view: ViewId) -> LocalBoxFuture<'static, Result<View, LoadFailure>>;
}

impl<L: ViewLoader + ?Sized> ViewLoader for Rc<L> {
    fn fetch(&self, view: ViewId) -> LocalBoxFuture<'static, Result<View, LoadFailure>> {
        (**self).fetch(view)
    }
}

struct Entry {
    epoch: u64,
    fetch: SharedFetch,
}

/// Caches deferred loads by view identity.
///
/// Concurrent and repeated loads of one view share a single fetch. A successful
/// fetch is kept for the lifetime of the cache; a failed one is evicted so the
/// next load fetches again.
pub struct ViewCache<L> {
    loader: Rc<L>,
    entries: Rc<RefCell<HashMap<ViewId, Entry>>>,
    epochs: Rc<Cell<u64>>,
}

impl<L> Clone for ViewCache<L> {
    fn clone(&self) -> Self {
        Self {
            loader: self.loader.clone(),
            entries: self.entries.clone(),
            epochs: self.epochs.clone(),
        }
    }
}

impl<L: ViewLoader + 'static> ViewCache<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader: Rc::new(loader),
            entries: Rc::new(RefCell::new(HashMap::new())),
            epochs: Rc::new(Cell::new(0)),
        }
    }

    pub fn load(&self, route: &Route) -> Load {
        if route.load == LoadStrategy::Eager {
            if let Some(view) = View::resident(route.view) {
                return Load::ready(view);
            }
        }

        let fetch = self.shared_fetch(route.view);
        match fetch.peek() {
            Some(Ok(view)) => Load::ready(view.clone()),
            _ => Load::pending(fetch),
        }
    }

    /// True once the view has been fetched successfully.
    pub fn is_cached(&self, view: ViewId) -> bool {
        self.entries
            .borrow()
            .get(&view)
            .is_some_and(|e| matches!(e.fetch.peek(), Some(Ok(_))))
    }

    fn shared_fetch(&self, view: ViewId) -> SharedFetch {
        if let Some(entry) = self.entries.borrow().get(&view) {
            return entry.fetch.clone();
        }

        let epoch = self.epochs.get() + 1;
        self.epochs.set(epoch);

        info!(%view, "fetching view bundle");
        let fetch = self.loader.fetch(view);
        let entries = Rc::downgrade(&self.entries);
        let shared = async move {
            let result = fetch.await;
            match &result {
                Ok(_) => info!(%view, "view bundle loaded"),
                Err(failure) => {
                    warn!(%view, error = %failure, "view bundle failed to load");
                    if let Some(entries) = entries.upgrade() {
                        let mut entries = entries.borrow_mut();
                        if entries.get(&view).is_some_and(|e| e.epoch == epoch) {
                            entries.remove(&view);
                        }
                    }
                }
            }
            result
        }
        .boxed_local()
        .shared();

        self.entries.borrow_mut().insert(
            view,
            Entry {
                epoch,
                fetch: shared.clone(),
            },
        );
        shared
    }
}

/// A view load in progress. Resolves without suspending when the view is resident or
/// already cached.
pub struct Load {
    state: LoadState,
}

enum LoadState {
    Ready(Option<View>),
    Pending(SharedFetch),
}

impl Load {
    fn ready(view: View) -> Self {
        Self {
            state: LoadState::Ready(Some(view)),
        }
    }

    fn pending(fetch: SharedFetch) -> Self {
        Self {
            state: LoadState::Pending(fetch),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, LoadState::Ready(_))
    }
}

impl Future for Load {
    type Output = Result<View, LoadFailure>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.get_mut().state {
            LoadState::Ready(view) => {
                Poll::Ready(Ok(view.take().expect("Load polled after completion")))
            }
            LoadState::Pending(fetch) => fetch.poll_unpin(cx),
        }
    }
}
