use super::ViewId;
use thiserror::Error;

/// No route matches the requested path or name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFound {
    #[error("no route matches path `{0}`")]
    Path(String),
    #[error("no route is named `{0}`")]
    Name(String),
}

impl NotFound {
    pub fn path(path: &str) -> Self {
        Self::Path(path.to_string())
    }

    pub fn name(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

/// A deferred view's bundle could not be fetched.
///
/// Cloneable so that every waiter on a shared fetch receives the same failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to load the {view} view: {reason}")]
pub struct LoadFailure {
    pub view: ViewId,
    pub reason: String,
}

impl LoadFailure {
    pub fn new(view: ViewId, reason: impl ToString) -> Self {
        Self {
            view,
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    #[error("path `{0}` is declared by more than one route")]
    DuplicatePath(String),
    #[error("name `{0}` is declared by more than one route")]
    DuplicateName(String),
    #[error("route `{name}` is eager but the {view} view must be fetched")]
    EagerNotResident { name: String, view: ViewId },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error(transparent)]
    NotFound(#[from] NotFound),
    #[error(transparent)]
    Load(#[from] LoadFailure),
}
