//! Task-scoped access to a shared session store
//!
//! Code running inside [`provide`] can reach the store through
//! [`use_session`] without threading it through every call.

use std::future::Future;
use std::sync::Arc;

use super::store::SessionStore;
use crate::error::DeskError;
use crate::LibResult;

tokio::task_local! {
    static SESSION_STORE: Arc<SessionStore>;
}

/// Run `future` with `store` available to [`use_session`]
pub async fn provide<F>(store: Arc<SessionStore>, future: F) -> F::Output
where
    F: Future,
{
    SESSION_STORE.scope(store, future).await
}

/// Synchronous form of [`provide`]
pub fn provide_sync<R>(store: Arc<SessionStore>, f: impl FnOnce() -> R) -> R {
    SESSION_STORE.sync_scope(store, f)
}

/// The store of the enclosing [`provide`] scope
///
/// # Errors
///
/// Returns a configuration error when called outside any scope.
pub fn use_session() -> LibResult<Arc<SessionStore>> {
    SESSION_STORE
        .try_with(Arc::clone)
        .map_err(|_| DeskError::out_of_scope("use_session", "session::provide"))
}
