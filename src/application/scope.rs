//! Task-scoped access to a shared application store

use std::future::Future;
use std::sync::Arc;

use super::store::ApplicationStore;
use crate::error::DeskError;
use crate::LibResult;

tokio::task_local! {
    static APPLICATION_STORE: Arc<ApplicationStore>;
}

/// Run `future` with `store` available to [`use_applications`]
pub async fn provide<F>(store: Arc<ApplicationStore>, future: F) -> F::Output
where
    F: Future,
{
    APPLICATION_STORE.scope(store, future).await
}

pub fn provide_sync<R>(store: Arc<ApplicationStore>, f: impl FnOnce() -> R) -> R {
    APPLICATION_STORE.sync_scope(store, f)
}

/// The store of the enclosing [`provide`] scope
pub fn use_applications() -> LibResult<Arc<ApplicationStore>> {
    APPLICATION_STORE
        .try_with(Arc::clone)
        .map_err(|_| DeskError::out_of_scope("use_applications", "application::provide"))
}
