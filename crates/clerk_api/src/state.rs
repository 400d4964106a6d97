//! Shared handler state.

use crate::error::ApiError;
use clerk_core::Store;
use rusqlite::Connection;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    store: Arc<Store>,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Runs `job` against the store connection on the blocking pool.
    pub async fn with_connection<T, F>(&self, job: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ApiError> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || {
            let mut conn = store.connection()?;
            job(&mut conn)
        })
        .await?
    }
}
