//! Semaphore-bounded task group
//!
//! Spawns one task per key, lets at most `limit` of them run at once and
//! joins the results in key order, not completion order. The first error
//! wins; tasks still in flight are left to finish on their own.

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::try_join_all;
use tokio::sync::Semaphore;

use crate::domain::{SortError, SortResult};

#[derive(Debug, Clone)]
pub struct BoundedTaskGroup {
    semaphore: Arc<Semaphore>,
    limit: usize,
}

impl BoundedTaskGroup {
    /// A group with `limit` permits (at least one)
    #[must_use]
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(limit)),
            limit,
        }
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Runs `make(key)` for every key and returns the outputs in key order
    pub async fn run_ordered<K, T, F, Fut>(&self, keys: Vec<K>, make: F) -> SortResult<Vec<T>>
    where
        F: Fn(K) -> Fut,
        Fut: Future<Output = SortResult<T>> + Send + 'static,
        T: Send + 'static,
    {
        let tasks = keys.into_iter().map(|key| {
            let semaphore = Arc::clone(&self.semaphore);
            let work = make(key);

            tokio::spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| SortError::TaskJoin(format!("Semaphore acquire failed: {e}")))?;
                work.await
            })
            .map(|joined| joined.map_err(SortError::from).and_then(|result| result))
        });

        try_join_all(tasks).await
    }
}
