//! Process lifetime memoization of per-repository release notes.
use log::*;
use std::{collections::HashMap, future::Future, sync::Arc};
use tokio::sync::{Mutex, OnceCell};

use crate::{
    error::Result,
    notes::types::{NotesQuery, ReleaseNotesResult},
};

type Slot = Arc<OnceCell<ReleaseNotesResult>>;

/// Unbounded cache of release notes keyed by query.
///
/// Each key owns a [`OnceCell`] so concurrent callers asking for the same
/// query share a single computation. A failed computation drops its empty
/// cell so the next caller retries. Nothing expires; stale entries are
/// dropped with [`NotesCache::clear`].
#[derive(Default)]
pub struct NotesCache {
    entries: Mutex<HashMap<NotesQuery, Slot>>,
}

impl NotesCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached notes for `query`, running `compute` if there are none.
    pub async fn get_or_try_compute<F, Fut>(
        &self,
        query: NotesQuery,
        compute: F,
    ) -> Result<ReleaseNotesResult>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ReleaseNotesResult>>,
    {
        let slot = {
            let mut entries = self.entries.lock().await;
            entries.entry(query.clone()).or_default().clone()
        };

        if slot.initialized() {
            debug!("cache hit: {query:?}");
        }

        match slot.get_or_try_init(compute).await {
            Ok(notes) => Ok(notes.clone()),
            Err(err) => {
                let mut entries = self.entries.lock().await;
                if entries.get(&query).is_some_and(|current| {
                    Arc::ptr_eq(current, &slot) && !current.initialized()
                }) {
                    entries.remove(&query);
                }
                Err(err)
            }
        }
    }

    /// Forget every cached result. Computations already running still
    /// complete for their callers but their results are not retained.
    pub async fn clear(&self) {
        let mut entries = self.entries.lock().await;
        info!("clearing {} cached release notes", entries.len());
        entries.clear();
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.entries
            .lock()
            .await
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    #[cfg(test)]
    pub(crate) async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
