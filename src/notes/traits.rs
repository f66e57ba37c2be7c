//! Service boundary used by the HTTP server
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::notes::types::RepoNotes;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait NotesService: Send + Sync {
    /// Release notes for every repository, in the order given. Each
    /// repository succeeds or fails on its own.
    async fn query_for_release_notes(
        &self,
        repos: Vec<String>,
        current_commit: Option<String>,
        previous_commit: Option<String>,
        staged: bool,
    ) -> Vec<RepoNotes>;

    /// Drop every memoized result.
    async fn clear_cache(&self);
}
