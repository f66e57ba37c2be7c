//! Traits related to remote git forges
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{
    error::Result,
    forge::request::{ForgeCommit, PullRequestInfo},
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Forge: Send + Sync {
    /// Commits reachable from `current` but not from `previous`, oldest
    /// first.
    async fn compare(
        &self,
        repo: &str,
        previous: &str,
        current: &str,
    ) -> Result<Vec<ForgeCommit>>;

    /// Title and author of a single pull request.
    async fn get_pull_request(
        &self,
        repo: &str,
        number: u64,
    ) -> Result<PullRequestInfo>;

    /// Sha of the latest commit on the repository's default branch.
    async fn get_head_commit(&self, repo: &str) -> Result<String>;
}
