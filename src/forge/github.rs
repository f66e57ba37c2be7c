//! Implements the Forge trait for Github
use async_trait::async_trait;
use log::*;
use octocrab::Octocrab;
use serde::Deserialize;
use std::future::Future;

use crate::{
    error::{ReleaseNotesError, Result},
    forge::{
        config::RemoteConfig,
        request::{CompareResponse, ForgeCommit, PullRequestInfo},
        traits::Forge,
    },
};

#[derive(Debug, Deserialize)]
struct Commit {
    pub sha: String,
}

#[derive(Debug, Deserialize)]
struct PullRequestUser {
    pub login: String,
}

#[derive(Debug, Deserialize)]
struct PullRequest {
    pub title: Option<String>,
    pub user: Option<PullRequestUser>,
}

/// GitHub forge implementation using Octocrab for commit comparisons and
/// pull request lookups.
pub struct Github {
    config: RemoteConfig,
    instance: Octocrab,
}

impl Github {
    /// Create GitHub client with personal access token authentication and API
    /// base URL configuration.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let builder = Octocrab::builder()
            .personal_token(config.token.clone())
            .base_uri(config.api_url.clone())?;
        let instance = builder.build()?;

        Ok(Self { config, instance })
    }

    fn repo_route(&self, repo: &str, rest: &str) -> String {
        format!("/repos/{}/{}/{}", self.config.owner, repo, rest)
    }

    /// Runs an API call under the configured timeout. Timeouts are reported
    /// as upstream failures; nothing is retried.
    async fn timed<T, F>(&self, description: &str, call: F) -> Result<T>
    where
        F: Future<Output = octocrab::Result<T>>,
    {
        match tokio::time::timeout(self.config.timeout, call).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(ReleaseNotesError::upstream(format!(
                "timed out after {:?} {description}",
                self.config.timeout
            ))),
        }
    }
}

#[async_trait]
impl Forge for Github {
    async fn compare(
        &self,
        repo: &str,
        previous: &str,
        current: &str,
    ) -> Result<Vec<ForgeCommit>> {
        let route = self.repo_route(repo, &format!("compare/{previous}...{current}"));

        debug!("comparing {repo}: {previous}...{current}");

        let response: CompareResponse = self
            .timed(
                &format!("comparing {repo} {previous}...{current}"),
                self.instance.get(route, None::<&()>),
            )
            .await?;

        info!(
            "found {} commits in {repo} between {previous} and {current}",
            response.commits.len()
        );

        Ok(response.commits.into_iter().map(ForgeCommit::from).collect())
    }

    async fn get_pull_request(
        &self,
        repo: &str,
        number: u64,
    ) -> Result<PullRequestInfo> {
        debug!("fetching pull request {repo}#{number}");

        let route = self.repo_route(repo, &format!("pulls/{number}"));

        let pr: PullRequest = self
            .timed(
                &format!("fetching {repo}#{number}"),
                self.instance.get(route, None::<&()>),
            )
            .await?;

        let title = pr.title.ok_or_else(|| {
            ReleaseNotesError::upstream(format!(
                "pull request {repo}#{number} has no title"
            ))
        })?;

        let author = pr.user.map(|user| user.login).ok_or_else(|| {
            ReleaseNotesError::upstream(format!(
                "pull request {repo}#{number} has no author"
            ))
        })?;

        Ok(PullRequestInfo {
            id: number.to_string(),
            title,
            author,
        })
    }

    async fn get_head_commit(&self, repo: &str) -> Result<String> {
        let route = self.repo_route(repo, "commits/HEAD");

        let commit: Commit = self
            .timed(
                &format!("fetching head commit of {repo}"),
                self.instance.get(route, None::<&()>),
            )
            .await?;

        info!("head commit of {repo}: {}", commit.sha);

        Ok(commit.sha)
    }
}
