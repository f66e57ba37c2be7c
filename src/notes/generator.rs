use async_trait::async_trait;
use derive_builder::Builder;
use futures_util::future::join_all;
use log::*;
use std::sync::Arc;

use crate::{
    cluster::{kubernetes::Kubernetes, traits::Cluster},
    config::Config,
    error::{ReleaseNotesError, Result},
    forge::{config::RemoteConfig, github::Github, traits::Forge},
    notes::{
        cache::NotesCache,
        mapper::get_commits_between,
        resolver::resolve_commit_range,
        ticket::{query_ticket_info, ticket_requests},
        traits::NotesService,
        types::{CommitRange, NotesQuery, ReleaseNotesResult, RepoNotes},
    },
    tracker::{config::JiraConfig, jira::Jira, traits::IssueTracker},
};

#[derive(Builder)]
#[builder(build_fn(private, name = "_build"))]
pub struct NotesGeneratorParams {
    pub config: Arc<Config>,
    pub forge: Arc<dyn Forge>,
    pub tracker: Arc<dyn IssueTracker>,
    pub cluster: Arc<dyn Cluster>,
}

impl NotesGeneratorParamsBuilder {
    pub fn build(&self) -> Result<NotesGenerator> {
        let params = self._build().map_err(|e| {
            ReleaseNotesError::invalid_config(format!(
                "Failed to build release notes generator: {}",
                e
            ))
        })?;
        Ok(NotesGenerator::new(params))
    }
}

/// Joins the forge, issue tracker and cluster into release notes and
/// memoizes the result per query.
pub struct NotesGenerator {
    config: Arc<Config>,
    forge: Arc<dyn Forge>,
    tracker: Arc<dyn IssueTracker>,
    cluster: Arc<dyn Cluster>,
    cache: NotesCache,
}

impl NotesGenerator {
    pub fn builder() -> NotesGeneratorParamsBuilder {
        NotesGeneratorParamsBuilder::default()
    }

    pub fn new(params: NotesGeneratorParams) -> Self {
        Self {
            config: params.config,
            forge: params.forge,
            tracker: params.tracker,
            cluster: params.cluster,
            cache: NotesCache::new(),
        }
    }

    /// Generator backed by GitHub, Jira and the Kubernetes cluster of the
    /// current environment.
    pub fn from_config(config: Config) -> Result<Self> {
        let forge = Github::new(RemoteConfig::from_env(&config)?)?;
        let tracker = Jira::new(JiraConfig::from_env(&config)?)?;
        let cluster = Kubernetes::new(config.request_timeout());

        Self::builder()
            .config(Arc::new(config))
            .forge(Arc::new(forge))
            .tracker(Arc::new(tracker))
            .cluster(Arc::new(cluster))
            .build()
    }

    /// Notes for one repository, served from the cache when the same query
    /// was answered before.
    pub async fn get_notes_for_repo(
        &self,
        query: NotesQuery,
    ) -> Result<ReleaseNotesResult> {
        self.cache
            .get_or_try_compute(query.clone(), || async move {
                let range = resolve_commit_range(
                    self.forge.as_ref(),
                    self.cluster.as_ref(),
                    &self.config,
                    &query,
                )
                .await?;

                self.get_notes_for_repo_with_commits(&query.repo, &range)
                    .await
            })
            .await
    }

    pub async fn get_notes_for_repo_with_commits(
        &self,
        repo: &str,
        range: &CommitRange,
    ) -> Result<ReleaseNotesResult> {
        info!("{repo}: generating notes for {}..{}", range.previous, range.current);

        let prs = get_commits_between(
            self.forge.as_ref(),
            repo,
            &range.current,
            &range.previous,
        )
        .await?;

        let tickets = join_all(
            ticket_requests(&prs)
                .into_iter()
                .map(|request| query_ticket_info(self.tracker.as_ref(), request)),
        )
        .await;

        Ok(ReleaseNotesResult::new(repo, range, tickets))
    }
}

#[async_trait]
impl NotesService for NotesGenerator {
    async fn query_for_release_notes(
        &self,
        repos: Vec<String>,
        current_commit: Option<String>,
        previous_commit: Option<String>,
        staged: bool,
    ) -> Vec<RepoNotes> {
        let queries = repos.into_iter().map(|repo| NotesQuery {
            repo,
            current_commit: current_commit.clone(),
            previous_commit: previous_commit.clone(),
            staged,
        });

        join_all(queries.map(|query| async move {
            let repo = query.repo.clone();
            match self.get_notes_for_repo(query).await {
                Ok(notes) => RepoNotes::Notes(notes),
                Err(err) => {
                    error!("{repo}: failed to generate release notes: {err}");
                    RepoNotes::Failed {
                        repo,
                        error: err.to_string(),
                    }
                }
            }
        }))
        .await
    }

    async fn clear_cache(&self) {
        self.cache.clear().await;
    }
}
