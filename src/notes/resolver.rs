//! Commit range resolution.
use log::*;

use crate::{
    cluster::traits::Cluster,
    config::{Config, WorkloadConfig},
    error::{ReleaseNotesError, Result},
    forge::traits::Forge,
    notes::types::{CommitRange, NotesQuery},
};

/// Commit embedded in a docker image reference.
///
/// Accepts `name:<commit>`, `name:<prefix>-<commit>` and
/// `name:<prefix>.<commit>`. The tag is whatever follows the last `:` so
/// registry ports do not confuse it.
pub fn extract_commit_from_docker_tag(image: &str) -> Result<String> {
    let (_, mut tag) = image.rsplit_once(':').ok_or_else(|| {
        ReleaseNotesError::resolution(format!("image has no tag: {image}"))
    })?;

    if let Some(segment) = tag.split('-').nth(1) {
        tag = segment;
    }

    if let Some(segment) = tag.split('.').nth(1) {
        tag = segment;
    }

    Ok(tag.to_string())
}

/// The two most recently deployed distinct commits of a workload, newest
/// first.
pub async fn get_current_and_previous_commit(
    cluster: &dyn Cluster,
    namespace: &str,
    workload: &WorkloadConfig,
) -> Result<CommitRange> {
    let mut workloads = cluster.list_workloads(namespace, &workload.app).await?;

    workloads.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut commits: Vec<String> = Vec::with_capacity(2);

    for item in workloads
        .iter()
        .filter(|item| item.name.starts_with(&workload.pod))
    {
        let Some(image) = item.image.as_deref() else {
            warn!("replica set {} has no container image", item.name);
            continue;
        };

        let commit = match extract_commit_from_docker_tag(image) {
            Ok(commit) => commit,
            Err(err) => {
                warn!("skipping replica set {}: {err}", item.name);
                continue;
            }
        };

        if !commits.contains(&commit) {
            commits.push(commit);
        }

        if let [current, previous] = commits.as_slice() {
            info!("{} is running {current}, previously {previous}", workload.pod);
            return Ok(CommitRange {
                current: current.clone(),
                previous: previous.clone(),
            });
        }
    }

    Err(ReleaseNotesError::resolution(format!(
        "could not find two deployed commits for {} (app={}) in namespace {namespace}: \
         verify your kubernetes context is set correctly",
        workload.pod, workload.app
    )))
}

/// Resolve the commit range for a query.
///
/// Explicit commits win field by field; the cluster is only consulted when
/// one of them is missing. For staged queries the deployed commit becomes
/// the previous commit and the repository head becomes the current one.
pub async fn resolve_commit_range(
    forge: &dyn Forge,
    cluster: &dyn Cluster,
    config: &Config,
    query: &NotesQuery,
) -> Result<CommitRange> {
    let mut range = match (&query.current_commit, &query.previous_commit) {
        (Some(current), Some(previous)) => CommitRange {
            current: current.clone(),
            previous: previous.clone(),
        },
        (current, previous) => {
            let workload = config.workload_for(&query.repo);
            let deployed = get_current_and_previous_commit(
                cluster,
                &config.namespace,
                &workload,
            )
            .await?;

            CommitRange {
                current: current.clone().unwrap_or(deployed.current),
                previous: previous.clone().unwrap_or(deployed.previous),
            }
        }
    };

    if query.staged {
        range.previous = range.current;
        range.current = forge.get_head_commit(&query.repo).await?;
    }

    debug!(
        "{}: resolved range {}..{}",
        query.repo, range.previous, range.current
    );

    Ok(range)
}
