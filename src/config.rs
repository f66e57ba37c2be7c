//! Configuration loading and parsing for `release-notes.toml` files.
//!
//! Every field has a default so the tools run without any file at all.
//! Credentials are never read from the file; see [`crate::forge::config`]
//! and [`crate::tracker::config`].
use serde::Deserialize;
use std::{collections::HashMap, path::Path, time::Duration};

use crate::error::{ReleaseNotesError, Result};

/// Environment variable naming a config file when `--config` is not given.
pub const CONFIG_ENV_VAR: &str = "RELEASE_NOTES_CONFIG";
/// GitHub organization that owns every queried repository.
pub const DEFAULT_GITHUB_OWNER: &str = "lolatravel";
/// Jira cloud instance used for ticket lookups.
pub const DEFAULT_JIRA_BASE_URL: &str = "https://lola.atlassian.net";
/// Kubernetes namespace the services are deployed to.
pub const DEFAULT_NAMESPACE: &str = "core-services";
/// Per-call timeout for every upstream request.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const LOLA_SERVER: &str = "lola-server";
pub const TRAVEL_SERVICE: &str = "lola-travel-service";
pub const LOLA_DESKTOP: &str = "lola-desktop";

/// Repositories queried when none are named on the command line.
pub const DEFAULT_REPOS: [&str; 3] = [LOLA_SERVER, TRAVEL_SERVICE, LOLA_DESKTOP];

/// Names used to find a repository's deployment in the cluster.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorkloadConfig {
    /// Prefix of the replica set names that run this repository.
    pub pod: String,
    /// Value of the `app` label on those replica sets.
    pub app: String,
}

impl WorkloadConfig {
    pub fn new(pod: impl Into<String>, app: impl Into<String>) -> Self {
        Self {
            pod: pod.into(),
            app: app.into(),
        }
    }
}

/// Root configuration structure for `release-notes.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GitHub organization or user owning the repositories.
    pub github_owner: String,
    /// Base URL of the Jira instance.
    pub jira_base_url: String,
    /// Namespace searched for deployed replica sets.
    pub namespace: String,
    /// Timeout in seconds applied to each upstream call.
    pub request_timeout_secs: u64,
    /// Repository name to workload mapping. Repositories not listed use
    /// their own name for both the pod prefix and the app label.
    pub workloads: HashMap<String, WorkloadConfig>,
}

impl Default for Config {
    fn default() -> Self {
        let workloads = HashMap::from([
            (
                LOLA_SERVER.to_string(),
                WorkloadConfig::new("lola-server-web", "lola-server"),
            ),
            (
                TRAVEL_SERVICE.to_string(),
                WorkloadConfig::new("travel-service-api", "travel-service"),
            ),
        ]);

        Self {
            github_owner: DEFAULT_GITHUB_OWNER.into(),
            jira_base_url: DEFAULT_JIRA_BASE_URL.into(),
            namespace: DEFAULT_NAMESPACE.into(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            workloads,
        }
    }
}

impl Config {
    /// Load configuration from the given file, or use defaults when no path
    /// is provided.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                log::info!("loading configuration from {}", path.display());
                let content = std::fs::read_to_string(path)?;
                Self::from_toml(&content)
            }
            None => {
                log::debug!("no configuration file given: using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;

        if config.request_timeout_secs == 0 {
            return Err(ReleaseNotesError::invalid_config(
                "request_timeout_secs must be greater than zero",
            ));
        }

        Ok(config)
    }

    /// Workload names for a repository, falling back to the repository name.
    pub fn workload_for(&self, repo: &str) -> WorkloadConfig {
        self.workloads
            .get(repo)
            .cloned()
            .unwrap_or_else(|| WorkloadConfig::new(repo, repo))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
