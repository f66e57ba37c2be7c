//! Configuration for GitHub connections.
use secrecy::SecretString;
use std::{env, time::Duration};

use crate::{
    config::Config,
    error::{ReleaseNotesError, Result},
};

/// Default GitHub REST API base URL.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
/// Environment variable holding the GitHub access token.
pub const GITHUB_TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";
/// Environment variable overriding the GitHub API base URL.
pub const GITHUB_API_URL_ENV_VAR: &str = "GITHUB_API_URL";

/// Remote connection configuration for authenticating with GitHub.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// API base URL (e.g., "https://api.github.com").
    pub api_url: String,
    /// Repository owner shared by every queried repository.
    pub owner: String,
    /// Access token for authentication.
    pub token: SecretString,
    /// Timeout applied to each API call.
    pub timeout: Duration,
}

impl RemoteConfig {
    /// Build the remote configuration from the loaded config file and the
    /// process environment.
    pub fn from_env(config: &Config) -> Result<Self> {
        let token = env::var(GITHUB_TOKEN_ENV_VAR).unwrap_or_default();

        if token.is_empty() {
            return Err(ReleaseNotesError::invalid_config(format!(
                "must set {GITHUB_TOKEN_ENV_VAR}"
            )));
        }

        let api_url = env::var(GITHUB_API_URL_ENV_VAR)
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string());

        Ok(Self {
            api_url,
            owner: config.github_owner.clone(),
            token: SecretString::from(token),
            timeout: config.request_timeout(),
        })
    }
}
