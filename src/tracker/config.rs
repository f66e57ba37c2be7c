//! Configuration for Jira connections.
use secrecy::SecretString;
use std::{env, time::Duration};
use url::Url;

use crate::{
    config::Config,
    error::{ReleaseNotesError, Result},
};

/// Environment variable holding the Jira account email.
pub const JIRA_USER_ENV_VAR: &str = "JIRA_API_USER_EMAIL";
/// Environment variable holding the Jira API token.
pub const JIRA_TOKEN_ENV_VAR: &str = "JIRA_API_TOKEN";

#[derive(Debug, Clone)]
pub struct JiraConfig {
    /// Base URL of the Jira instance.
    pub base_url: Url,
    /// Account email used for basic authentication.
    pub user: String,
    /// API token used for basic authentication.
    pub token: SecretString,
    /// Timeout applied to each lookup.
    pub timeout: Duration,
}

impl JiraConfig {
    pub fn from_env(config: &Config) -> Result<Self> {
        let user = env::var(JIRA_USER_ENV_VAR).unwrap_or_default();
        let token = env::var(JIRA_TOKEN_ENV_VAR).unwrap_or_default();

        if user.is_empty() || token.is_empty() {
            return Err(ReleaseNotesError::invalid_config(format!(
                "must set {JIRA_USER_ENV_VAR} and {JIRA_TOKEN_ENV_VAR}"
            )));
        }

        Ok(Self {
            base_url: Url::parse(&config.jira_base_url)?,
            user,
            token: SecretString::from(token),
            timeout: config.request_timeout(),
        })
    }
}
