//! Implements the IssueTracker trait for Jira
use async_trait::async_trait;
use log::*;
use reqwest::{
    Client, Url,
    header::{ACCEPT, HeaderMap, HeaderValue},
};
use secrecy::ExposeSecret;

use crate::{
    error::{ReleaseNotesError, Result},
    tracker::{
        config::JiraConfig,
        traits::IssueTracker,
        types::{JiraIssue, Ticket, TicketLookup},
    },
};

/// Jira cloud client using the v3 REST API with basic authentication.
pub struct Jira {
    config: JiraConfig,
    client: Client,
}

impl Jira {
    pub fn new(config: JiraConfig) -> Result<Self> {
        if config.base_url.cannot_be_a_base() {
            return Err(ReleaseNotesError::invalid_config(format!(
                "jira base url is not a valid base: {}",
                config.base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.append(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { config, client })
    }

    /// Issue endpoint for a ticket id. The id is pushed as a single path
    /// segment so stray characters from PR titles are escaped.
    fn issue_url(&self, ticket_id: &str) -> Option<Url> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .extend(["rest", "api", "3", "issue", ticket_id]);
        Some(url)
    }
}

#[async_trait]
impl IssueTracker for Jira {
    async fn get_ticket(&self, ticket_id: &str) -> TicketLookup {
        let ticket_id = ticket_id.trim().to_uppercase();

        if ticket_id.is_empty() {
            debug!("skipping lookup for empty ticket id");
            return TicketLookup::NotFound;
        }

        let Some(url) = self.issue_url(&ticket_id) else {
            warn!("could not build issue url for ticket: {ticket_id}");
            return TicketLookup::NotFound;
        };

        debug!("looking up ticket {ticket_id}");

        let response = self
            .client
            .get(url)
            .basic_auth(&self.config.user, Some(self.config.token.expose_secret()))
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(err) => {
                warn!("ticket lookup for {ticket_id} failed: {err}");
                return TicketLookup::NotFound;
            }
        };

        let status = response.status();

        if !status.is_success() {
            info!("ticket {ticket_id} not found: status {status}");
            return TicketLookup::NotFound;
        }

        match response.json::<JiraIssue>().await {
            Ok(issue) => TicketLookup::Found(Ticket::from(issue)),
            Err(err) => {
                warn!("could not read ticket {ticket_id}: {err}");
                TicketLookup::NotFound
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Json, Router,
        extract::Path,
        http::{HeaderMap, StatusCode},
        routing::get,
    };
    use secrecy::SecretString;
    use std::time::Duration;

    use super::*;
    use crate::test_helpers::spawn_test_server;

    async fn fake_issue(
        Path(id): Path<String>,
        headers: HeaderMap,
    ) -> (StatusCode, Json<serde_json::Value>) {
        if !headers.contains_key("authorization") {
            return (StatusCode::UNAUTHORIZED, Json(serde_json::json!({})));
        }

        match id.as_str() {
            "PLAT-337" => (
                StatusCode::OK,
                Json(serde_json::json!({
                    "key": "PLAT-337",
                    "fields": {
                        "summary": "Bugsnag logging configuration fails",
                        "assignee": null
                    }
                })),
            ),
            "ST-532" => (
                StatusCode::OK,
                Json(serde_json::json!({
                    "fields": {
                        "summary": "[UI] Add ability to delete travel credit",
                        "assignee": { "displayName": "CJ Douglas" }
                    }
                })),
            ),
            "BROKEN-1" => {
                (StatusCode::OK, Json(serde_json::json!({ "unexpected": true })))
            }
            _ => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({
                    "errorMessages": ["Issue does not exist or you do not have permission to see it."]
                })),
            ),
        }
    }

    async fn create_jira() -> Jira {
        let app = Router::new()
            .route("/rest/api/3/issue/{id}", get(fake_issue));
        let base_url = spawn_test_server(app).await;

        Jira::new(JiraConfig {
            base_url: Url::parse(&base_url).unwrap(),
            user: "bot@example.com".into(),
            token: SecretString::from("token".to_string()),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test_log::test(tokio::test)]
    async fn finds_ticket_and_defaults_assignee() {
        let jira = create_jira().await;

        let lookup = jira.get_ticket("PLAT-337").await;

        assert_eq!(
            lookup,
            TicketLookup::Found(Ticket {
                title: "Bugsnag logging configuration fails".into(),
                assignee: "unassigned".into(),
            })
        );
    }

    #[test_log::test(tokio::test)]
    async fn upper_cases_ticket_id() {
        let jira = create_jira().await;

        let lookup = jira.get_ticket("st-532").await;

        assert_eq!(
            lookup,
            TicketLookup::Found(Ticket {
                title: "[UI] Add ability to delete travel credit".into(),
                assignee: "CJ Douglas".into(),
            })
        );
    }

    #[test_log::test(tokio::test)]
    async fn missing_ticket_is_not_found() {
        let jira = create_jira().await;
        assert_eq!(jira.get_ticket("NOTIK-1234").await, TicketLookup::NotFound);
    }

    #[test_log::test(tokio::test)]
    async fn unreadable_payload_is_not_found() {
        let jira = create_jira().await;
        assert_eq!(jira.get_ticket("BROKEN-1").await, TicketLookup::NotFound);
    }

    #[test_log::test(tokio::test)]
    async fn empty_ticket_id_is_not_found() {
        let jira = create_jira().await;
        assert_eq!(jira.get_ticket("  ").await, TicketLookup::NotFound);
    }

    #[test_log::test(tokio::test)]
    async fn unreachable_tracker_is_not_found() {
        let jira = Jira::new(JiraConfig {
            // nothing listens on the discard port
            base_url: Url::parse("http://127.0.0.1:9").unwrap(),
            user: "bot@example.com".into(),
            token: SecretString::from("token".to_string()),
            timeout: Duration::from_millis(500),
        })
        .unwrap();

        assert_eq!(jira.get_ticket("PLAT-337").await, TicketLookup::NotFound);
    }

    #[test]
    fn escapes_ticket_ids_in_url() {
        let jira = Jira::new(JiraConfig {
            base_url: Url::parse("https://lola.atlassian.net").unwrap(),
            user: "bot@example.com".into(),
            token: SecretString::from("token".to_string()),
            timeout: Duration::from_secs(1),
        })
        .unwrap();

        let url = jira.issue_url("WHAT?#1").unwrap();
        assert_eq!(
            url.as_str(),
            "https://lola.atlassian.net/rest/api/3/issue/WHAT%3F%231"
        );
    }
}
