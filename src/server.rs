//! HTTP interface to release notes generation.
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use log::*;
use serde::Deserialize;
use serde_json::{Value, json};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;

use crate::{
    error::{ReleaseNotesError, Result},
    notes::{traits::NotesService, types::RepoNotes},
};

pub const MISSING_REPOS_MESSAGE: &str =
    "Repos must be specified in a comma delimited string in query parameter 'repos'";

type SharedService = Arc<dyn NotesService>;

/// Query parameters accepted by `/released` and `/staged`.
#[derive(Debug, Default, Deserialize)]
pub struct NotesParams {
    /// Comma separated repository names
    pub repos: Option<String>,
    pub current_commit: Option<String>,
    pub previous_commit: Option<String>,
}

impl NotesParams {
    fn repos(&self) -> Result<Vec<String>> {
        let repos: Vec<String> = self
            .repos
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|repo| !repo.is_empty())
            .map(String::from)
            .collect();

        if repos.is_empty() {
            return Err(ReleaseNotesError::validation(MISSING_REPOS_MESSAGE));
        }

        Ok(repos)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl IntoResponse for ReleaseNotesError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ReleaseNotesError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub fn router(service: SharedService) -> Router {
    Router::new()
        .route("/", get(ping))
        .route("/released", get(released))
        .route("/staged", get(staged))
        .route("/clearcache", get(clear_cache))
        .with_state(service)
}

/// Serve the router on `addr` until the process is stopped.
pub async fn serve(addr: SocketAddr, service: SharedService) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;

    info!("listening on http://{addr}");

    axum::serve(listener, router(service)).await?;

    Ok(())
}

async fn ping() -> Json<Value> {
    Json(json!({ "ping": "pong" }))
}

async fn released(
    State(service): State<SharedService>,
    Query(params): Query<NotesParams>,
) -> Result<Json<Vec<RepoNotes>>> {
    query_notes(service, params, false).await
}

async fn staged(
    State(service): State<SharedService>,
    Query(params): Query<NotesParams>,
) -> Result<Json<Vec<RepoNotes>>> {
    query_notes(service, params, true).await
}

async fn clear_cache(State(service): State<SharedService>) -> Json<Value> {
    service.clear_cache().await;
    Json(json!({ "result": "cache_cleared" }))
}

async fn query_notes(
    service: SharedService,
    params: NotesParams,
    staged: bool,
) -> Result<Json<Vec<RepoNotes>>> {
    let repos = params.repos()?;

    debug!("release notes requested for {repos:?} (staged: {staged})");

    let notes = service
        .query_for_release_notes(
            repos,
            non_empty(params.current_commit),
            non_empty(params.previous_commit),
            staged,
        )
        .await;

    Ok(Json(notes))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::Request,
    };
    use tower::ServiceExt;

    use super::*;
    use crate::notes::traits::MockNotesService;

    async fn get(service: MockNotesService, uri: &str) -> (StatusCode, Value) {
        let response = router(Arc::new(service))
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, serde_json::from_slice(&body).unwrap())
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn ping_pongs() {
        let (status, body) = get(MockNotesService::new(), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ping": "pong" }));
    }

    #[tokio::test]
    async fn released_without_repos_is_bad_request() {
        let mut service = MockNotesService::new();
        service.expect_query_for_release_notes().never();

        let (status, body) = get(service, "/released").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": MISSING_REPOS_MESSAGE }));
    }

    #[tokio::test]
    async fn staged_with_empty_repos_is_bad_request() {
        let mut service = MockNotesService::new();
        service.expect_query_for_release_notes().never();

        let (status, _) = get(service, "/staged?repos=").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn released_passes_parameters_through() {
        let mut service = MockNotesService::new();
        service
            .expect_query_for_release_notes()
            .withf(|repos, current, previous, staged| {
                *repos == strings(&["a", "b"])
                    && current.as_deref() == Some("x")
                    && previous.is_none()
                    && !*staged
            })
            .times(1)
            .returning(|_, _, _, _| {
                vec![RepoNotes::Failed {
                    repo: "a".into(),
                    error: "boom".into(),
                }]
            });

        let (status, body) =
            get(service, "/released?repos=a,b&current_commit=x").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{ "repo": "a", "error": "boom" }]));
    }

    #[tokio::test]
    async fn staged_forces_staged_flag() {
        let mut service = MockNotesService::new();
        service
            .expect_query_for_release_notes()
            .withf(|repos, current, previous, staged| {
                *repos == strings(&["lola-desktop", "lola-server"])
                    && current.as_deref() == Some("a")
                    && previous.as_deref() == Some("b")
                    && *staged
            })
            .times(1)
            .returning(|_, _, _, _| vec![]);

        let (status, body) = get(
            service,
            "/staged?repos=lola-desktop,lola-server&current_commit=a&previous_commit=b",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn empty_commit_parameters_are_absent() {
        let mut service = MockNotesService::new();
        service
            .expect_query_for_release_notes()
            .withf(|repos, current, previous, staged| {
                *repos == strings(&["lola-desktop"])
                    && current.is_none()
                    && previous.is_none()
                    && !*staged
            })
            .times(1)
            .returning(|_, _, _, _| vec![]);

        let (status, _) = get(
            service,
            "/released?repos=lola-desktop&current_commit=&previous_commit=",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn clearcache_clears() {
        let mut service = MockNotesService::new();
        service.expect_clear_cache().times(1).return_const(());

        let (status, body) = get(service, "/clearcache").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "result": "cache_cleared" }));
    }
}
