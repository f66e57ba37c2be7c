//! Common test helper functions shared across test modules.
//!
//! Provides the reference release notes fixture and a throwaway HTTP server
//! for exercising the real API clients.
use axum::Router;
use tokio::net::TcpListener;

use crate::notes::types::{PrTicketDescription, ReleaseNotesResult};

/// Serves `app` on an ephemeral local port and returns its base URL
/// (`http://127.0.0.1:<port>`). The server lives until the test runtime
/// shuts down.
pub async fn spawn_test_server(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

fn pr(
    pr_title: &str,
    pr_number: &str,
    pr_author: &str,
    ticket: Option<(&str, &str, &str)>,
) -> PrTicketDescription {
    PrTicketDescription {
        pr_title: pr_title.into(),
        pr_number: pr_number.into(),
        pr_author: pr_author.into(),
        jira_id: ticket.map(|(id, _, _)| id.into()),
        jira_title: ticket.map(|(_, title, _)| title.into()),
        jira_assignee: ticket.map(|(_, _, assignee)| assignee.into()),
    }
}

/// Notes for six `lola-desktop` pull requests, four of which have tickets.
pub fn desktop_notes_example() -> ReleaseNotesResult {
    ReleaseNotesResult {
        repo: "lola-desktop".into(),
        from_commit: "2919e85".into(),
        to_commit: "2f65240".into(),
        prs: vec![
            pr(
                "[HOT-68] Add mixpanel tracking for hotel search rank and sort type for book hotel event",
                "3138",
                "nbond211",
                Some((
                    "HOT-68",
                    "Track - What's the hotel rank of hotels booked by each sort? (w/o filters used)",
                    "Nick Bond",
                )),
            ),
            pr("TMV-653 update multiselect bug fixes", "3160", "jwaters627", None),
            pr(
                "NOTIX-1 Document and make it easier to run production build locally",
                "3163",
                "emroussel",
                None,
            ),
            pr(
                "TVM-554: Remove CSV Update flag",
                "3165",
                "ramselgonzalez",
                Some((
                    "TVM-554",
                    "Remove feature flag/code clean up",
                    "Ramsel Gonzalez",
                )),
            ),
            pr(
                "[HOT-238] Change order of items in negotiated rates tooltip",
                "3166",
                "nbond211",
                Some((
                    "HOT-238",
                    "Negotiated Rates: Tooltip - swap item 2 with item 3.",
                    "Nick Bond",
                )),
            ),
            pr(
                "ST-532 Adding Delete Credit Modal",
                "3167",
                "chaz9127",
                Some((
                    "ST-532",
                    "[UI] Add ability to delete travel credit",
                    "CJ Douglas",
                )),
            ),
        ],
    }
}
