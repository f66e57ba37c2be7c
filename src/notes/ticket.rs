//! Ticket id extraction and lookup.
use log::*;
use std::collections::BTreeSet;

use crate::{
    forge::request::PullRequestInfo,
    notes::types::{TicketInfo, TicketRequest, TicketResult},
    tracker::{traits::IssueTracker, types::TicketLookup},
};

/// Derive a ticket id from a pull request title.
///
/// Titles are expected to start with the ticket id, optionally bracketed or
/// followed by a colon (`[HOT-68] ...`, `TVM-554: ...`, `PLAT-337 ...`).
/// Only the first id is used. Nothing checks that the result looks like a
/// ticket id; a title without one yields whatever its first word is, and the
/// lookup for it simply fails.
pub fn extract_ticket_id(pr_title: &str) -> String {
    pr_title
        .replace(['[', ']', ':'], " ")
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Unique ticket lookups for a set of pull requests.
pub fn ticket_requests(prs: &[PullRequestInfo]) -> BTreeSet<TicketRequest> {
    prs.iter()
        .map(|pr| TicketRequest {
            pr_title: pr.title.clone(),
            ticket_id: extract_ticket_id(&pr.title),
            pr_author: pr.author.clone(),
            pr_id: pr.id.clone(),
        })
        .collect()
}

/// Look up the ticket for one pull request. Never fails: tickets the tracker
/// cannot return become [`TicketResult::NotFound`]. Empty ids are never sent
/// to the tracker.
pub async fn query_ticket_info(
    tracker: &dyn IssueTracker,
    request: TicketRequest,
) -> TicketResult {
    let lookup = if request.ticket_id.trim().is_empty() {
        TicketLookup::NotFound
    } else {
        tracker.get_ticket(&request.ticket_id).await
    };

    match lookup {
        TicketLookup::Found(ticket) => TicketResult::Valid(TicketInfo {
            id: request.ticket_id,
            title: ticket.title,
            assignee: ticket.assignee,
            pr_title: request.pr_title,
            pr_author: request.pr_author,
            pr_id: request.pr_id,
        }),
        TicketLookup::NotFound => {
            let result = TicketResult::NotFound(request);
            let info = result.ticket_info();
            info!(
                "no ticket info for PR #{} ({}): {} {}",
                info.pr_id, info.pr_title, info.id, info.title
            );
            result
        }
    }
}
