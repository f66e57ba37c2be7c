//! Plain text rendering of release notes.
use crate::notes::types::{PrTicketDescription, ReleaseNotesResult, RepoNotes};

pub const SEPARATOR: &str = "--------------------";

/// Render notes for every repository, joined by newlines.
///
/// `staged` switches the wording from "were released" to
/// "will be released".
pub fn format_release_notes(notes: &[RepoNotes], staged: bool) -> String {
    notes
        .iter()
        .map(|notes| match notes {
            RepoNotes::Notes(result) => format_repo_notes(result, staged),
            RepoNotes::Failed { repo, error } => format_failed_repo(repo, error),
        })
        .collect::<Vec<String>>()
        .join("\n")
}

fn has_ticket(pr: &PrTicketDescription) -> bool {
    pr.jira_title.as_deref().is_some_and(|title| !title.is_empty())
}

fn format_repo_notes(notes: &ReleaseNotesResult, staged: bool) -> String {
    let tense = if staged { "will be" } else { "were" };

    let (mut valid, mut invalid): (Vec<&PrTicketDescription>, Vec<_>) =
        notes.prs.iter().partition(|pr| has_ticket(pr));

    valid.sort_by_cached_key(|pr| {
        format!(
            "{} {}",
            pr.jira_id.as_deref().unwrap_or_default(),
            pr.jira_title.as_deref().unwrap_or_default()
        )
    });
    invalid.sort_by(|a, b| a.pr_title.cmp(&b.pr_title));

    let mut lines = vec![
        notes.repo.clone(),
        format!("Commits {}..{}", notes.from_commit, notes.to_commit),
        SEPARATOR.to_string(),
        format!("The following tickets {tense} released"),
        SEPARATOR.to_string(),
    ];

    for pr in valid {
        lines.push(format!(
            "{} {}",
            pr.jira_id.as_deref().unwrap_or_default(),
            pr.jira_title.as_deref().unwrap_or_default()
        ));
        lines.push(format!(
            "\tAssigned to: {}",
            pr.jira_assignee.as_deref().unwrap_or_default()
        ));
        lines.push(format!("\tPr #{} by: {}", pr.pr_number, pr.pr_author));
    }

    lines.push(SEPARATOR.to_string());

    if !invalid.is_empty() {
        lines.push(format!(
            "The following PRs {tense} released as well but did not have valid ticket info"
        ));
        lines.push(SEPARATOR.to_string());

        for pr in invalid {
            lines.push(pr.pr_title.clone());
            lines.push(format!("\tPr #{} by: {}", pr.pr_number, pr.pr_author));
        }
    }

    lines.push(SEPARATOR.to_string());

    lines.join("\n")
}

fn format_failed_repo(repo: &str, error: &str) -> String {
    [
        repo.to_string(),
        SEPARATOR.to_string(),
        format!("Failed to generate release notes: {error}"),
        SEPARATOR.to_string(),
    ]
    .join("\n")
}
