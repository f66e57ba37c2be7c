use serde::{Deserialize, Serialize};

/// Title rendered for tickets the tracker could not return.
pub const FAILED_TICKET_TITLE: &str = "Failed";
/// Assignee rendered for tickets the tracker could not return.
pub const FAILED_TICKET_ASSIGNEE: &str = "n/a";

/// Arguments of a single repository query. Also the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotesQuery {
    pub repo: String,
    pub current_commit: Option<String>,
    pub previous_commit: Option<String>,
    pub staged: bool,
}

/// Resolved range of commits to generate notes for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRange {
    /// Newer end of the range
    pub current: String,
    /// Older end of the range
    pub previous: String,
}

/// One ticket lookup. Two pull requests naming the same ticket are two
/// requests.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TicketRequest {
    pub pr_title: String,
    pub ticket_id: String,
    pub pr_author: String,
    pub pr_id: String,
}

/// Issue tracker record matched to a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketInfo {
    pub id: String,
    pub title: String,
    pub assignee: String,
    pub pr_title: String,
    pub pr_author: String,
    pub pr_id: String,
}

/// Outcome of looking up the ticket of one pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketResult {
    Valid(TicketInfo),
    NotFound(TicketRequest),
}

impl TicketResult {
    /// Ticket info for display, using the "Failed" placeholder for tickets
    /// that were not found.
    pub fn ticket_info(&self) -> TicketInfo {
        match self {
            TicketResult::Valid(info) => info.clone(),
            TicketResult::NotFound(request) => TicketInfo {
                id: request.ticket_id.clone(),
                title: FAILED_TICKET_TITLE.into(),
                assignee: FAILED_TICKET_ASSIGNEE.into(),
                pr_title: request.pr_title.clone(),
                pr_author: request.pr_author.clone(),
                pr_id: request.pr_id.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrTicketDescription {
    pub pr_title: String,
    pub pr_number: String,
    pub pr_author: String,
    pub jira_id: Option<String>,
    pub jira_title: Option<String>,
    pub jira_assignee: Option<String>,
}

impl From<TicketResult> for PrTicketDescription {
    fn from(result: TicketResult) -> Self {
        match result {
            TicketResult::Valid(info) => Self {
                pr_title: info.pr_title,
                pr_number: info.pr_id,
                pr_author: info.pr_author,
                jira_id: Some(info.id),
                jira_title: Some(info.title),
                jira_assignee: Some(info.assignee),
            },
            TicketResult::NotFound(request) => Self {
                pr_title: request.pr_title,
                pr_number: request.pr_id,
                pr_author: request.pr_author,
                jira_id: None,
                jira_title: None,
                jira_assignee: None,
            },
        }
    }
}

/// Release notes for one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseNotesResult {
    pub repo: String,
    pub from_commit: String,
    pub to_commit: String,
    pub prs: Vec<PrTicketDescription>,
}

impl ReleaseNotesResult {
    /// Join ticket results into notes, ordered by pull request number.
    pub fn new(
        repo: &str,
        range: &CommitRange,
        tickets: Vec<TicketResult>,
    ) -> Self {
        let mut prs: Vec<PrTicketDescription> =
            tickets.into_iter().map(PrTicketDescription::from).collect();

        prs.sort_by(|a, b| a.pr_number.cmp(&b.pr_number));

        Self {
            repo: repo.to_string(),
            from_commit: range.previous.clone(),
            to_commit: range.current.clone(),
            prs,
        }
    }
}

/// Per-repository outcome of a multi-repository query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RepoNotes {
    Notes(ReleaseNotesResult),
    Failed { repo: String, error: String },
}

impl RepoNotes {
    pub fn repo(&self) -> &str {
        match self {
            RepoNotes::Notes(notes) => &notes.repo,
            RepoNotes::Failed { repo, .. } => repo,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RepoNotes::Failed { .. })
    }
}
