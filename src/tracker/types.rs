use serde::Deserialize;

/// Assignee shown for tickets nobody is assigned to.
pub const UNASSIGNED: &str = "unassigned";

/// Issue tracker record for one ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub title: String,
    pub assignee: String,
}

/// Outcome of a ticket lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketLookup {
    Found(Ticket),
    /// The tracker did not return the ticket: unknown id, HTTP error,
    /// timeout or unreadable payload.
    NotFound,
}

#[derive(Debug, Deserialize)]
pub struct JiraUser {
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JiraFields {
    pub summary: String,
    pub assignee: Option<JiraUser>,
}

/// Body of `GET /rest/api/3/issue/{id}`, reduced to the fields we render.
#[derive(Debug, Deserialize)]
pub struct JiraIssue {
    pub fields: JiraFields,
}

impl From<JiraIssue> for Ticket {
    fn from(issue: JiraIssue) -> Self {
        let assignee = issue
            .fields
            .assignee
            .and_then(|user| user.display_name)
            .unwrap_or_else(|| UNASSIGNED.to_string());

        Self {
            title: issue.fields.summary,
            assignee,
        }
    }
}
