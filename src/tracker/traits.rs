//! Traits related to issue trackers
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::tracker::types::TicketLookup;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Look up a ticket by id. Failures of any kind are `NotFound`.
    async fn get_ticket(&self, ticket_id: &str) -> TicketLookup;
}
