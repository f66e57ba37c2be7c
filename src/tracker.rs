//! Issue tracker access for release notes.
//!
//! Lookups never fail the release notes request: anything other than a
//! successful response is reported as [`types::TicketLookup::NotFound`].

/// Connection settings and credentials for Jira.
pub mod config;

/// Jira REST client implementation.
pub mod jira;

/// Common trait for issue tracker abstraction.
pub mod traits;

/// Ticket types returned from lookups.
pub mod types;
