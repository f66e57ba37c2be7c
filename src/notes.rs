//! Release notes generation.
//!
//! A request for one repository flows through:
//!
//! 1. [`resolver`]: determine the commit range, either from explicit
//!    commits or from what the cluster is running
//! 2. [`mapper`]: list the commits in the range and fetch the pull request
//!    each merge commit belongs to
//! 3. [`ticket`]: derive a ticket id from each pull request title and look
//!    it up in the issue tracker
//! 4. [`format`]: render the joined results as a text report
//!
//! [`generator::NotesGenerator`] ties the steps together, fans out across
//! repositories and memoizes results in a [`cache::NotesCache`].

/// Memoization of per-repository results.
pub mod cache;

/// Text report rendering.
pub mod format;

/// Orchestration of the full query across repositories.
pub mod generator;

/// Merge commit classification and pull request fan-out.
pub mod mapper;

/// Commit range resolution from explicit commits or cluster state.
pub mod resolver;

/// Ticket id extraction and lookup.
pub mod ticket;

/// Service interface exposed to the HTTP layer.
pub mod traits;

/// Request and result types.
pub mod types;
