//! Source control access for release notes.
//!
//! Provides the commit comparison and pull request lookups needed to map a
//! commit range onto the pull requests merged within it.

/// Connection settings and credentials for the forge.
pub mod config;

/// GitHub API client implementation.
pub mod github;

/// Request and response types shared by forge implementations.
pub mod request;

/// Common trait for forge abstraction.
pub mod traits;
