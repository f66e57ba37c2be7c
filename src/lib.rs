pub mod cli;
pub mod cluster;
pub mod config;
pub mod error;
pub mod forge;
pub mod logging;
pub mod notes;
pub mod server;
pub mod tracker;

pub use error::{ReleaseNotesError, Result};

#[cfg(test)]
pub mod test_helpers;
