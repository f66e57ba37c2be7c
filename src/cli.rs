//! CLI argument parsing for the report and server binaries.
use clap::Parser;
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};

use crate::{
    config::{CONFIG_ENV_VAR, Config, DEFAULT_REPOS},
    error::Result,
};

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Print release notes for deployed or staged changes.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(default_values = DEFAULT_REPOS)]
    /// Repositories to generate notes for.
    pub repos: Vec<String>,

    #[arg(long = "current")]
    /// Newer end of the range. Defaults to the deployed commit.
    pub current_commit: Option<String>,

    #[arg(long = "previous")]
    /// Older end of the range. Defaults to the previously deployed commit.
    pub previous_commit: Option<String>,

    #[arg(long, default_value_t = false)]
    /// Compare the deployed commit to the repository head instead.
    pub staged: bool,

    #[arg(long, env = CONFIG_ENV_VAR)]
    /// Path to a release-notes.toml file.
    pub config: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    /// Enable debug logging.
    pub debug: bool,
}

impl Args {
    pub fn load_config(&self) -> Result<Config> {
        Config::load(self.config.as_deref())
    }
}

/// Serve release notes over HTTP.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct ServerArgs {
    #[arg(long, default_value_t = DEFAULT_HOST)]
    /// Address to listen on.
    pub host: IpAddr,

    #[arg(long, default_value_t = DEFAULT_PORT)]
    /// Port to listen on.
    pub port: u16,

    #[arg(long, env = CONFIG_ENV_VAR)]
    /// Path to a release-notes.toml file.
    pub config: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    /// Enable debug logging.
    pub debug: bool,
}

impl ServerArgs {
    pub fn load_config(&self) -> Result<Config> {
        Config::load(self.config.as_deref())
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
