//! Kubernetes API connection discovery.
//!
//! Tries the in-cluster service account first, then the user's kubeconfig
//! (`$KUBECONFIG` or `~/.kube/config`). Only bearer token authentication is
//! supported.
use base64::{Engine, prelude::BASE64_STANDARD};
use log::*;
use secrecy::SecretString;
use serde::Deserialize;
use std::{
    env,
    path::{Path, PathBuf},
};
use url::Url;

use crate::error::{ReleaseNotesError, Result};

pub const KUBECONFIG_ENV_VAR: &str = "KUBECONFIG";
pub const SERVICE_HOST_ENV_VAR: &str = "KUBERNETES_SERVICE_HOST";
pub const SERVICE_PORT_ENV_VAR: &str = "KUBERNETES_SERVICE_PORT";
pub const SERVICE_ACCOUNT_DIR: &str =
    "/var/run/secrets/kubernetes.io/serviceaccount";

#[derive(Debug, Deserialize)]
struct ContextSpec {
    cluster: String,
    user: String,
}

#[derive(Debug, Deserialize)]
struct NamedContext {
    name: String,
    context: ContextSpec,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
struct ClusterSpec {
    server: String,
    certificate_authority_data: Option<String>,
    certificate_authority: Option<PathBuf>,
    insecure_skip_tls_verify: bool,
}

#[derive(Debug, Deserialize)]
struct NamedCluster {
    name: String,
    cluster: ClusterSpec,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
struct UserSpec {
    token: Option<String>,
    token_file: Option<PathBuf>,
    client_certificate: Option<PathBuf>,
    client_certificate_data: Option<String>,
    exec: Option<serde_yaml::Value>,
    auth_provider: Option<serde_yaml::Value>,
}

#[derive(Debug, Deserialize)]
struct NamedUser {
    name: String,
    #[serde(default)]
    user: UserSpec,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct Kubeconfig {
    current_context: Option<String>,
    #[serde(default)]
    contexts: Vec<NamedContext>,
    #[serde(default)]
    clusters: Vec<NamedCluster>,
    #[serde(default)]
    users: Vec<NamedUser>,
}

/// Everything needed to talk to one Kubernetes API server.
#[derive(Debug, Clone)]
pub struct ClusterConnection {
    pub server: Url,
    pub token: Option<SecretString>,
    /// PEM encoded certificate authority bundle.
    pub ca_pem: Option<Vec<u8>>,
    pub insecure: bool,
}

impl ClusterConnection {
    /// Discover a connection from the current environment.
    pub fn discover() -> Result<Self> {
        let service = env::var(SERVICE_HOST_ENV_VAR)
            .ok()
            .zip(env::var(SERVICE_PORT_ENV_VAR).ok());

        Self::discover_from(
            service,
            Path::new(SERVICE_ACCOUNT_DIR),
            default_kubeconfig_path(),
        )
    }

    fn discover_from(
        service: Option<(String, String)>,
        service_account_dir: &Path,
        kubeconfig: Option<PathBuf>,
    ) -> Result<Self> {
        if let Some((host, port)) = service
            && let Some(connection) =
                Self::in_cluster(&host, &port, service_account_dir)?
        {
            info!("using in-cluster service account");
            return Ok(connection);
        }

        let path = kubeconfig.ok_or_else(|| {
            ReleaseNotesError::invalid_config(
                "no kubeconfig found: set KUBECONFIG or run inside the cluster",
            )
        })?;

        info!("using kubeconfig: {}", path.display());
        Self::from_kubeconfig_file(&path)
    }

    /// Service account connection for a pod whose API server is at
    /// `host:port`. `None` when the account files are not mounted.
    pub fn in_cluster(
        host: &str,
        port: &str,
        service_account_dir: &Path,
    ) -> Result<Option<Self>> {
        let token_path = service_account_dir.join("token");
        let ca_path = service_account_dir.join("ca.crt");

        if !token_path.is_file() || !ca_path.is_file() {
            debug!(
                "service account not mounted at {}: falling back to kubeconfig",
                service_account_dir.display()
            );
            return Ok(None);
        }

        let token = std::fs::read_to_string(token_path)?;
        let ca_pem = std::fs::read(ca_path)?;

        let host = if host.contains(':') {
            format!("[{host}]")
        } else {
            host.to_string()
        };

        Ok(Some(Self {
            server: Url::parse(&format!("https://{host}:{port}"))?,
            token: Some(SecretString::from(token.trim().to_string())),
            ca_pem: Some(ca_pem),
            insecure: false,
        }))
    }

    pub fn from_kubeconfig_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_kubeconfig(&content, base_dir)
    }

    /// Build a connection from kubeconfig content using its current
    /// context. Relative file references resolve against `base_dir`.
    pub fn from_kubeconfig(content: &str, base_dir: &Path) -> Result<Self> {
        let kubeconfig: Kubeconfig = serde_yaml::from_str(content)?;

        let context_name = kubeconfig.current_context.ok_or_else(|| {
            ReleaseNotesError::invalid_config("kubeconfig has no current-context")
        })?;

        let context = kubeconfig
            .contexts
            .into_iter()
            .find(|c| c.name == context_name)
            .ok_or_else(|| {
                ReleaseNotesError::invalid_config(format!(
                    "kubeconfig context not found: {context_name}"
                ))
            })?
            .context;

        let cluster = kubeconfig
            .clusters
            .into_iter()
            .find(|c| c.name == context.cluster)
            .ok_or_else(|| {
                ReleaseNotesError::invalid_config(format!(
                    "kubeconfig cluster not found: {}",
                    context.cluster
                ))
            })?
            .cluster;

        let user = kubeconfig
            .users
            .into_iter()
            .find(|u| u.name == context.user)
            .map(|u| u.user)
            .unwrap_or_default();

        debug!("kubeconfig context {context_name} -> {}", cluster.server);

        let ca_pem = match (
            cluster.certificate_authority_data,
            cluster.certificate_authority,
        ) {
            (Some(data), _) => Some(BASE64_STANDARD.decode(data.trim())?),
            (None, Some(path)) => Some(std::fs::read(base_dir.join(path))?),
            (None, None) => None,
        };

        Ok(Self {
            server: Url::parse(&cluster.server)?,
            token: user_token(user, base_dir)?,
            ca_pem,
            insecure: cluster.insecure_skip_tls_verify,
        })
    }
}

fn user_token(user: UserSpec, base_dir: &Path) -> Result<Option<SecretString>> {
    if let Some(token) = user.token {
        return Ok(Some(SecretString::from(token)));
    }

    if let Some(path) = user.token_file {
        let token = std::fs::read_to_string(base_dir.join(path))?;
        return Ok(Some(SecretString::from(token.trim().to_string())));
    }

    if user.client_certificate.is_some()
        || user.client_certificate_data.is_some()
        || user.exec.is_some()
        || user.auth_provider.is_some()
    {
        return Err(ReleaseNotesError::invalid_config(
            "unsupported kubeconfig authentication: only token and token-file are supported",
        ));
    }

    Ok(None)
}

fn default_kubeconfig_path() -> Option<PathBuf> {
    if let Ok(value) = env::var(KUBECONFIG_ENV_VAR)
        && let Some(first) = env::split_paths(&value).next()
        && !first.as_os_str().is_empty()
    {
        return Some(first);
    }

    let path = dirs::home_dir()?.join(".kube").join("config");
    path.exists().then_some(path)
}
