//! Implements the Cluster trait for Kubernetes
use async_trait::async_trait;
use log::*;
use reqwest::{Certificate, Client};
use secrecy::ExposeSecret;
use std::time::Duration;
use tokio::sync::OnceCell;

use crate::{
    cluster::{
        kubeconfig::ClusterConnection,
        traits::Cluster,
        types::{ReplicaSetList, Workload},
    },
    error::{ReleaseNotesError, Result},
};

struct ApiClient {
    connection: ClusterConnection,
    client: Client,
}

impl ApiClient {
    fn new(connection: ClusterConnection, timeout: Duration) -> Result<Self> {
        let mut builder = reqwest::Client::builder().timeout(timeout);

        if let Some(pem) = connection.ca_pem.as_deref() {
            let certificate = Certificate::from_pem(pem).map_err(|err| {
                ReleaseNotesError::invalid_config(format!(
                    "invalid cluster certificate authority: {err}"
                ))
            })?;
            builder = builder.add_root_certificate(certificate);
        }

        if connection.insecure {
            warn!("skipping tls verification for {}", connection.server);
            builder = builder.danger_accept_invalid_certs(true);
        }

        Ok(Self {
            connection,
            client: builder.build()?,
        })
    }
}

/// Kubernetes API client. The connection is discovered on first use so
/// that commands given explicit commits never need cluster access.
pub struct Kubernetes {
    timeout: Duration,
    api: OnceCell<ApiClient>,
}

impl Kubernetes {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            api: OnceCell::new(),
        }
    }

    /// Client bound to a known connection, skipping discovery.
    pub fn with_connection(
        connection: ClusterConnection,
        timeout: Duration,
    ) -> Result<Self> {
        let api = ApiClient::new(connection, timeout)?;
        Ok(Self {
            timeout,
            api: OnceCell::new_with(Some(api)),
        })
    }

    async fn api(&self) -> Result<&ApiClient> {
        self.api
            .get_or_try_init(|| async {
                ApiClient::new(ClusterConnection::discover()?, self.timeout)
            })
            .await
    }
}

#[async_trait]
impl Cluster for Kubernetes {
    async fn list_workloads(
        &self,
        namespace: &str,
        app: &str,
    ) -> Result<Vec<Workload>> {
        let api = self.api().await?;

        let mut url = api.connection.server.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ReleaseNotesError::invalid_config(format!(
                    "invalid cluster server url: {}",
                    api.connection.server
                ))
            })?
            .pop_if_empty()
            .extend(["apis", "apps", "v1", "namespaces", namespace, "replicasets"]);
        url.query_pairs_mut()
            .append_pair("labelSelector", &format!("app={app}"));

        debug!("listing replica sets: {url}");

        let mut request = api.client.get(url);

        if let Some(token) = api.connection.token.as_ref() {
            request = request.bearer_auth(token.expose_secret());
        }

        let list: ReplicaSetList = request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        info!(
            "found {} replica sets for app={app} in {namespace}",
            list.items.len()
        );

        Ok(list.items.into_iter().map(Workload::from).collect())
    }
}
