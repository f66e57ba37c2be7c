//! Traits related to container orchestrators
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{cluster::types::Workload, error::Result};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Cluster: Send + Sync {
    /// Replica sets in `namespace` labelled `app=<app>`, in no particular
    /// order.
    async fn list_workloads(
        &self,
        namespace: &str,
        app: &str,
    ) -> Result<Vec<Workload>>;
}
