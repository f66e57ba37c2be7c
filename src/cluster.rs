//! Container orchestrator access used to infer deployed commits.
//!
//! Only replica set listing is needed: each replica set carries the image
//! tag it runs, and image tags embed the commit they were built from.

/// Connection discovery from in-cluster service accounts or kubeconfig.
pub mod kubeconfig;

/// Kubernetes REST client implementation.
pub mod kubernetes;

/// Common trait for cluster abstraction.
pub mod traits;

/// Workload types returned from the cluster.
pub mod types;
