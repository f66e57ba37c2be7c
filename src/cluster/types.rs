use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One replica set of a deployed application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workload {
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Image of the first container in the pod template.
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Container {
    pub image: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PodSpec {
    #[serde(default)]
    pub containers: Vec<Container>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PodTemplate {
    #[serde(default)]
    pub spec: PodSpec,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReplicaSetSpec {
    #[serde(default)]
    pub template: PodTemplate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    pub name: String,
    pub creation_timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ReplicaSet {
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: ReplicaSetSpec,
}

/// Body of `GET /apis/apps/v1/namespaces/{ns}/replicasets`.
#[derive(Debug, Deserialize)]
pub struct ReplicaSetList {
    #[serde(default)]
    pub items: Vec<ReplicaSet>,
}

impl From<ReplicaSet> for Workload {
    fn from(replica_set: ReplicaSet) -> Self {
        let image = replica_set
            .spec
            .template
            .spec
            .containers
            .into_iter()
            .next()
            .and_then(|container| container.image);

        Self {
            name: replica_set.metadata.name,
            created_at: replica_set.metadata.creation_timestamp,
            image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_replica_set_to_workload() {
        let list: ReplicaSetList = serde_json::from_value(serde_json::json!({
            "kind": "ReplicaSetList",
            "items": [
                {
                    "metadata": {
                        "name": "lola-server-web-7d9f8",
                        "creationTimestamp": "2020-02-18T16:04:05Z",
                        "labels": { "app": "lola-server" }
                    },
                    "spec": {
                        "replicas": 3,
                        "template": {
                            "spec": {
                                "containers": [
                                    { "name": "web", "image": "lola/server:prod-5427252" },
                                    { "name": "sidecar", "image": "envoy:1.13" }
                                ]
                            }
                        }
                    }
                },
                {
                    "metadata": {
                        "name": "lola-server-web-empty",
                        "creationTimestamp": "2020-02-17T16:04:05Z"
                    }
                }
            ]
        }))
        .unwrap();

        let workloads: Vec<Workload> =
            list.items.into_iter().map(Workload::from).collect();

        assert_eq!(workloads[0].name, "lola-server-web-7d9f8");
        assert_eq!(
            workloads[0].image.as_deref(),
            Some("lola/server:prod-5427252")
        );
        assert_eq!(
            workloads[0].created_at.to_rfc3339(),
            "2020-02-18T16:04:05+00:00"
        );
        assert_eq!(workloads[1].image, None);
    }
}
