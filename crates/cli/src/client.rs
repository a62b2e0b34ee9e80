//! Kubernetes-backed workload source
//!
//! Lists pods across all namespaces filtered by `spec.nodeName`, the
//! same field selector `kubectl get pods --field-selector` uses. Node
//! identifiers in the roster are the cluster's node names (private
//! IPs in our deployment).

use anyhow::{Context, Result};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Pod;
use kube::{
    api::ListParams,
    config::{KubeConfigOptions, Kubeconfig},
    Api, Client, Config,
};
use podmix_core::{FetchError, WorkloadRecord, WorkloadSource};
use tracing::debug;

/// Workload source backed by a live cluster connection.
pub struct KubeWorkloadSource {
    client: Client,
}

impl KubeWorkloadSource {
    /// Build a client from the local kubeconfig, optionally selecting
    /// a named context.
    pub async fn connect(context: Option<&str>) -> Result<Self> {
        let kubeconfig = Kubeconfig::read().context("failed to load kubeconfig")?;
        let options = KubeConfigOptions {
            context: context.map(String::from),
            ..Default::default()
        };
        let config = Config::from_custom_kubeconfig(kubeconfig, &options)
            .await
            .context("failed to resolve kubeconfig context")?;
        let client = Client::try_from(config).context("failed to build Kubernetes client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl WorkloadSource for KubeWorkloadSource {
    async fn fetch_workloads(&self, node: &str) -> Result<Vec<WorkloadRecord>, FetchError> {
        let pods: Api<Pod> = Api::all(self.client.clone());
        let params = ListParams::default().fields(&format!("spec.nodeName={node}"));

        let list = pods.list(&params).await.map_err(|err| FetchError::Query {
            node: node.to_string(),
            reason: err.to_string(),
        })?;
        debug!(node = %node, pods = list.items.len(), "listed pods");

        // Missing namespace/phase map to empty strings; an empty
        // phase is not terminal, so the engine counts it as active.
        Ok(list
            .items
            .into_iter()
            .map(|pod| {
                WorkloadRecord::new(
                    pod.metadata.namespace.unwrap_or_default(),
                    pod.status.and_then(|s| s.phase).unwrap_or_default(),
                )
            })
            .collect())
    }
}
