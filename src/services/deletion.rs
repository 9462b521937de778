//! Deletion coordination
//!
//! Resolves a node into its REST addressing, issues the external
//! delete request, and on success applies the cascade removal through
//! the graph store. A failed request leaves the graph untouched; there
//! is no automatic retry.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::config::schema::BackendConfig;
use crate::graph::NodeId;
use crate::models::ResourceKind;
use crate::store::GraphStore;

/// Why a delete did not happen.
#[derive(Debug, Error)]
pub enum DeleteError {
    #[error("node '{0}' is not present in the current graph")]
    UnknownNode(String),
    #[error("node '{0}' is synthetic and has no backing resource")]
    NotAddressable(String),
    #[error("delete of {kind} '{namespace}/{name}' failed: {reason}")]
    Endpoint {
        kind: String,
        namespace: String,
        name: String,
        reason: String,
    },
    #[error("graph store is no longer running")]
    StoreClosed,
}

/// Outbound deletion endpoint contract.
///
/// Namespaces use a distinct endpoint shape, hence the second method.
#[async_trait]
pub trait DeleteEndpoint: Send + Sync {
    /// `DELETE {base}/api/{pluralKind}/{namespace}/{name}`
    async fn delete_resource(&self, plural: &str, namespace: &str, name: &str) -> Result<()>;

    /// `DELETE {base}/api/namespaces/delete/{namespace}`
    async fn delete_namespace(&self, name: &str) -> Result<()>;
}

/// reqwest-backed endpoint client.
pub struct HttpDeleteEndpoint {
    client: reqwest::Client,
    base: String,
}

impl HttpDeleteEndpoint {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        // Validate early so a bad base URL fails at startup rather
        // than at the first delete.
        Url::parse(&config.base_url)
            .with_context(|| format!("Invalid backend base URL '{}'", config.base_url))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn resource_url(&self, plural: &str, namespace: &str, name: &str) -> String {
        format!("{}/api/{}/{}/{}", self.base, plural, namespace, name)
    }

    fn namespace_url(&self, name: &str) -> String {
        format!("{}/api/namespaces/delete/{}", self.base, name)
    }

    async fn issue(&self, url: String) -> Result<()> {
        tracing::debug!(url = %url, "issuing delete request");
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .with_context(|| format!("Delete request to {} failed", url))?;
        if !response.status().is_success() {
            anyhow::bail!("server returned {}", response.status());
        }
        Ok(())
    }
}

#[async_trait]
impl DeleteEndpoint for HttpDeleteEndpoint {
    async fn delete_resource(&self, plural: &str, namespace: &str, name: &str) -> Result<()> {
        self.issue(self.resource_url(plural, namespace, name)).await
    }

    async fn delete_namespace(&self, name: &str) -> Result<()> {
        self.issue(self.namespace_url(name)).await
    }
}

/// Coordinates the endpoint call with the atomic cascade removal.
pub struct DeletionCoordinator {
    endpoint: Arc<dyn DeleteEndpoint>,
    store: GraphStore,
}

impl DeletionCoordinator {
    pub fn new(endpoint: Arc<dyn DeleteEndpoint>, store: GraphStore) -> Self {
        Self { endpoint, store }
    }

    /// Delete the resource behind `target`, then remove it plus the
    /// precomputed `descendants` closure (and every touching edge)
    /// from graph and cache as one state transition. Returns the
    /// number of nodes removed. On endpoint failure nothing mutates.
    pub async fn delete(
        &self,
        target: &NodeId,
        descendants: HashSet<String>,
    ) -> Result<usize, DeleteError> {
        let key = target.key();
        let Some(address) = target.target() else {
            return Err(DeleteError::NotAddressable(key));
        };

        let outcome = if matches!(
            ResourceKind::parse_optional(&address.kind),
            Some(ResourceKind::Namespace)
        ) {
            self.endpoint.delete_namespace(&address.name).await
        } else {
            let plural = ResourceKind::plural_for(&address.kind);
            self.endpoint
                .delete_resource(&plural, &address.namespace, &address.name)
                .await
        };

        if let Err(error) = outcome {
            tracing::warn!(
                kind = %address.kind,
                namespace = %address.namespace,
                name = %address.name,
                error = %format!("{:#}", error),
                "delete request failed; graph unchanged"
            );
            return Err(DeleteError::Endpoint {
                kind: address.kind,
                namespace: address.namespace,
                name: address.name,
                reason: format!("{:#}", error),
            });
        }

        let mut keys = descendants;
        keys.insert(key);
        self.store
            .prune(keys)
            .await
            .map_err(|_| DeleteError::StoreClosed)
    }
}
