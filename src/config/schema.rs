//! Configuration schema
//!
//! Serde types for the YAML configuration file. Every field has a
//! compiled default so a missing or partial file still yields a
//! working configuration.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub backend: BackendConfig,
    pub layout: LayoutConfig,
    /// Namespace name prefixes hidden from the graph.
    pub hidden_namespaces: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            layout: LayoutConfig::default(),
            hidden_namespaces: defaults::hidden_namespace_prefixes(),
        }
    }
}

/// Backend connection settings for the deletion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackendConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: defaults::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Layout separation constants, in pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub rank_separation: f64,
    pub node_separation: f64,
    pub namespace_separation: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            rank_separation: defaults::DEFAULT_RANK_SEPARATION,
            node_separation: defaults::DEFAULT_NODE_SEPARATION,
            namespace_separation: defaults::DEFAULT_NAMESPACE_SEPARATION,
        }
    }
}
