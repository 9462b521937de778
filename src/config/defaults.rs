//! Compiled default values

/// Base URL of the backend that owns the deletion endpoint.
pub const DEFAULT_BASE_URL: &str = "http://localhost:4000";

/// Delete requests are bounded; the endpoint has no streaming responses.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Horizontal distance between layout ranks, in pixels.
pub const DEFAULT_RANK_SEPARATION: f64 = 220.0;

/// Vertical distance between rows within a rank, in pixels.
pub const DEFAULT_NODE_SEPARATION: f64 = 90.0;

/// Vertical gap between namespace blocks, in pixels.
pub const DEFAULT_NAMESPACE_SEPARATION: f64 = 140.0;

/// System namespaces hidden from the visualizer by prefix match.
pub const HIDDEN_NAMESPACE_PREFIXES: &[&str] = &[
    "kube-",
    "openshift-",
    "istio-system",
    "knative-",
    "calico-",
    "tigera-",
];

pub fn hidden_namespace_prefixes() -> Vec<String> {
    HIDDEN_NAMESPACE_PREFIXES
        .iter()
        .map(|prefix| prefix.to_string())
        .collect()
}
