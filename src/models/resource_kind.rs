//! Resource kind definitions
//!
//! Centralized enum for the resource kinds the visualizer understands,
//! including the plural collection names used when addressing the
//! deletion endpoint. Kinds outside this enum still render (the graph
//! builder falls back to a generic classification); they only lose the
//! exact plural mapping.

use std::fmt;
use std::str::FromStr;

/// Enumeration of the resource kinds with first-class support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Namespace,
    // Workloads
    Deployment,
    ReplicaSet,
    StatefulSet,
    DaemonSet,
    Pod,
    // Batch
    Job,
    CronJob,
    // Services / networking
    Service,
    Endpoints,
    EndpointSlice,
    Ingress,
    NetworkPolicy,
    // Config
    ConfigMap,
    Secret,
    // RBAC
    ServiceAccount,
    Role,
    RoleBinding,
    ClusterRole,
    ClusterRoleBinding,
    // Storage
    PersistentVolumeClaim,
    PersistentVolume,
    StorageClass,
    // Autoscaling / scheduling
    HorizontalPodAutoscaler,
    PriorityClass,
    // CRDs
    CustomResourceDefinition,
}

impl ResourceKind {
    /// Get the display name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Namespace => "Namespace",
            ResourceKind::Deployment => "Deployment",
            ResourceKind::ReplicaSet => "ReplicaSet",
            ResourceKind::StatefulSet => "StatefulSet",
            ResourceKind::DaemonSet => "DaemonSet",
            ResourceKind::Pod => "Pod",
            ResourceKind::Job => "Job",
            ResourceKind::CronJob => "CronJob",
            ResourceKind::Service => "Service",
            ResourceKind::Endpoints => "Endpoints",
            ResourceKind::EndpointSlice => "EndpointSlice",
            ResourceKind::Ingress => "Ingress",
            ResourceKind::NetworkPolicy => "NetworkPolicy",
            ResourceKind::ConfigMap => "ConfigMap",
            ResourceKind::Secret => "Secret",
            ResourceKind::ServiceAccount => "ServiceAccount",
            ResourceKind::Role => "Role",
            ResourceKind::RoleBinding => "RoleBinding",
            ResourceKind::ClusterRole => "ClusterRole",
            ResourceKind::ClusterRoleBinding => "ClusterRoleBinding",
            ResourceKind::PersistentVolumeClaim => "PersistentVolumeClaim",
            ResourceKind::PersistentVolume => "PersistentVolume",
            ResourceKind::StorageClass => "StorageClass",
            ResourceKind::HorizontalPodAutoscaler => "HorizontalPodAutoscaler",
            ResourceKind::PriorityClass => "PriorityClass",
            ResourceKind::CustomResourceDefinition => "CustomResourceDefinition",
        }
    }

    /// The pluralized collection name used in REST addressing.
    ///
    /// Must exactly match the cluster API's collection names; the
    /// deletion endpoint rejects anything else.
    pub fn plural(&self) -> &'static str {
        match self {
            ResourceKind::Namespace => "namespaces",
            ResourceKind::Deployment => "deployments",
            ResourceKind::ReplicaSet => "replicasets",
            ResourceKind::StatefulSet => "statefulsets",
            ResourceKind::DaemonSet => "daemonsets",
            ResourceKind::Pod => "pods",
            ResourceKind::Job => "jobs",
            ResourceKind::CronJob => "cronjobs",
            ResourceKind::Service => "services",
            ResourceKind::Endpoints => "endpoints",
            ResourceKind::EndpointSlice => "endpointslices",
            ResourceKind::Ingress => "ingresses",
            ResourceKind::NetworkPolicy => "networkpolicies",
            ResourceKind::ConfigMap => "configmaps",
            ResourceKind::Secret => "secrets",
            ResourceKind::ServiceAccount => "serviceaccounts",
            ResourceKind::Role => "roles",
            ResourceKind::RoleBinding => "rolebindings",
            ResourceKind::ClusterRole => "clusterroles",
            ResourceKind::ClusterRoleBinding => "clusterrolebindings",
            ResourceKind::PersistentVolumeClaim => "persistentvolumeclaims",
            ResourceKind::PersistentVolume => "persistentvolumes",
            ResourceKind::StorageClass => "storageclasses",
            ResourceKind::HorizontalPodAutoscaler => "horizontalpodautoscalers",
            ResourceKind::PriorityClass => "priorityclasses",
            ResourceKind::CustomResourceDefinition => "customresourcedefinitions",
        }
    }

    /// Try to parse a string into a ResourceKind, returning None if invalid
    pub fn parse_optional(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    /// Try to parse a string (case-insensitive) into a ResourceKind
    pub fn from_str_case_insensitive(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .find(|kind| {
                kind.as_str().eq_ignore_ascii_case(s) || kind.plural().eq_ignore_ascii_case(s)
            })
            .copied()
    }

    /// Resolve the addressable collection name for an arbitrary kind tag.
    ///
    /// Known kinds use the fixed table; unknown kinds (CRD instances)
    /// fall back to the lowercased tag plus `s`, which matches the
    /// common-case convention the cluster API applies to custom kinds.
    pub fn plural_for(kind: &str) -> String {
        match Self::from_str_case_insensitive(kind) {
            Some(known) => known.plural().to_string(),
            None => format!("{}s", kind.to_ascii_lowercase()),
        }
    }

    /// Get all supported resource kinds
    pub fn all() -> &'static [Self] {
        &[
            ResourceKind::Namespace,
            ResourceKind::Deployment,
            ResourceKind::ReplicaSet,
            ResourceKind::StatefulSet,
            ResourceKind::DaemonSet,
            ResourceKind::Pod,
            ResourceKind::Job,
            ResourceKind::CronJob,
            ResourceKind::Service,
            ResourceKind::Endpoints,
            ResourceKind::EndpointSlice,
            ResourceKind::Ingress,
            ResourceKind::NetworkPolicy,
            ResourceKind::ConfigMap,
            ResourceKind::Secret,
            ResourceKind::ServiceAccount,
            ResourceKind::Role,
            ResourceKind::RoleBinding,
            ResourceKind::ClusterRole,
            ResourceKind::ClusterRoleBinding,
            ResourceKind::PersistentVolumeClaim,
            ResourceKind::PersistentVolume,
            ResourceKind::StorageClass,
            ResourceKind::HorizontalPodAutoscaler,
            ResourceKind::PriorityClass,
            ResourceKind::CustomResourceDefinition,
        ]
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<ResourceKind> for String {
    fn from(kind: ResourceKind) -> Self {
        kind.as_str().to_string()
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|kind| kind.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Unknown resource kind: {}", s))
    }
}
