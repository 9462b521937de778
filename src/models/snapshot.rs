//! Snapshot feed data model
//!
//! Types for the namespace-scoped resource snapshots delivered by the
//! push channel. A snapshot is an ordered sequence of
//! [`NamespaceResource`] records, each carrying every object visible in
//! that namespace grouped into `"{apiGroup}.{apiVersion}/{pluralKind}"`
//! buckets (e.g. `".v1/endpoints"`, `"discovery.k8s.io.v1/endpointslices"`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One complete snapshot as delivered by the feed.
pub type Snapshot = Vec<NamespaceResource>;

/// Object metadata carried by the feed.
///
/// Every field is optional: the feed forwards objects verbatim and some
/// controllers emit partial metadata. Missing names mark an item as
/// malformed and the graph builder skips it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default, rename = "creationTimestamp")]
    pub creation_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub uid: Option<String>,
}

/// One cluster object. Immutable once received.
///
/// `status` is kept as a raw value: the builder only inspects the
/// `conditions` array for health derivation, and kinds disagree wildly
/// about the rest of their status shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceItem {
    #[serde(default)]
    pub kind: String,
    #[serde(default, rename = "apiVersion")]
    pub api_version: String,
    #[serde(default)]
    pub metadata: ResourceMetadata,
    #[serde(default)]
    pub status: Option<serde_json::Value>,
}

impl ResourceItem {
    /// Name accessor for the common case. `None` means malformed.
    pub fn name(&self) -> Option<&str> {
        self.metadata.name.as_deref()
    }
}

/// One namespace and everything the feed saw inside it.
///
/// Buckets use a `BTreeMap` so that iteration order is stable across
/// rebuilds regardless of the JSON key order the feed happened to emit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NamespaceResource {
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub resources: BTreeMap<String, Vec<ResourceItem>>,
}

impl NamespaceResource {
    /// Total number of items across all buckets.
    pub fn item_count(&self) -> usize {
        self.resources.values().map(Vec::len).sum()
    }
}

/// Render an age the way kubectl does: largest unit only.
pub fn format_age(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - created).num_seconds().max(0);
    if seconds >= 86_400 {
        format!("{}d", seconds / 86_400)
    } else if seconds >= 3_600 {
        format!("{}h", seconds / 3_600)
    } else if seconds >= 60 {
        format!("{}m", seconds / 60)
    } else {
        format!("{}s", seconds)
    }
}
