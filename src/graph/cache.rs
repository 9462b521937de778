//! Per-namespace build cache
//!
//! Holds the positioned node/edge block last built for each namespace,
//! keyed by a structural fingerprint of the incoming record. A rebuild
//! only recomputes namespaces whose fingerprint changed; everything
//! else is reused verbatim and merely re-offset vertically.

use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

use crate::graph::node::{GraphEdge, GraphNode};
use crate::models::NamespaceResource;

/// One namespace's built subgraph, positions relative to the block top.
#[derive(Debug, Clone)]
pub struct CachedBlock {
    pub fingerprint: u64,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub height: f64,
}

/// Namespace-keyed block cache.
#[derive(Debug, Default)]
pub struct GraphCache {
    blocks: HashMap<String, CachedBlock>,
}

impl GraphCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Structural fingerprint of one namespace record. Any change to
    /// the record (labels, status, any resource field) dirties it.
    pub fn fingerprint(record: &NamespaceResource) -> u64 {
        let mut hasher = DefaultHasher::new();
        match serde_json::to_string(record) {
            Ok(json) => json.hash(&mut hasher),
            // Serialization of feed types cannot fail in practice;
            // degrade to always-dirty for this namespace if it does.
            Err(_) => record.name.hash(&mut hasher),
        }
        hasher.finish()
    }

    /// The cached block for `namespace`, only if still current.
    pub fn lookup(&self, namespace: &str, fingerprint: u64) -> Option<&CachedBlock> {
        self.blocks
            .get(namespace)
            .filter(|block| block.fingerprint == fingerprint)
    }

    pub fn store(&mut self, namespace: String, block: CachedBlock) {
        self.blocks.insert(namespace, block);
    }

    /// Evict namespaces no longer present in the snapshot.
    pub fn retain(&mut self, live: &HashSet<String>) {
        self.blocks.retain(|namespace, _| live.contains(namespace));
    }

    /// Drop the given node keys (and edges touching them) from every
    /// cached block, so a cascade delete cannot resurrect them from
    /// cache on the next rebuild.
    pub fn purge(&mut self, keys: &HashSet<String>) {
        for block in self.blocks.values_mut() {
            block.nodes.retain(|node| !keys.contains(&node.key));
            block.edges.retain(|edge| !edge.touches(keys));
        }
        self.blocks.retain(|_, block| !block.nodes.is_empty());
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node::NodeId;
    use crate::graph::Health;
    use serde_json::json;

    fn record(name: &str) -> NamespaceResource {
        serde_json::from_value(json!({
            "name": name,
            "status": "Active",
            "resources": {
                "apps.v1/deployments": [
                    {"kind": "Deployment", "metadata": {"name": "web"}}
                ]
            }
        }))
        .unwrap()
    }

    fn block_with(keys: &[&str]) -> CachedBlock {
        let nodes = keys
            .iter()
            .map(|key| {
                let id = NodeId::namespace(*key);
                GraphNode {
                    key: (*key).to_string(),
                    label: (*key).to_string(),
                    kind: "Namespace".to_string(),
                    icon: "icon-namespace".to_string(),
                    age: None,
                    health: Health::Active,
                    position: None,
                    id,
                }
            })
            .collect();
        CachedBlock {
            fingerprint: 1,
            nodes,
            edges: vec![GraphEdge::between(keys[0], keys[keys.len() - 1])],
            height: 90.0,
        }
    }

    #[test]
    fn test_fingerprint_stable_for_identical_records() {
        assert_eq!(
            GraphCache::fingerprint(&record("default")),
            GraphCache::fingerprint(&record("default"))
        );
    }

    #[test]
    fn test_fingerprint_changes_when_record_changes() {
        let unchanged = record("default");
        let mut changed = record("default");
        changed.resources.get_mut("apps.v1/deployments").unwrap()[0]
            .metadata
            .name = Some("api".to_string());
        assert_ne!(
            GraphCache::fingerprint(&unchanged),
            GraphCache::fingerprint(&changed)
        );
    }

    #[test]
    fn test_lookup_requires_matching_fingerprint() {
        let mut cache = GraphCache::new();
        cache.store("default".to_string(), block_with(&["a", "b"]));
        assert!(cache.lookup("default", 1).is_some());
        assert!(cache.lookup("default", 2).is_none());
        assert!(cache.lookup("other", 1).is_none());
    }

    #[test]
    fn test_retain_evicts_departed_namespaces() {
        let mut cache = GraphCache::new();
        cache.store("alpha".to_string(), block_with(&["a"]));
        cache.store("beta".to_string(), block_with(&["b"]));

        let mut live = HashSet::new();
        live.insert("alpha".to_string());
        cache.retain(&live);

        assert_eq!(cache.len(), 1);
        assert!(cache.lookup("alpha", 1).is_some());
    }

    #[test]
    fn test_purge_drops_nodes_and_touching_edges() {
        let mut cache = GraphCache::new();
        cache.store("default".to_string(), block_with(&["a", "b"]));

        let mut removed = HashSet::new();
        removed.insert("b".to_string());
        cache.purge(&removed);

        let block = cache.lookup("default", 1).unwrap();
        assert_eq!(block.nodes.len(), 1);
        assert!(block.edges.is_empty());
    }
}
