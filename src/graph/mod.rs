//! Topology graph
//!
//! Graph data structures plus the build pipeline that turns snapshots
//! into positioned node/edge lists: builder (expansion rules), layout
//! engine (layered left-to-right), per-namespace cache, and the
//! descendant traversal used by cascading deletion.

mod builder;
mod cache;
mod layout;
mod node;
mod rules;
mod traverse;

pub use builder::{derive_health, GraphBuilder};
pub use cache::{CachedBlock, GraphCache};
pub use layout::LayoutEngine;
pub use node::{DeleteTarget, GraphEdge, GraphNode, Health, NodeId, Position};
pub use rules::{category_for, children_for, rule_for, Category, ChildSpec, KindRule, KIND_RULES};
pub use traverse::descendants;

use chrono::Utc;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::config::schema::Config;
use crate::models::NamespaceResource;

/// The derived graph: one build's nodes and edges plus a key index.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TopologyGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    /// Map from node key to index in `nodes`.
    #[serde(skip)]
    pub node_index: HashMap<String, usize>,
}

impl TopologyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Duplicate keys are dropped with a diagnostic: ids
    /// are unique per build by construction, so a collision means a
    /// malformed feed rather than a graph worth corrupting.
    pub fn add_node(&mut self, node: GraphNode) {
        if self.node_index.contains_key(&node.key) {
            tracing::warn!(key = %node.key, "dropping node with duplicate id");
            return;
        }
        self.node_index.insert(node.key.clone(), self.nodes.len());
        self.nodes.push(node);
    }

    pub fn add_edge(&mut self, edge: GraphEdge) {
        self.edges.push(edge);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.node_index.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&GraphNode> {
        self.node_index.get(key).map(|&index| &self.nodes[index])
    }

    /// Descendant closure of `key` via outgoing edges, excluding `key`.
    pub fn descendants_of(&self, key: &str) -> HashSet<String> {
        descendants(&self.edges, key)
    }

    /// A new graph without the `removed` keys and without any edge
    /// touching them. The source graph is untouched; callers swap the
    /// result in as a whole-state replacement.
    pub fn without(&self, removed: &HashSet<String>) -> TopologyGraph {
        let mut next = TopologyGraph::new();
        for node in &self.nodes {
            if !removed.contains(&node.key) {
                next.add_node(node.clone());
            }
        }
        for edge in &self.edges {
            if !edge.touches(removed) {
                next.add_edge(edge.clone());
            }
        }
        next
    }

    /// Every edge endpoint resolves to a node in this graph.
    pub fn edges_are_consistent(&self) -> bool {
        self.edges
            .iter()
            .all(|edge| self.contains(&edge.source) && self.contains(&edge.target))
    }
}

/// Cache-aware rebuild pipeline: builder + layout + per-namespace
/// block reuse. Owned by the graph store; not safe for concurrent use
/// and not meant to be.
pub struct TopologyEngine {
    builder: GraphBuilder,
    layout: LayoutEngine,
    cache: GraphCache,
    namespace_separation: f64,
}

impl TopologyEngine {
    pub fn new(config: &Config) -> Self {
        Self {
            builder: GraphBuilder::new(config.hidden_namespaces.clone()),
            layout: LayoutEngine::new(config.layout.clone()),
            cache: GraphCache::new(),
            namespace_separation: config.layout.namespace_separation,
        }
    }

    /// Rebuild the graph for one snapshot.
    ///
    /// Namespaces whose structural fingerprint is unchanged reuse the
    /// cached positioned block; only dirty namespaces are rebuilt and
    /// re-laid-out.
    pub fn rebuild(&mut self, snapshot: &[NamespaceResource]) -> TopologyGraph {
        let now = Utc::now();
        let mut graph = TopologyGraph::new();
        let mut live: HashSet<String> = HashSet::new();
        let mut offset = 0.0;
        let mut reused = 0usize;

        for record in snapshot {
            if self.builder.is_hidden(&record.name) {
                tracing::debug!(namespace = %record.name, "skipping hidden namespace");
                continue;
            }
            live.insert(record.name.clone());

            let fingerprint = GraphCache::fingerprint(record);
            let block = match self.cache.lookup(&record.name, fingerprint) {
                Some(hit) => {
                    reused += 1;
                    hit.clone()
                }
                None => {
                    let mut sub = TopologyGraph::new();
                    self.builder.build_namespace(record, now, &mut sub);
                    let members: Vec<String> =
                        sub.nodes.iter().map(|node| node.key.clone()).collect();
                    let height = self.layout.layout_block(&mut sub, &members, 0.0);
                    let block = CachedBlock {
                        fingerprint,
                        nodes: sub.nodes,
                        edges: sub.edges,
                        height,
                    };
                    self.cache.store(record.name.clone(), block.clone());
                    block
                }
            };

            let height = block.height;
            for mut node in block.nodes {
                if let Some(position) = node.position.as_mut() {
                    position.y += offset;
                }
                graph.add_node(node);
            }
            for edge in block.edges {
                graph.add_edge(edge);
            }
            offset += height + self.namespace_separation;
        }

        self.cache.retain(&live);
        tracing::debug!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            reused_blocks = reused,
            "rebuild complete"
        );
        graph
    }

    /// Remove `removed` from `current` and purge the same keys from
    /// the cache. Returns the replacement graph.
    pub fn prune(
        &mut self,
        current: &TopologyGraph,
        removed: &HashSet<String>,
    ) -> TopologyGraph {
        self.cache.purge(removed);
        let next = current.without(removed);
        debug_assert!(next.edges_are_consistent());
        next
    }

    /// Number of cached namespace blocks, for diagnostics.
    pub fn cached_namespaces(&self) -> usize {
        self.cache.len()
    }
}
