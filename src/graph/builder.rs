//! Graph builder
//!
//! Walks one snapshot and emits the raw node/edge lists: one node per
//! namespace, one per resource item, plus the synthetic nodes implied
//! by the relationship rule table. Positions are left unset; the layout
//! engine fills them in afterwards.

use chrono::{DateTime, Utc};

use crate::graph::node::{GraphEdge, GraphNode, Health, NodeId};
use crate::graph::rules::{category_for, children_for, Category, ChildSpec};
use crate::graph::TopologyGraph;
use crate::models::{format_age, NamespaceResource, ResourceItem};

/// Builds topology graphs from snapshots.
pub struct GraphBuilder {
    hidden_prefixes: Vec<String>,
}

impl GraphBuilder {
    pub fn new(hidden_prefixes: Vec<String>) -> Self {
        Self { hidden_prefixes }
    }

    /// True for system namespaces the visualizer hides.
    pub fn is_hidden(&self, namespace: &str) -> bool {
        self.hidden_prefixes
            .iter()
            .any(|prefix| namespace.starts_with(prefix.as_str()))
    }

    /// Build the full graph for one snapshot.
    ///
    /// Malformed items are skipped with a diagnostic; the pass never
    /// aborts wholesale.
    pub fn build(&self, snapshot: &[NamespaceResource]) -> TopologyGraph {
        let now = Utc::now();
        let mut graph = TopologyGraph::new();
        for record in snapshot {
            if self.is_hidden(&record.name) {
                tracing::debug!(namespace = %record.name, "skipping hidden namespace");
                continue;
            }
            self.build_namespace(record, now, &mut graph);
        }
        tracing::debug!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "graph build complete"
        );
        graph
    }

    /// Build one namespace subtree into `graph`.
    pub fn build_namespace(
        &self,
        record: &NamespaceResource,
        now: DateTime<Utc>,
        graph: &mut TopologyGraph,
    ) {
        let ns_id = NodeId::namespace(record.name.clone());
        let ns_key = ns_id.key();
        graph.add_node(GraphNode {
            key: ns_key.clone(),
            label: record.name.clone(),
            kind: "Namespace".to_string(),
            icon: Category::Cluster.icon_class().to_string(),
            age: None,
            health: if record.status == "Active" {
                Health::Active
            } else {
                Health::Inactive
            },
            position: None,
            id: ns_id,
        });

        // Positional counter runs across every bucket in the namespace,
        // so the same kind+name appearing in two buckets still gets
        // distinct ids.
        let mut index = 0usize;
        for (bucket, items) in &record.resources {
            for item in items {
                let Some(name) = item.metadata.name.as_deref() else {
                    tracing::warn!(
                        namespace = %record.name,
                        bucket = %bucket,
                        "skipping resource without a name"
                    );
                    continue;
                };
                if item.kind.is_empty() {
                    tracing::warn!(
                        namespace = %record.name,
                        bucket = %bucket,
                        name = %name,
                        "skipping resource without a kind"
                    );
                    continue;
                }

                let id = NodeId::Resource {
                    namespace: record.name.clone(),
                    kind: item.kind.clone(),
                    name: name.to_string(),
                    index,
                };
                index += 1;

                let key = id.key();
                let health = derive_health(item);
                graph.add_node(GraphNode {
                    key: key.clone(),
                    label: name.to_string(),
                    kind: item.kind.clone(),
                    icon: category_for(&item.kind).icon_class().to_string(),
                    age: item
                        .metadata
                        .creation_timestamp
                        .map(|created| format_age(created, now)),
                    health,
                    position: None,
                    id: id.clone(),
                });
                graph.add_edge(GraphEdge::between(&ns_key, &key));

                expand_children(graph, &id, &key, children_for(&item.kind), health);
            }
        }
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new(crate::config::defaults::hidden_namespace_prefixes())
    }
}

/// Recursively emit the synthetic children a rule entry implies.
///
/// Synthetic nodes carry their parent's health: a ReplicaSet implied by
/// an unavailable Deployment should not render green.
fn expand_children(
    graph: &mut TopologyGraph,
    parent: &NodeId,
    parent_key: &str,
    specs: &[ChildSpec],
    health: Health,
) {
    for spec in specs {
        let id = NodeId::synthetic(parent.clone(), spec.suffix, spec.kind);
        let key = id.key();
        graph.add_node(GraphNode {
            key: key.clone(),
            label: spec.kind.to_string(),
            kind: spec.kind.to_string(),
            icon: category_for(spec.kind).icon_class().to_string(),
            age: None,
            health,
            position: None,
            id: id.clone(),
        });
        graph.add_edge(GraphEdge::between(parent_key, &key));
        expand_children(graph, &id, &key, spec.children, health);
    }
}

/// Coarse health: `Active` iff any status condition has type
/// `Available` with status `True`. Not full condition evaluation.
pub fn derive_health(item: &ResourceItem) -> Health {
    let available = item
        .status
        .as_ref()
        .and_then(|status| status.get("conditions"))
        .and_then(|conditions| conditions.as_array())
        .map(|conditions| {
            conditions.iter().any(|condition| {
                condition.get("type").and_then(|t| t.as_str()) == Some("Available")
                    && condition.get("status").and_then(|s| s.as_str()) == Some("True")
            })
        })
        .unwrap_or(false);

    if available {
        Health::Active
    } else {
        Health::Inactive
    }
}
