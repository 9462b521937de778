//! Layered left-to-right layout engine
//!
//! Ranks every node by its longest path from the namespace root, then
//! maps (rank, row) to pixel coordinates with fixed separation within
//! and between ranks. Namespace blocks stack vertically in snapshot
//! order. The whole pass is deterministic: the same graph always lands
//! on the same coordinates.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::config::schema::LayoutConfig;
use crate::graph::node::{NodeId, Position};
use crate::graph::TopologyGraph;

/// Assigns positions to built graphs.
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Lay out a full graph in place. Returns the total height used.
    pub fn layout(&self, graph: &mut TopologyGraph) -> f64 {
        let adjacency = adjacency_of(graph);
        let roots: Vec<String> = graph
            .nodes
            .iter()
            .filter(|node| matches!(node.id, NodeId::Namespace { .. }))
            .map(|node| node.key.clone())
            .collect();

        let mut offset = 0.0;
        let mut placed: HashSet<String> = HashSet::new();
        for root in &roots {
            let members = reachable_from(&adjacency, root);
            let height = self.layout_block(graph, &members, offset);
            placed.extend(members);
            offset += height + self.config.namespace_separation;
        }

        // Nodes outside every namespace block never come out of the
        // builder; if one shows up anyway, stack it at the bottom
        // rather than leave it unpositioned.
        let orphans: Vec<String> = graph
            .nodes
            .iter()
            .filter(|node| !placed.contains(&node.key))
            .map(|node| node.key.clone())
            .collect();
        for key in orphans {
            tracing::warn!(key = %key, "node unreachable from any namespace root");
            let height = self.layout_block(graph, &[key], offset);
            offset += height + self.config.node_separation;
        }

        offset
    }

    /// Lay out one block of nodes starting at vertical `offset`.
    ///
    /// Rank is the longest path from the block root (relaxation bounded
    /// by block size, so cyclic edges cannot loop forever). Row order
    /// within a rank follows `members` order, which the builder keeps
    /// deterministic. Returns the block height.
    pub fn layout_block(
        &self,
        graph: &mut TopologyGraph,
        members: &[String],
        offset: f64,
    ) -> f64 {
        if members.is_empty() {
            return 0.0;
        }

        let member_set: HashSet<&str> = members.iter().map(String::as_str).collect();
        let block_edges: Vec<(String, String)> = graph
            .edges
            .iter()
            .filter(|edge| {
                member_set.contains(edge.source.as_str())
                    && member_set.contains(edge.target.as_str())
            })
            .map(|edge| (edge.source.clone(), edge.target.clone()))
            .collect();

        let cap = members.len();
        let mut ranks: HashMap<String, usize> =
            members.iter().map(|key| (key.clone(), 0)).collect();
        for _ in 0..cap {
            let mut changed = false;
            for (source, target) in &block_edges {
                let candidate = ranks[source] + 1;
                if candidate > ranks[target] && candidate <= cap {
                    ranks.insert(target.clone(), candidate);
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }

        let mut rows_per_rank: HashMap<usize, usize> = HashMap::new();
        let mut slots: HashMap<&str, (usize, usize)> = HashMap::new();
        for key in members {
            let rank = ranks[key];
            let row = rows_per_rank.entry(rank).or_insert(0);
            slots.insert(key.as_str(), (rank, *row));
            *row += 1;
        }

        for node in graph.nodes.iter_mut() {
            if let Some((rank, row)) = slots.get(node.key.as_str()) {
                node.position = Some(Position {
                    x: *rank as f64 * self.config.rank_separation,
                    y: offset + *row as f64 * self.config.node_separation,
                });
            }
        }

        let max_rows = rows_per_rank.values().copied().max().unwrap_or(1);
        max_rows as f64 * self.config.node_separation
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

fn adjacency_of(graph: &TopologyGraph) -> HashMap<String, Vec<String>> {
    let mut adjacency: HashMap<String, Vec<String>> = HashMap::new();
    for edge in &graph.edges {
        adjacency
            .entry(edge.source.clone())
            .or_default()
            .push(edge.target.clone());
    }
    adjacency
}

/// BFS over outgoing edges, returning `root` plus everything reachable
/// from it, in visit order.
fn reachable_from(adjacency: &HashMap<String, Vec<String>>, root: &str) -> Vec<String> {
    let mut order = vec![root.to_string()];
    let mut visited: HashSet<String> = HashSet::new();
    visited.insert(root.to_string());

    let mut queue: VecDeque<String> = VecDeque::new();
    queue.push_back(root.to_string());
    while let Some(current) = queue.pop_front() {
        if let Some(children) = adjacency.get(&current) {
            for child in children {
                if visited.insert(child.clone()) {
                    order.push(child.clone());
                    queue.push_back(child.clone());
                }
            }
        }
    }
    order
}
