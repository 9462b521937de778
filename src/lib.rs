//! topograph
//!
//! Resource-topology graph builder and layout engine for a
//! cluster-workload visualizer. Consumes namespace-scoped resource
//! snapshots, expands each object into the graph nodes its kind
//! implies, computes a deterministic left-to-right layered layout, and
//! keeps the derived graph consistent across snapshot changes and
//! cascading deletions.

pub mod cli;
pub mod config;
pub mod graph;
pub mod models;
pub mod services;
pub mod store;

// Re-export commonly used types for convenience
pub use graph::{
    DeleteTarget, GraphBuilder, GraphEdge, GraphNode, Health, LayoutEngine, NodeId, Position,
    TopologyEngine, TopologyGraph,
};
pub use models::{NamespaceResource, ResourceItem, ResourceKind, Snapshot};
pub use services::{DeleteEndpoint, DeleteError, TopologyEvent, TopologySession};
pub use store::GraphStore;
