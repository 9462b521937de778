//! Topology session
//!
//! Headless entry point tying the snapshot feed, the graph store and
//! the deletion coordinator together. Use this when embedding the
//! topology engine behind a renderer.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use topograph::config::Config;
//! use topograph::services::TopologySession;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::default();
//! let (session, mut events) = TopologySession::connect(&config)?;
//!
//! let snapshot = serde_json::from_str(r#"[{"name": "default", "resources": {}}]"#)?;
//! session.apply_snapshot(snapshot).await?;
//!
//! for node in &session.graph().nodes {
//!     println!("{} at {:?}", node.key, node.position);
//! }
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use futures::{Stream, StreamExt};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

use crate::config::schema::Config;
use crate::graph::{DeleteTarget, TopologyGraph};
use crate::models::Snapshot;
use crate::services::deletion::{
    DeleteEndpoint, DeleteError, DeletionCoordinator, HttpDeleteEndpoint,
};
use crate::store::GraphStore;

/// Notifications for the UI layer.
#[derive(Debug, Clone)]
pub enum TopologyEvent {
    /// A snapshot was applied and a new graph published.
    GraphUpdated { nodes: usize, edges: usize },
    /// A cascade delete went through.
    DeleteApplied { key: String, removed: usize },
    /// A delete failed; the graph is unchanged. Transient and
    /// dismissible, names the failed resource.
    DeleteFailed {
        key: String,
        target: Option<DeleteTarget>,
        reason: String,
    },
}

/// A headless session over one snapshot feed.
pub struct TopologySession {
    store: GraphStore,
    coordinator: DeletionCoordinator,
    events: mpsc::UnboundedSender<TopologyEvent>,
}

impl TopologySession {
    /// Create a session with a custom deletion endpoint.
    pub fn new(
        config: &Config,
        endpoint: Arc<dyn DeleteEndpoint>,
    ) -> (Self, mpsc::UnboundedReceiver<TopologyEvent>) {
        let store = GraphStore::spawn(config);
        let coordinator = DeletionCoordinator::new(endpoint, store.clone());
        let (events, events_rx) = mpsc::unbounded_channel();
        (
            Self {
                store,
                coordinator,
                events,
            },
            events_rx,
        )
    }

    /// Create a session talking to the configured HTTP backend.
    pub fn connect(config: &Config) -> Result<(Self, mpsc::UnboundedReceiver<TopologyEvent>)> {
        let endpoint = Arc::new(HttpDeleteEndpoint::new(&config.backend)?);
        Ok(Self::new(config, endpoint))
    }

    /// Apply one snapshot and wait for the rebuilt graph.
    pub async fn apply_snapshot(&self, snapshot: Snapshot) -> Result<()> {
        self.store.apply_and_wait(snapshot).await?;
        let graph = self.store.graph();
        let _ = self.events.send(TopologyEvent::GraphUpdated {
            nodes: graph.nodes.len(),
            edges: graph.edges.len(),
        });
        Ok(())
    }

    /// Pump a snapshot stream until it ends. The transport is the
    /// caller's concern; anything that yields snapshots works.
    pub async fn drive<S>(&self, mut snapshots: S) -> Result<()>
    where
        S: Stream<Item = Snapshot> + Unpin,
    {
        while let Some(snapshot) = snapshots.next().await {
            self.apply_snapshot(snapshot).await?;
        }
        Ok(())
    }

    /// Cascade-delete the node behind `key`.
    ///
    /// Computes the descendant closure from the current graph, calls
    /// the endpoint, and prunes target + closure on success. Failures
    /// emit a `DeleteFailed` event and leave the graph untouched.
    pub async fn delete_node(&self, key: &str) -> Result<usize, DeleteError> {
        let graph = self.store.graph();
        let Some(node) = graph.get(key) else {
            let error = DeleteError::UnknownNode(key.to_string());
            let _ = self.events.send(TopologyEvent::DeleteFailed {
                key: key.to_string(),
                target: None,
                reason: error.to_string(),
            });
            return Err(error);
        };

        let id = node.id.clone();
        let target = node.target();
        let descendants = graph.descendants_of(key);

        match self.coordinator.delete(&id, descendants).await {
            Ok(removed) => {
                let _ = self.events.send(TopologyEvent::DeleteApplied {
                    key: key.to_string(),
                    removed,
                });
                Ok(removed)
            }
            Err(error) => {
                let _ = self.events.send(TopologyEvent::DeleteFailed {
                    key: key.to_string(),
                    target,
                    reason: error.to_string(),
                });
                Err(error)
            }
        }
    }

    /// Current graph. The Arc is one complete, consistent build.
    pub fn graph(&self) -> Arc<TopologyGraph> {
        self.store.graph()
    }

    /// Watch channel of whole-graph replacements, for the renderer.
    pub fn subscribe(&self) -> watch::Receiver<Arc<TopologyGraph>> {
        self.store.subscribe()
    }
}
