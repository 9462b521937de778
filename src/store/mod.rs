//! Single-writer graph store
//!
//! All graph-state transitions flow through one actor task: snapshot
//! rebuilds and cascade removals are commands on a single mpsc queue,
//! so their mutations can never interleave. The canonical graph is
//! published as whole-state `Arc<TopologyGraph>` replacements over a
//! watch channel, which means readers never observe a partially
//! updated graph and no explicit locking is needed anywhere.

use anyhow::{anyhow, Result};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};

use crate::config::schema::Config;
use crate::graph::{TopologyEngine, TopologyGraph};
use crate::models::NamespaceResource;

enum StoreCommand {
    Apply {
        snapshot: Vec<NamespaceResource>,
        done: Option<oneshot::Sender<()>>,
    },
    Prune {
        keys: HashSet<String>,
        done: oneshot::Sender<usize>,
    },
}

/// Handle to the store actor. Clones share the same actor.
#[derive(Clone)]
pub struct GraphStore {
    commands: mpsc::UnboundedSender<StoreCommand>,
    view: watch::Receiver<Arc<TopologyGraph>>,
}

impl GraphStore {
    /// Spawn the store actor. The actor owns the build engine (and so
    /// the namespace cache) and runs until every handle is dropped.
    pub fn spawn(config: &Config) -> Self {
        let (commands, mut rx) = mpsc::unbounded_channel();
        let (view_tx, view) = watch::channel(Arc::new(TopologyGraph::new()));
        let mut engine = TopologyEngine::new(config);

        tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                match command {
                    StoreCommand::Apply { snapshot, done } => {
                        let graph = engine.rebuild(&snapshot);
                        let _ = view_tx.send(Arc::new(graph));
                        if let Some(done) = done {
                            let _ = done.send(());
                        }
                    }
                    StoreCommand::Prune { keys, done } => {
                        let current = view_tx.borrow().clone();
                        let next = engine.prune(&current, &keys);
                        let removed = current.nodes.len() - next.nodes.len();
                        tracing::debug!(removed, edges = next.edges.len(), "pruned graph");
                        let _ = view_tx.send(Arc::new(next));
                        let _ = done.send(removed);
                    }
                }
            }
            tracing::debug!("graph store shut down");
        });

        Self { commands, view }
    }

    /// Queue a snapshot without waiting for the rebuild. Later
    /// snapshots simply queue behind earlier ones: last snapshot wins.
    pub fn apply(&self, snapshot: Vec<NamespaceResource>) -> Result<()> {
        self.commands
            .send(StoreCommand::Apply {
                snapshot,
                done: None,
            })
            .map_err(|_| anyhow!("graph store is no longer running"))
    }

    /// Apply a snapshot and wait until the new graph is published.
    pub async fn apply_and_wait(&self, snapshot: Vec<NamespaceResource>) -> Result<()> {
        let (done, ready) = oneshot::channel();
        self.commands
            .send(StoreCommand::Apply {
                snapshot,
                done: Some(done),
            })
            .map_err(|_| anyhow!("graph store is no longer running"))?;
        ready
            .await
            .map_err(|_| anyhow!("graph store dropped a rebuild"))?;
        Ok(())
    }

    /// Atomically remove the given node keys, every edge touching
    /// them, and the same keys from the build cache. Returns how many
    /// nodes were actually removed.
    pub async fn prune(&self, keys: HashSet<String>) -> Result<usize> {
        let (done, ready) = oneshot::channel();
        self.commands
            .send(StoreCommand::Prune { keys, done })
            .map_err(|_| anyhow!("graph store is no longer running"))?;
        ready
            .await
            .map_err(|_| anyhow!("graph store dropped a prune"))
    }

    /// Current graph. The Arc is a complete, consistent build.
    pub fn graph(&self) -> Arc<TopologyGraph> {
        self.view.borrow().clone()
    }

    /// Subscribe to graph replacements, for the rendering collaborator.
    pub fn subscribe(&self) -> watch::Receiver<Arc<TopologyGraph>> {
        self.view.clone()
    }
}
