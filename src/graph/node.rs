//! Graph node and edge types
//!
//! Nodes carry a structured [`NodeId`] alongside the delimited string
//! key. The string form exists only as a cache/map key and for the
//! renderer; addressing (details, edit, logs, delete) always goes
//! through the structured form so a `:` inside a resource name can
//! never corrupt a lookup.

use serde::Serialize;
use std::fmt;

/// Structured node identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "scope", rename_all = "camelCase")]
pub enum NodeId {
    /// Root node for one namespace.
    Namespace { name: String },
    /// One raw resource from the snapshot. `index` is the positional
    /// counter assigned during the build pass; it disambiguates the
    /// same kind+name appearing in more than one bucket.
    Resource {
        namespace: String,
        kind: String,
        name: String,
        index: usize,
    },
    /// A rule-derived node with no 1:1 backing resource.
    Synthetic {
        parent: Box<NodeId>,
        suffix: String,
        kind: String,
    },
}

impl NodeId {
    pub fn namespace(name: impl Into<String>) -> Self {
        NodeId::Namespace { name: name.into() }
    }

    pub fn synthetic(parent: NodeId, suffix: &str, kind: &str) -> Self {
        NodeId::Synthetic {
            parent: Box::new(parent),
            suffix: suffix.to_string(),
            kind: kind.to_string(),
        }
    }

    /// The delimited string form used as map key and edge endpoint.
    ///
    /// `ns:{name}` for namespaces,
    /// `ns:{namespace}:{kind}:{name}:{index}` for raw resources,
    /// `{parentKey}:{suffix}` for synthetic nodes.
    pub fn key(&self) -> String {
        match self {
            NodeId::Namespace { name } => format!("ns:{}", name),
            NodeId::Resource {
                namespace,
                kind,
                name,
                index,
            } => format!("ns:{}:{}:{}:{}", namespace, kind, name, index),
            NodeId::Synthetic { parent, suffix, .. } => {
                format!("{}:{}", parent.key(), suffix)
            }
        }
    }

    /// The kind tag this node displays.
    pub fn kind(&self) -> &str {
        match self {
            NodeId::Namespace { .. } => "Namespace",
            NodeId::Resource { kind, .. } => kind,
            NodeId::Synthetic { kind, .. } => kind,
        }
    }

    /// Addressing contract for the context-menu collaborators.
    ///
    /// Synthetic nodes have no backing resource and return `None`;
    /// everything else yields the (namespace, kind, name) triple the
    /// deletion endpoint and the details/edit/log panels expect.
    pub fn target(&self) -> Option<DeleteTarget> {
        match self {
            NodeId::Namespace { name } => Some(DeleteTarget {
                namespace: name.clone(),
                kind: "Namespace".to_string(),
                name: name.clone(),
            }),
            NodeId::Resource {
                namespace,
                kind,
                name,
                ..
            } => Some(DeleteTarget {
                namespace: namespace.clone(),
                kind: kind.clone(),
                name: name.clone(),
            }),
            NodeId::Synthetic { .. } => None,
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// (namespace, kind, name) triple handed to external collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteTarget {
    pub namespace: String,
    pub kind: String,
    pub name: String,
}

/// Coarse node health shown by the renderer.
///
/// `Active` means some status condition has type `Available` with
/// status `True`. This is deliberately not full per-kind condition
/// evaluation; the simplified contract is part of the interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Health {
    Active,
    Inactive,
}

/// Layout position in pixels, left-to-right layered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A node in the topology graph.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    /// Structured identity; `key` is its memoized string form.
    pub id: NodeId,
    pub key: String,
    /// Display label (resource name, or kind for synthetic nodes).
    pub label: String,
    pub kind: String,
    /// Icon class for the renderer, derived from the kind category.
    pub icon: String,
    /// Humanized age; absent for synthetic and namespace nodes.
    pub age: Option<String>,
    pub health: Health,
    /// Set by the layout engine.
    pub position: Option<Position>,
}

impl GraphNode {
    /// Addressing triple, `None` for synthetic nodes.
    pub fn target(&self) -> Option<DeleteTarget> {
        self.id.target()
    }
}

/// A directed relationship between two nodes.
///
/// Both endpoints must resolve to nodes present in the same build; the
/// builder and the store uphold that invariant.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl GraphEdge {
    pub fn between(source: &str, target: &str) -> Self {
        Self {
            id: format!("{}->{}", source, target),
            source: source.to_string(),
            target: target.to_string(),
        }
    }

    /// True if either endpoint is in `keys`.
    pub fn touches(&self, keys: &std::collections::HashSet<String>) -> bool {
        keys.contains(&self.source) || keys.contains(&self.target)
    }
}
