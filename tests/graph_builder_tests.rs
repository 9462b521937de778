//! Graph builder tests
//!
//! Covers the snapshot walk: node/edge emission, synthetic expansion,
//! id uniqueness, edge validity, and rebuild idempotency.

use std::collections::HashSet;

use serde_json::json;
use topograph::config::Config;
use topograph::graph::{GraphBuilder, NodeId, TopologyEngine};
use topograph::models::{NamespaceResource, Snapshot};

/// Namespace "default" with one Deployment (1 replica) and one Service
/// (no ingress).
fn deployment_and_service() -> Snapshot {
    serde_json::from_value(json!([
        {
            "name": "default",
            "status": "Active",
            "labels": {"kubernetes.io/metadata.name": "default"},
            "resources": {
                "apps.v1/deployments": [
                    {
                        "kind": "Deployment",
                        "apiVersion": "apps/v1",
                        "metadata": {
                            "name": "web",
                            "namespace": "default",
                            "creationTimestamp": "2024-01-01T00:00:00Z",
                            "uid": "d-1"
                        },
                        "status": {
                            "replicas": 1,
                            "conditions": [{"type": "Available", "status": "True"}]
                        }
                    }
                ],
                ".v1/services": [
                    {
                        "kind": "Service",
                        "apiVersion": "v1",
                        "metadata": {"name": "web", "namespace": "default", "uid": "s-1"}
                    }
                ]
            }
        }
    ]))
    .unwrap()
}

fn cluster_role_binding() -> Snapshot {
    serde_json::from_value(json!([
        {
            "name": "default",
            "status": "Active",
            "resources": {
                "rbac.authorization.k8s.io.v1/clusterrolebindings": [
                    {
                        "kind": "ClusterRoleBinding",
                        "apiVersion": "rbac.authorization.k8s.io/v1",
                        "metadata": {"name": "admin-binding"}
                    }
                ]
            }
        }
    ]))
    .unwrap()
}

#[test]
fn test_deployment_and_service_expansion() {
    let graph = GraphBuilder::default().build(&deployment_and_service());

    // ns + deployment + synthetic replicaset + service + synthetic endpoints
    assert_eq!(graph.nodes.len(), 5);
    assert_eq!(graph.edges.len(), 4);

    let kinds: HashSet<&str> = graph.nodes.iter().map(|n| n.kind.as_str()).collect();
    assert_eq!(
        kinds,
        HashSet::from(["Namespace", "Deployment", "ReplicaSet", "Service", "Endpoints"])
    );

    // The synthetic nodes hang off their parents, not the namespace.
    let replicaset = graph
        .nodes
        .iter()
        .find(|n| n.kind == "ReplicaSet")
        .unwrap();
    assert!(matches!(replicaset.id, NodeId::Synthetic { .. }));
    let deployment = graph.nodes.iter().find(|n| n.kind == "Deployment").unwrap();
    assert!(graph
        .edges
        .iter()
        .any(|e| e.source == deployment.key && e.target == replicaset.key));
}

#[test]
fn test_graph_is_a_tree_rooted_at_the_namespace() {
    let graph = GraphBuilder::default().build(&deployment_and_service());

    // Everything except the root is reachable from it.
    let descendants = graph.descendants_of("ns:default");
    assert_eq!(descendants.len(), graph.nodes.len() - 1);

    // Every non-root node has exactly one incoming edge.
    for node in &graph.nodes {
        let incoming = graph.edges.iter().filter(|e| e.target == node.key).count();
        if node.key == "ns:default" {
            assert_eq!(incoming, 0);
        } else {
            assert_eq!(incoming, 1, "node {} has {} parents", node.key, incoming);
        }
    }
}

#[test]
fn test_cluster_role_binding_yields_five_nodes_from_one_resource() {
    let graph = GraphBuilder::default().build(&cluster_role_binding());

    // CRB + ClusterRole + User + ServiceAccount + Group, plus the
    // namespace root.
    assert_eq!(graph.nodes.len(), 6);

    let binding = graph
        .nodes
        .iter()
        .find(|n| n.kind == "ClusterRoleBinding")
        .unwrap();
    let role_key = format!("{}:clusterrole", binding.key);
    assert!(graph.contains(&role_key));
    for subject in ["user", "serviceaccount", "group"] {
        assert!(graph.contains(&format!("{}:{}", role_key, subject)));
    }

    // The chain nests: subjects hang off the role, not the binding.
    let from_binding = graph
        .edges
        .iter()
        .filter(|e| e.source == binding.key)
        .count();
    assert_eq!(from_binding, 1);
    let from_role = graph.edges.iter().filter(|e| e.source == role_key).count();
    assert_eq!(from_role, 3);
}

#[test]
fn test_node_ids_are_unique_per_build() {
    let mut snapshot = deployment_and_service();
    snapshot.extend(cluster_role_binding().into_iter().map(|mut record| {
        record.name = "other".to_string();
        record
    }));

    let graph = GraphBuilder::default().build(&snapshot);
    let mut seen = HashSet::new();
    for node in &graph.nodes {
        assert!(seen.insert(node.key.clone()), "duplicate id {}", node.key);
    }
}

#[test]
fn test_every_edge_resolves_in_the_same_build() {
    let graph = GraphBuilder::default().build(&deployment_and_service());
    assert!(graph.edges_are_consistent());
    for edge in &graph.edges {
        assert!(graph.contains(&edge.source), "dangling source {}", edge.source);
        assert!(graph.contains(&edge.target), "dangling target {}", edge.target);
    }
}

#[test]
fn test_rebuild_from_unchanged_snapshot_is_idempotent() {
    let builder = GraphBuilder::default();
    let first = builder.build(&deployment_and_service());
    let second = builder.build(&deployment_and_service());

    let ids = |graph: &topograph::TopologyGraph| -> HashSet<String> {
        graph.nodes.iter().map(|n| n.key.clone()).collect()
    };
    let edge_ids = |graph: &topograph::TopologyGraph| -> HashSet<String> {
        graph.edges.iter().map(|e| e.id.clone()).collect()
    };
    assert_eq!(ids(&first), ids(&second));
    assert_eq!(edge_ids(&first), edge_ids(&second));
}

#[test]
fn test_engine_rebuild_is_idempotent_too() {
    let mut engine = TopologyEngine::new(&Config::default());
    let first = engine.rebuild(&deployment_and_service());
    let second = engine.rebuild(&deployment_and_service());

    let first_ids: HashSet<&str> = first.nodes.iter().map(|n| n.key.as_str()).collect();
    let second_ids: HashSet<&str> = second.nodes.iter().map(|n| n.key.as_str()).collect();
    assert_eq!(first_ids, second_ids);
}

#[test]
fn test_hidden_namespaces_are_filtered() {
    let mut snapshot = deployment_and_service();
    let hidden: NamespaceResource = serde_json::from_value(json!({
        "name": "kube-system",
        "status": "Active",
        "resources": {
            ".v1/configmaps": [
                {"kind": "ConfigMap", "metadata": {"name": "coredns"}}
            ]
        }
    }))
    .unwrap();
    snapshot.push(hidden);

    let graph = GraphBuilder::default().build(&snapshot);
    assert!(!graph.contains("ns:kube-system"));
    assert!(graph.contains("ns:default"));
}

#[test]
fn test_namespace_and_deployment_health() {
    let graph = GraphBuilder::default().build(&deployment_and_service());

    let namespace = graph.get("ns:default").unwrap();
    assert_eq!(namespace.health, topograph::Health::Active);

    let deployment = graph.nodes.iter().find(|n| n.kind == "Deployment").unwrap();
    assert_eq!(deployment.health, topograph::Health::Active);
    assert!(deployment.age.is_some());

    // The service has no Available condition: inactive by contract.
    let service = graph.nodes.iter().find(|n| n.kind == "Service").unwrap();
    assert_eq!(service.health, topograph::Health::Inactive);
}

#[test]
fn test_unknown_kind_is_kept_with_generic_classification() {
    let snapshot: Snapshot = serde_json::from_value(json!([
        {
            "name": "default",
            "status": "Active",
            "resources": {
                "example.com.v1/widgets": [
                    {"kind": "Widget", "metadata": {"name": "w1"}}
                ]
            }
        }
    ]))
    .unwrap();

    let graph = GraphBuilder::default().build(&snapshot);
    let widget = graph.nodes.iter().find(|n| n.kind == "Widget").unwrap();
    assert_eq!(widget.icon, "icon-resource");
    // No rule entry: no synthetic children either.
    assert!(graph.descendants_of(&widget.key).is_empty());
}
