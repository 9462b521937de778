//! Layout engine tests
//!
//! Covers rank assignment, separation, determinism, and position reuse
//! across incremental rebuilds.

use serde_json::json;
use topograph::config::Config;
use topograph::graph::TopologyEngine;
use topograph::models::Snapshot;

fn snapshot() -> Snapshot {
    serde_json::from_value(json!([
        {
            "name": "default",
            "status": "Active",
            "resources": {
                "apps.v1/deployments": [
                    {"kind": "Deployment", "metadata": {"name": "web"}}
                ],
                ".v1/services": [
                    {"kind": "Service", "metadata": {"name": "web"}}
                ]
            }
        },
        {
            "name": "staging",
            "status": "Active",
            "resources": {
                ".v1/configmaps": [
                    {"kind": "ConfigMap", "metadata": {"name": "settings"}}
                ]
            }
        }
    ]))
    .unwrap()
}

#[test]
fn test_rebuild_positions_all_nodes() {
    let mut engine = TopologyEngine::new(&Config::default());
    let graph = engine.rebuild(&snapshot());
    assert!(!graph.nodes.is_empty());
    for node in &graph.nodes {
        assert!(node.position.is_some(), "node {} unpositioned", node.key);
    }
}

#[test]
fn test_layers_run_left_to_right() {
    let config = Config::default();
    let mut engine = TopologyEngine::new(&config);
    let graph = engine.rebuild(&snapshot());

    let x_of = |kind: &str| {
        graph
            .nodes
            .iter()
            .find(|n| n.kind == kind && n.key.contains("default"))
            .unwrap()
            .position
            .unwrap()
            .x
    };

    // Rank 0: namespace. Rank 1: raw resources. Rank 2: synthetics.
    assert_eq!(x_of("Namespace"), 0.0);
    assert_eq!(x_of("Deployment"), config.layout.rank_separation);
    assert_eq!(x_of("Service"), config.layout.rank_separation);
    assert_eq!(x_of("ReplicaSet"), 2.0 * config.layout.rank_separation);
    assert_eq!(x_of("Endpoints"), 2.0 * config.layout.rank_separation);
}

#[test]
fn test_minimum_separation_within_a_rank() {
    let config = Config::default();
    let mut engine = TopologyEngine::new(&config);
    let graph = engine.rebuild(&snapshot());

    let default_nodes: Vec<_> = graph
        .nodes
        .iter()
        .filter(|n| n.key.starts_with("ns:default"))
        .collect();

    for a in &default_nodes {
        for b in &default_nodes {
            if a.key == b.key {
                continue;
            }
            let pa = a.position.unwrap();
            let pb = b.position.unwrap();
            if pa.x == pb.x {
                assert!(
                    (pa.y - pb.y).abs() >= config.layout.node_separation,
                    "{} and {} overlap",
                    a.key,
                    b.key
                );
            }
        }
    }
}

#[test]
fn test_namespace_blocks_do_not_overlap() {
    let config = Config::default();
    let mut engine = TopologyEngine::new(&config);
    let graph = engine.rebuild(&snapshot());

    let max_default_y = graph
        .nodes
        .iter()
        .filter(|n| n.key.starts_with("ns:default"))
        .map(|n| n.position.unwrap().y)
        .fold(f64::MIN, f64::max);
    let min_staging_y = graph
        .nodes
        .iter()
        .filter(|n| n.key.starts_with("ns:staging"))
        .map(|n| n.position.unwrap().y)
        .fold(f64::MAX, f64::min);

    assert!(min_staging_y > max_default_y);
}

#[test]
fn test_layout_is_deterministic_across_engines() {
    let config = Config::default();
    let first = TopologyEngine::new(&config).rebuild(&snapshot());
    let second = TopologyEngine::new(&config).rebuild(&snapshot());

    assert_eq!(first.nodes.len(), second.nodes.len());
    for (a, b) in first.nodes.iter().zip(second.nodes.iter()) {
        assert_eq!(a.key, b.key);
        assert_eq!(a.position, b.position, "position drift for {}", a.key);
    }
}

#[test]
fn test_unchanged_namespace_keeps_positions_when_a_later_one_changes() {
    let mut engine = TopologyEngine::new(&Config::default());
    let first = engine.rebuild(&snapshot());

    let mut changed = snapshot();
    changed[1].resources.get_mut(".v1/configmaps").unwrap().push(
        serde_json::from_value(json!({"kind": "ConfigMap", "metadata": {"name": "extra"}}))
            .unwrap(),
    );
    let second = engine.rebuild(&changed);

    for node in first.nodes.iter().filter(|n| n.key.starts_with("ns:default")) {
        let again = second.get(&node.key).unwrap();
        assert_eq!(
            node.position, again.position,
            "unchanged namespace moved: {}",
            node.key
        );
    }
}

#[test]
fn test_custom_separation_constants_are_honored() {
    let mut config = Config::default();
    config.layout.rank_separation = 300.0;
    config.layout.node_separation = 50.0;

    let mut engine = TopologyEngine::new(&config);
    let graph = engine.rebuild(&snapshot());

    let deployment = graph
        .nodes
        .iter()
        .find(|n| n.kind == "Deployment")
        .unwrap();
    assert_eq!(deployment.position.unwrap().x, 300.0);
}
