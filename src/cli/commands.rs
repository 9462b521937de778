//! CLI command handlers

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

use crate::config::schema::Config;
use crate::graph::TopologyEngine;
use crate::models::Snapshot;

/// Read a snapshot from a file, or stdin when the path is `-`.
pub fn read_snapshot(path: &Path) -> Result<Snapshot> {
    let raw = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read snapshot from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot file {}", path.display()))?
    };
    serde_json::from_str(&raw).context("Failed to parse snapshot JSON")
}

/// Build and lay out a snapshot, printing the positioned graph as JSON.
pub fn handle_dump(path: &Path, config: &Config) -> Result<()> {
    let snapshot = read_snapshot(path)?;
    let mut engine = TopologyEngine::new(config);
    let graph = engine.rebuild(&snapshot);
    println!("{}", serde_json::to_string_pretty(&graph)?);
    Ok(())
}

/// Validate a snapshot and report what the build would produce.
pub fn handle_check(path: &Path, config: &Config) -> Result<()> {
    let snapshot = read_snapshot(path)?;
    let items: usize = snapshot.iter().map(|record| record.item_count()).sum();

    let mut engine = TopologyEngine::new(config);
    let graph = engine.rebuild(&snapshot);

    println!("namespaces:     {}", snapshot.len());
    println!("resource items: {}", items);
    println!("graph nodes:    {}", graph.nodes.len());
    println!("graph edges:    {}", graph.edges.len());

    if !graph.edges_are_consistent() {
        anyhow::bail!("graph has edges referencing missing nodes");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_snapshot_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": "default", "status": "Active", "resources": {{}}}}]"#
        )
        .unwrap();

        let snapshot = read_snapshot(file.path()).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].name, "default");
    }

    #[test]
    fn test_read_snapshot_rejects_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        assert!(read_snapshot(file.path()).is_err());
    }
}
