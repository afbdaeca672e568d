//! Partitioned NDJSON table writer.
//!
//! Each table is staged in a temp directory next to the destination and
//! swapped in with a rename, so a crashed run never leaves a half-written
//! visible table. Partition columns become nested `col=value` directories.

use crate::context::EtlContext;
use crate::tables::PartitionKey;
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Partition values become directory names; path separators are not
/// allowed to escape the table root.
fn partition_value(value: &str) -> String {
    value.replace(['/', '\\'], "_")
}

/// Write `rows` as a full overwrite of `out_root/table`, partitioned by the
/// per-row key. An empty key writes a single unpartitioned file.
pub fn write_table<T, K>(
    ctx: &EtlContext,
    out_root: &Path,
    table: &str,
    rows: &[T],
    partition: K,
) -> Result<()>
where
    T: Serialize,
    K: Fn(&T) -> PartitionKey,
{
    fs::create_dir_all(out_root)
        .with_context(|| format!("Failed to create output root {}", out_root.display()))?;
    let staging = tempfile::Builder::new()
        .prefix(".staging-")
        .tempdir_in(out_root)
        .with_context(|| format!("Failed to create staging dir in {}", out_root.display()))?;

    let mut partitions: BTreeMap<PathBuf, Vec<String>> = BTreeMap::new();
    for row in rows {
        let mut rel = PathBuf::new();
        for (col, value) in partition(row) {
            rel.push(format!("{}={}", col, partition_value(&value)));
        }
        let line = serde_json::to_string(row).context("Failed to serialize output row")?;
        partitions.entry(rel).or_default().push(line);
    }

    for (rel, lines) in &partitions {
        let dir = staging.path().join(rel);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create partition dir {}", dir.display()))?;
        let mut content = lines.join("\n");
        content.push('\n');
        let part = dir.join("part-00000.json");
        fs::write(&part, content)
            .with_context(|| format!("Failed to write {}", part.display()))?;
    }

    let dest = out_root.join(table);
    if dest.exists() {
        fs::remove_dir_all(&dest)
            .with_context(|| format!("Failed to clear existing table {}", dest.display()))?;
    }
    let staged = staging.into_path();
    fs::rename(&staged, &dest)
        .with_context(|| format!("Failed to move table into place at {}", dest.display()))?;

    ctx.reporter().table_written(table, rows.len());
    Ok(())
}
