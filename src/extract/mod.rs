//! Loaders for the two input feeds.
//!
//! Both feeds are directory trees of newline-delimited JSON files, read
//! recursively. An unreadable root is fatal; a malformed record is not.

use crate::context::EtlContext;
use crate::schema::{self, RawCatalogRecord, RawLogEvent};
use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::info;
use walkdir::WalkDir;

/// Collect every line of every `.json` file under `root`, recursively.
/// Files are visited in path order; blank lines are skipped.
fn collect_ndjson_lines(root: &Path) -> Result<Vec<String>> {
    if !root.is_dir() {
        bail!("{} is not a valid directory.", root.display());
    }
    let mut lines = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let text = std::fs::read_to_string(entry.path())
            .with_context(|| format!("Failed to read {}", entry.path().display()))?;
        lines.extend(
            text.lines()
                .filter(|l| !l.trim().is_empty())
                .map(str::to_owned),
        );
    }
    Ok(lines)
}

/// Read the catalog feed and return its schema-conforming records.
pub fn load_catalog(ctx: &EtlContext, root: &Path) -> Result<Vec<RawCatalogRecord>> {
    info!("Reading catalog feed from {}...", root.display());
    let lines = collect_ndjson_lines(root)?;
    let validated = schema::validate_batch::<RawCatalogRecord>(ctx, "catalog", lines);
    Ok(validated.records)
}

/// Read the event-log feed and return its schema-conforming song-play
/// events. Events on any other page are not plays and are excluded.
pub fn load_events(ctx: &EtlContext, root: &Path) -> Result<Vec<RawLogEvent>> {
    info!("Reading event log from {}...", root.display());
    let lines = collect_ndjson_lines(root)?;
    let validated = schema::validate_batch::<RawLogEvent>(ctx, "log", lines);
    Ok(validated
        .records
        .into_iter()
        .filter(RawLogEvent::is_song_play)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn collects_lines_recursively() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("2018").join("11");
        fs::create_dir_all(&sub).unwrap();
        write_file(dir.path(), "a.json", "{\"x\":1}\n\n{\"x\":2}\n");
        write_file(&sub, "b.json", "{\"x\":3}\n");
        write_file(dir.path(), "notes.txt", "ignored\n");

        let lines = collect_ndjson_lines(dir.path()).unwrap();
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn missing_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(collect_ndjson_lines(&missing).is_err());
    }

    #[test]
    fn load_events_keeps_only_song_plays() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            "events.json",
            concat!(
                "{\"page\":\"NextSong\",\"ts\":1542000000000,\"userId\":\"7\"}\n",
                "{\"page\":\"Home\",\"ts\":1542000001000,\"userId\":\"7\"}\n",
                "{\"page\":\"NextSong\",\"ts\":\"bad\"}\n",
            ),
        );
        let ctx = EtlContext::with_defaults().unwrap();
        let events = load_events(&ctx, dir.path()).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].ts, Some(1542000000000));
    }
}
