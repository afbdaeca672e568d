//! Shared helpers for the end-to-end pipeline tests.

#![allow(dead_code)]

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Write one NDJSON file from raw lines, creating parent directories.
pub fn write_ndjson(dir: &Path, name: &str, lines: &[&str]) {
    fs::create_dir_all(dir).unwrap();
    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(dir.join(name), content).unwrap();
}

/// Read every row of a written table back, across all partition files.
pub fn read_table<T: DeserializeOwned>(table_dir: &Path) -> Vec<T> {
    let mut rows = Vec::new();
    for entry in WalkDir::new(table_dir).sort_by_file_name() {
        let entry = entry.unwrap();
        if !entry.file_type().is_file() {
            continue;
        }
        let text = fs::read_to_string(entry.path()).unwrap();
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            rows.push(serde_json::from_str(line).unwrap());
        }
    }
    rows
}

/// All partition directories of a table, relative to the table root.
pub fn partition_dirs(table_dir: &Path) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = WalkDir::new(table_dir)
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .parent()
                .unwrap()
                .strip_prefix(table_dir)
                .unwrap()
                .to_path_buf()
        })
        .collect();
    dirs.sort();
    dirs.dedup();
    dirs
}
