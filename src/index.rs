use dashmap::DashMap;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::extractor::ExtractionMap;

/// Concurrent group-id index. Entries are keyed by declaring file so a
/// file's whole result is always replaced as one unit and a reader never
/// observes a half-written extraction.
#[derive(Default)]
pub struct GlobalIndex {
    files: DashMap<PathBuf, ExtractionMap>,
}

impl GlobalIndex {
    pub fn new() -> Self {
        Self {
            files: DashMap::new(),
        }
    }

    /// Replace `path`'s entry with a fresh extraction result. An empty map
    /// still replaces, clearing ids the file no longer declares.
    pub fn insert(&self, path: PathBuf, map: ExtractionMap) {
        self.files.insert(path, map);
    }

    pub fn remove_file(&self, path: &Path) {
        self.files.remove(path);
    }

    /// Declaring path for a group id. When several files declare the same
    /// id, which one wins depends on iteration order.
    pub fn lookup(&self, group_id: &str) -> Option<String> {
        for entry in self.files.iter() {
            if let Some(path) = entry.value().get(group_id) {
                return Some(path.clone());
            }
        }
        None
    }

    /// All known group ids, sorted and deduplicated, for completion.
    pub fn group_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .files
            .iter()
            .flat_map(|e| e.value().keys().cloned().collect::<Vec<_>>())
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    /// Number of files currently contributing entries. Files whose last
    /// extraction came up empty are tracked for replacement but not counted.
    pub fn file_count(&self) -> usize {
        self.files.iter().filter(|e| !e.value().is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.files.iter().all(|e| e.value().is_empty())
    }

    /// Flatten into per-file maps for snapshotting.
    pub fn to_files(&self) -> HashMap<String, ExtractionMap> {
        self.files
            .iter()
            .map(|e| (e.key().display().to_string(), e.value().clone()))
            .collect()
    }
}
