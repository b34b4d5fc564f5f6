use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Config;
use crate::extractor::{CandidateFile, CronGroupIndexer, ExtractionMap, FileIndexer, FileType};
use crate::index::GlobalIndex;
use crate::metrics;

/// On-disk snapshot of a built index. A version mismatch against the
/// current extraction rules invalidates the whole snapshot.
#[derive(Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub files: HashMap<String, ExtractionMap>,
}

pub struct IndexEngine {
    indexer: Box<dyn FileIndexer>,
    index: GlobalIndex,
    enabled: bool,
}

impl IndexEngine {
    pub fn new(config: &Config) -> Self {
        Self {
            indexer: Box::new(CronGroupIndexer),
            index: GlobalIndex::new(),
            enabled: config.enable_cron_groups,
        }
    }

    /// Swap in a different per-file indexer.
    pub fn with_indexer(mut self, indexer: Box<dyn FileIndexer>) -> Self {
        self.indexer = indexer;
        self
    }

    pub fn index(&self) -> &GlobalIndex {
        &self.index
    }

    pub fn version(&self) -> u32 {
        self.indexer.version()
    }

    /// Walk `root`, extract every eligible file in parallel and merge the
    /// per-file results. Returns the number of files extracted.
    pub fn scan(&self, root: &Path) -> usize {
        let candidates: Vec<PathBuf> = WalkDir::new(root)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| self.is_candidate(path))
            .collect();

        tracing::info!(
            "scanning {} candidate files under {}",
            candidates.len(),
            root.display()
        );

        let results: Vec<(PathBuf, ExtractionMap)> = candidates
            .into_par_iter()
            .filter_map(|path| self.extract_path(&path).map(|map| (path, map)))
            .collect();

        let count = results.len();
        for (path, map) in results {
            self.index.insert(path, map);
        }
        count
    }

    /// Re-extract one file after a change event. Files that stopped being
    /// readable lose whatever entries they had.
    pub fn update_file(&self, path: &Path) {
        if !self.is_candidate(path) {
            return;
        }
        match self.extract_path(path) {
            Some(map) => self.index.insert(path.to_path_buf(), map),
            None => self.index.remove_file(path),
        }
    }

    pub fn remove_file(&self, path: &Path) {
        self.index.remove_file(path);
    }

    fn is_candidate(&self, path: &Path) -> bool {
        self.indexer.eligible(path, FileType::from_path(path))
    }

    fn extract_path(&self, path: &Path) -> Option<ExtractionMap> {
        let _timer = metrics::Timer::new();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!("failed to read {}: {}", path.display(), err);
                return None;
            }
        };
        let file = CandidateFile::new(path.to_path_buf(), text);
        let map = self.indexer.extract(&file, self.enabled);
        tracing::debug!("extracted {} groups from {}", map.len(), path.display());
        metrics::file_indexed(map.is_empty());
        Some(map)
    }

    /// Write the current index to `path` as JSON.
    pub fn save_snapshot(&self, path: &Path) -> io::Result<()> {
        let snapshot = Snapshot {
            version: self.indexer.version(),
            files: self.index.to_files(),
        };
        let data = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, data)
    }

    /// Load a snapshot into the index. Returns false without touching the
    /// index when the snapshot is missing, corrupt, or was built by a
    /// different extraction version, so the next scan rebuilds from scratch.
    /// Entries whose declaring file vanished or stopped being eligible
    /// while the engine was down are dropped; no watcher event will ever
    /// fire for those.
    pub fn load_snapshot(&self, path: &Path) -> bool {
        let Ok(data) = fs::read_to_string(path) else {
            return false;
        };
        let snapshot: Snapshot = match serde_json::from_str(&data) {
            Ok(s) => s,
            Err(err) => {
                tracing::warn!("ignoring corrupt snapshot {}: {}", path.display(), err);
                return false;
            }
        };
        if snapshot.version != self.indexer.version() {
            tracing::info!(
                "snapshot version {} != current {}, rebuilding",
                snapshot.version,
                self.indexer.version()
            );
            return false;
        }
        for (file, map) in snapshot.files {
            let file = PathBuf::from(file);
            if !file.exists() || !self.is_candidate(&file) {
                tracing::debug!("dropping stale snapshot entry {}", file.display());
                continue;
            }
            self.index.insert(file, map);
        }
        true
    }
}
