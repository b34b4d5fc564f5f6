use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Schema version of the extraction rules. Must be bumped whenever the
/// traversal or attribute handling changes output for the same input, so
/// persisted indexes get rebuilt wholesale.
pub const INDEX_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Xml,
    Other,
}

impl FileType {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xml") => FileType::Xml,
            _ => FileType::Other,
        }
    }
}

/// One file offered to the engine: path, already-loaded text, type tag.
/// Supplied per extraction call and never retained by the indexer.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    pub path: PathBuf,
    pub text: String,
    pub file_type: FileType,
}

impl CandidateFile {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let path = path.into();
        let file_type = FileType::from_path(&path);
        Self {
            path,
            text: text.into(),
            file_type,
        }
    }
}

/// Per-file extraction result: group id to declaring file path.
pub type ExtractionMap = HashMap<String, String>;

/// Narrow seam between the engine and a per-file indexer.
pub trait FileIndexer: Send + Sync {
    /// Name/type filter, checked before any content is read or parsed.
    fn eligible(&self, path: &Path, file_type: FileType) -> bool;

    /// Extract index entries from one file. Total: malformed input yields
    /// an empty map, never an error.
    fn extract(&self, file: &CandidateFile, enabled: bool) -> ExtractionMap;

    fn version(&self) -> u32;
}

/// Collects cron group ids declared in `cron_groups.xml` files. The result
/// feeds group-name completion when referencing cron groups elsewhere.
pub struct CronGroupIndexer;

impl FileIndexer for CronGroupIndexer {
    fn eligible(&self, path: &Path, file_type: FileType) -> bool {
        file_type == FileType::Xml
            && path.file_stem().and_then(|s| s.to_str()) == Some("cron_groups")
    }

    fn extract(&self, file: &CandidateFile, enabled: bool) -> ExtractionMap {
        let mut map = ExtractionMap::new();

        if !enabled {
            return map;
        }

        if file.file_type != FileType::Xml {
            return map;
        }

        let doc = match roxmltree::Document::parse(&file.text) {
            Ok(doc) => doc,
            Err(err) => {
                tracing::debug!("unparseable {}: {}", file.path.display(), err);
                return map;
            }
        };

        let declaring_path = file.path.display().to_string();

        // group declarations sit exactly one level under <config>
        for config in doc.root().children().filter(|n| n.is_element()) {
            if config.tag_name().name() != "config" {
                continue;
            }
            for group in config.children().filter(|n| n.is_element()) {
                if group.tag_name().name() != "group" {
                    continue;
                }
                if let Some(id) = group.attribute("id") {
                    map.insert(id.to_string(), declaring_path.clone());
                }
            }
        }

        map
    }

    fn version(&self) -> u32 {
        INDEX_VERSION
    }
}
