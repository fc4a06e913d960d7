//! Incremental-build index: remembers what each input looked like the last
//! time it was processed, so unchanged files can be skipped.

use std::collections::BTreeMap;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use log::{debug, warn};
use parking_lot::Mutex;
use relative_path::{RelativePath, RelativePathBuf};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::io::write_atomic;

pub const INDEX_FILE_NAME: &str = ".umaf-cache.json";
const INDEX_VERSION: u32 = 1;

/// What a file looked like when it was last processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub modified_secs: u64,
    pub size_bytes: u64,
    pub success: bool,
}

impl CacheEntry {
    pub fn from_metadata(metadata: &Metadata, success: bool) -> Self {
        Self {
            modified_secs: modified_secs(metadata),
            size_bytes: metadata.len(),
            success,
        }
    }

    fn matches(&self, metadata: &Metadata) -> bool {
        self.modified_secs == modified_secs(metadata) && self.size_bytes == metadata.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheIndex {
    pub version: u32,
    pub files: BTreeMap<RelativePathBuf, CacheEntry>,
}

impl Default for CacheIndex {
    fn default() -> Self {
        Self {
            version: INDEX_VERSION,
            files: BTreeMap::new(),
        }
    }
}

/// Shared by all batch workers; every read and write is one critical section.
#[derive(Debug)]
pub struct IncrementalCache {
    index_path: PathBuf,
    index: Mutex<CacheIndex>,
}

impl IncrementalCache {
    /// Loads the index at `index_path`. A missing index is empty; an
    /// unreadable one is logged and also treated as empty.
    pub fn load(index_path: impl Into<PathBuf>) -> Self {
        let index_path = index_path.into();
        let index = match std::fs::read_to_string(&index_path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|err| {
                warn!(
                    "ignoring corrupt cache index {}: {err}",
                    index_path.display()
                );
                CacheIndex::default()
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => CacheIndex::default(),
            Err(err) => {
                warn!("cannot read cache index {}: {err}", index_path.display());
                CacheIndex::default()
            }
        };
        debug!(
            "cache index {} has {} entries",
            index_path.display(),
            index.files.len()
        );
        Self {
            index_path,
            index: Mutex::new(index),
        }
    }

    /// Loads the index kept in `output_dir`.
    pub fn in_output_dir(output_dir: &Path) -> Self {
        Self::load(output_dir.join(INDEX_FILE_NAME))
    }

    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    /// True when `key` is new, failed last time, or changed mtime or size.
    pub fn should_process(&self, key: &RelativePath, metadata: &Metadata) -> bool {
        let index = self.index.lock();
        match index.files.get(key) {
            Some(entry) => !entry.success || !entry.matches(metadata),
            None => true,
        }
    }

    pub fn did_process(&self, key: &RelativePath, metadata: &Metadata, success: bool) {
        let entry = CacheEntry::from_metadata(metadata, success);
        self.index.lock().files.insert(key.to_relative_path_buf(), entry);
    }

    pub fn len(&self) -> usize {
        self.index.lock().files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Persists the index. Called once, after a batch has finished.
    pub fn save(&self) -> Result<()> {
        let json = {
            let index = self.index.lock();
            serde_json::to_string_pretty(&*index)?
        };
        write_atomic(&self.index_path, json.as_bytes())
    }
}

fn modified_secs(metadata: &Metadata) -> u64 {
    metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_dir, create_test_file};
    use std::fs;

    #[test]
    fn test_new_file_should_be_processed() {
        let dir = create_test_dir();
        let path = create_test_file(&dir, "a.md", "# A");
        let cache = IncrementalCache::in_output_dir(dir.path());

        let metadata = fs::metadata(&path).unwrap();

        assert!(cache.should_process(RelativePath::new("a.md"), &metadata));
    }

    #[test]
    fn test_unchanged_success_is_skipped_but_failure_is_retried() {
        let dir = create_test_dir();
        let ok = create_test_file(&dir, "ok.md", "# ok");
        let bad = create_test_file(&dir, "bad.md", "# bad");
        let cache = IncrementalCache::in_output_dir(dir.path());

        cache.did_process(RelativePath::new("ok.md"), &fs::metadata(&ok).unwrap(), true);
        cache.did_process(RelativePath::new("bad.md"), &fs::metadata(&bad).unwrap(), false);

        assert!(!cache.should_process(RelativePath::new("ok.md"), &fs::metadata(&ok).unwrap()));
        assert!(cache.should_process(RelativePath::new("bad.md"), &fs::metadata(&bad).unwrap()));
    }

    #[test]
    fn test_size_change_triggers_processing() {
        let dir = create_test_dir();
        let path = create_test_file(&dir, "a.md", "# A");
        let cache = IncrementalCache::in_output_dir(dir.path());
        cache.did_process(RelativePath::new("a.md"), &fs::metadata(&path).unwrap(), true);

        fs::write(&path, "# A\n\nmore text").unwrap();

        assert!(cache.should_process(RelativePath::new("a.md"), &fs::metadata(&path).unwrap()));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = create_test_dir();
        let path = create_test_file(&dir, "docs/a.md", "# A");
        let cache = IncrementalCache::in_output_dir(dir.path());
        cache.did_process(RelativePath::new("docs/a.md"), &fs::metadata(&path).unwrap(), true);

        cache.save().unwrap();
        let reloaded = IncrementalCache::in_output_dir(dir.path());

        assert_eq!(reloaded.len(), 1);
        assert!(!reloaded.should_process(
            RelativePath::new("docs/a.md"),
            &fs::metadata(&path).unwrap()
        ));
    }

    #[test]
    fn test_corrupt_index_is_treated_as_empty() {
        let dir = create_test_dir();
        create_test_file(&dir, INDEX_FILE_NAME, "{ not json");

        let cache = IncrementalCache::in_output_dir(dir.path());

        assert!(cache.is_empty());
    }
}
