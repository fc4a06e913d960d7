use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use crate::engine::Engine;
use crate::models::Envelope;
use crate::router::route_extension;

/// Create a temporary directory for test inputs and outputs
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a file (and its parent directories) under `dir`
pub fn create_test_file(dir: &TempDir, relative: &str, content: &str) -> PathBuf {
    let file_path = dir.path().join(relative);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&file_path, content).unwrap();
    file_path
}

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn test_engine() -> Engine {
    Engine::new().with_created_at(fixed_time())
}

/// Envelope for `text` as if read from a file with extension `ext`
pub fn envelope_for(text: &str, ext: &str) -> Envelope {
    let route = route_extension(ext);
    test_engine()
        .transform_text(text, route.media_type, route.semantic_media_type, &format!("doc.{ext}"))
        .unwrap()
}
