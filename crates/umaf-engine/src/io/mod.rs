use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Result, UmafError};

/// Read a source document's raw bytes
pub fn read_source(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(UmafError::NotFound(path.to_path_buf()));
    }
    Ok(fs::read(path)?)
}

/// Write `content` to `path` via a temp file in the same directory that is
/// persisted over the target, creating parent directories as needed.
/// Readers never see a half-written file.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|err| err.error)?;
    Ok(())
}

/// Scan for input documents with one of `extensions` (case-insensitive)
pub fn scan_inputs(input_dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    if !input_dir.is_dir() {
        return Err(UmafError::InvalidInputDir(format!(
            "{} is not a directory",
            input_dir.display()
        )));
    }

    let mut files = Vec::new();
    scan_directory_recursive(input_dir, extensions, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(dir: &Path, extensions: &[String], files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let hidden = path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with('.'));
        if hidden {
            continue;
        }

        if path.is_dir() {
            scan_directory_recursive(&path, extensions, files)?;
        } else if let Some(ext) = path.extension()
            && extensions
                .iter()
                .any(|wanted| ext.to_string_lossy().eq_ignore_ascii_case(wanted))
        {
            files.push(path);
        }
    }
    Ok(())
}
