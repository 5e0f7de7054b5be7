//! Directory listing shared by the corpus collaborators.

use crate::error::{CorpusError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)").expect("leading number regex should compile"));

/// Leading numeric token of a filename, if any.
pub fn leading_number(name: &str) -> Option<u64> {
    LEADING_NUMBER
        .captures(name)
        .and_then(|caps| caps[1].parse().ok())
}

/// Regular files in `dir`, ordered by their leading number.
///
/// Hidden files (`.DS_Store` and friends) are skipped. Names without a
/// leading number sort after numbered ones; ties fall back to the name.
pub fn sorted_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(CorpusError::FolderNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && !is_hidden(&path) {
            files.push(path);
        }
    }

    files.sort_by_cached_key(|path| {
        let name = file_name(path);
        (leading_number(&name).unwrap_or(u64::MAX), name)
    });

    Ok(files)
}

/// Lossy filename of a path, empty if it has none.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Check if a path has one of `extensions` (case-insensitive)
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(OsStr::to_str)
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}
