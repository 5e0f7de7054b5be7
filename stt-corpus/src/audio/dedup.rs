//! Content-hash deduplication of audio files.

use super::progress_bar;
use crate::error::Result;
use crate::files::{file_name, has_extension, sorted_files};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Outcome of a deduplication pass.
#[derive(Debug, Default)]
pub struct DedupReport {
    /// Audio files hashed
    pub scanned: usize,
    /// Duplicates deleted (or that would be, in a dry run)
    pub removed: Vec<PathBuf>,
}

/// SHA-256 of a file's full content, as lowercase hex.
pub fn compute_file_hash(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;

    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Delete every audio file in `dir` whose content matches an earlier one.
///
/// Files are visited in leading-number order, so the lowest-numbered file of
/// each set of duplicates is the one kept. With `dry_run` nothing is deleted.
pub fn remove_duplicates(dir: &Path, extensions: &[String], dry_run: bool) -> Result<DedupReport> {
    let files: Vec<PathBuf> = sorted_files(dir)?
        .into_iter()
        .filter(|path| has_extension(path, extensions))
        .collect();

    let pb = progress_bar(files.len(), "Hashing");
    let mut seen = HashSet::new();
    let mut report = DedupReport::default();

    for path in files {
        pb.set_message(file_name(&path));
        let hash = compute_file_hash(&path)?;
        report.scanned += 1;
        pb.inc(1);

        if seen.insert(hash) {
            continue;
        }

        if dry_run {
            log::info!("Would delete duplicate: {}", path.display());
        } else {
            fs::remove_file(&path)?;
            log::info!("Deleted duplicate: {}", path.display());
        }
        report.removed.push(path);
    }

    pb.finish_and_clear();
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CorpusError;
    use tempfile::TempDir;

    fn audio_exts() -> Vec<String> {
        vec!["mp3".to_string(), "wav".to_string()]
    }

    #[test]
    fn test_hash_is_content_based() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.bin");
        let b = temp_dir.path().join("b.bin");
        let c = temp_dir.path().join("c.bin");
        fs::write(&a, b"same bytes").unwrap();
        fs::write(&b, b"same bytes").unwrap();
        fs::write(&c, b"other bytes").unwrap();

        let hash = compute_file_hash(&a).unwrap();
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, compute_file_hash(&b).unwrap());
        assert_ne!(hash, compute_file_hash(&c).unwrap());
    }

    #[test]
    fn test_hash_spans_multiple_blocks() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.bin");
        let b = temp_dir.path().join("b.bin");
        let mut data = vec![7u8; 20_000];
        fs::write(&a, &data).unwrap();
        data[19_999] = 8;
        fs::write(&b, &data).unwrap();

        assert_ne!(compute_file_hash(&a).unwrap(), compute_file_hash(&b).unwrap());
    }

    #[test]
    fn test_keeps_first_and_removes_rest() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        fs::write(dir.join("1.mp3"), b"take one").unwrap();
        fs::write(dir.join("2.mp3"), b"take one").unwrap();
        fs::write(dir.join("3.WAV"), b"take one").unwrap();
        fs::write(dir.join("4.mp3"), b"take two").unwrap();
        fs::write(dir.join("notes.txt"), b"take one").unwrap();

        let report = remove_duplicates(dir, &audio_exts(), false).unwrap();

        assert_eq!(report.scanned, 4);
        assert_eq!(report.removed, vec![dir.join("2.mp3"), dir.join("3.WAV")]);
        assert!(dir.join("1.mp3").exists());
        assert!(!dir.join("2.mp3").exists());
        assert!(!dir.join("3.WAV").exists());
        assert!(dir.join("4.mp3").exists());
        assert!(dir.join("notes.txt").exists());
    }

    #[test]
    fn test_lowest_number_is_kept() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        fs::write(dir.join("10.mp3"), b"same take").unwrap();
        fs::write(dir.join("2.mp3"), b"same take").unwrap();

        let report = remove_duplicates(dir, &audio_exts(), false).unwrap();

        assert_eq!(report.removed, vec![dir.join("10.mp3")]);
        assert!(dir.join("2.mp3").exists());
        assert!(!dir.join("10.mp3").exists());
    }

    #[test]
    fn test_dry_run_deletes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        fs::write(dir.join("a.wav"), b"x").unwrap();
        fs::write(dir.join("b.wav"), b"x").unwrap();

        let report = remove_duplicates(dir, &audio_exts(), true).unwrap();

        assert_eq!(report.removed, vec![dir.join("b.wav")]);
        assert!(dir.join("b.wav").exists());
    }

    #[test]
    fn test_missing_folder() {
        let temp_dir = TempDir::new().unwrap();
        let err = remove_duplicates(&temp_dir.path().join("absent"), &audio_exts(), false)
            .unwrap_err();
        assert!(matches!(err, CorpusError::FolderNotFound { .. }));
    }
}
