//! Numbered text unit output.

use super::Record;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes records as `0001.txt`, `0002.txt`, ... into one directory.
#[derive(Debug)]
pub struct RecordWriter {
    output_dir: PathBuf,
}

impl RecordWriter {
    /// Create the output directory (if needed) and a writer for it.
    pub fn create(output_dir: &Path) -> Result<Self> {
        fs::create_dir_all(output_dir)?;
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }

    pub fn unit_path(&self, counter: usize) -> PathBuf {
        self.output_dir.join(format!("{:04}.txt", counter))
    }

    /// Write one record, returning the path of the unit.
    pub fn write(&self, counter: usize, record: &Record) -> Result<PathBuf> {
        let path = self.unit_path(counter);
        fs::write(&path, render(record))?;
        Ok(path)
    }
}

/// Title line followed by one line per body line.
pub fn render(record: &Record) -> String {
    let mut content = String::with_capacity(
        record.title.len() + record.lines.iter().map(|l| l.len() + 1).sum::<usize>() + 1,
    );
    content.push_str(&record.title);
    content.push('\n');
    for line in &record.lines {
        content.push_str(line);
        content.push('\n');
    }
    content
}
