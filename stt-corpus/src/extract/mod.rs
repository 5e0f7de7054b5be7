//! Transcript extraction: XHTML span runs to numbered title/body text units.
//!
//! The source export marks titles, body lines and split paragraph fragments
//! only through span classes. Runs are classified one at a time, body text is
//! reduced to the target script, and the assembler rebuilds records from the
//! stream before each one is written as its own `.txt` unit.

mod assembler;
mod classifier;
mod document;
mod normalizer;
mod writer;

pub use assembler::SegmentAssembler;
pub use classifier::StyleTags;
pub use document::read_runs;
pub use normalizer::ScriptRange;
pub use writer::RecordWriter;

use crate::error::{CorpusError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// One span of the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// Class tokens of the span
    pub classes: Vec<String>,
    /// All text inside the span
    pub text: String,
}

impl Run {
    #[cfg(test)]
    pub fn new(classes: &[&str], text: impl Into<String>) -> Self {
        Self {
            classes: classes.iter().map(|c| c.to_string()).collect(),
            text: text.into(),
        }
    }

    pub fn has_class(&self, tag: &str) -> bool {
        self.classes.iter().any(|c| c == tag)
    }
}

/// A title and its body lines; the unit of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub title: String,
    pub lines: Vec<String>,
}

/// Settings that decide how runs are read.
#[derive(Debug, Clone, Default)]
pub struct ExtractSettings {
    pub tags: StyleTags,
    pub script: ScriptRange,
}

/// Result of extracting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractSummary {
    pub output_dir: PathBuf,
    pub records: usize,
}

/// Extract records from an XHTML export into `output_dir`.
///
/// Nothing is written when the document has no `<body>`.
pub fn extract_document(
    source: &Path,
    output_dir: &Path,
    settings: &ExtractSettings,
) -> Result<ExtractSummary> {
    let xhtml = fs::read_to_string(source)?;
    let runs = read_runs(&xhtml).ok_or_else(|| CorpusError::MissingBody {
        path: source.to_path_buf(),
    })?;
    log::debug!("Read {} span runs from {}", runs.len(), source.display());

    let records = extract_runs(&runs, output_dir, settings)?;

    Ok(ExtractSummary {
        output_dir: output_dir.to_path_buf(),
        records,
    })
}

/// Assemble an already-read run sequence and write its records.
pub fn extract_runs(runs: &[Run], output_dir: &Path, settings: &ExtractSettings) -> Result<usize> {
    let writer = RecordWriter::create(output_dir)?;
    let assembler = SegmentAssembler::new(&settings.tags, &settings.script);

    assembler.run(runs, |counter, record| {
        let path = writer.write(counter, record)?;
        log::debug!(
            "Wrote {} ({} lines): {}",
            path.display(),
            record.lines.len(),
            record.title
        );
        Ok(())
    })
}
