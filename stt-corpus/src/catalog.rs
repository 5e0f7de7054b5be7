//! Filename mapping and catalog CSVs.
//!
//! The mapping pairs each original recording with its renamed counterpart.
//! The catalog extends that mapping with a corpus ID, storage links for the
//! text and audio of each unit, and the audio duration.

use crate::error::{CorpusError, Result};
use crate::files::{file_name, sorted_files};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One original/renamed filename pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRow {
    #[serde(rename = "Original Filename")]
    pub original: String,
    #[serde(rename = "Renamed Filename")]
    pub renamed: String,
}

/// One catalog line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogRow {
    #[serde(rename = "Sr no")]
    pub sr_no: usize,
    #[serde(rename = "Original Filename")]
    pub original: String,
    #[serde(rename = "Renamed Filename")]
    pub renamed: String,
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Text Link")]
    pub text_link: String,
    #[serde(rename = "Audio Link")]
    pub audio_link: String,
    #[serde(rename = "Standard Duration (hh:mm:ss)")]
    pub duration: String,
}

/// How IDs and links are generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSettings {
    /// Prepended to the zero-padded sequence, e.g. `STT_KAB0001`
    pub id_prefix: String,
    /// Unit folder prefix, e.g. `STT_NY` for `STT_NY_0001`
    pub unit_prefix: String,
    /// Storage location the unit folders are uploaded under
    pub base_url: String,
    /// Sequence number of the first row
    pub start_index: usize,
}

impl CatalogSettings {
    pub fn id(&self, sequence: usize) -> String {
        format!("{}{:04}", self.id_prefix, sequence)
    }

    /// Link to a file named after `sequence` inside its unit folder.
    pub fn link(&self, sequence: usize, extension: &str) -> String {
        format!(
            "{}/{}/{:04}.{}",
            self.base_url.trim_end_matches('/'),
            unit_folder_name(&self.unit_prefix, sequence),
            sequence,
            extension
        )
    }
}

/// Name of the numbered unit folder, e.g. `STT_NY_0007`.
pub fn unit_folder_name(unit_prefix: &str, sequence: usize) -> String {
    format!("{}_{:04}", unit_prefix, sequence)
}

/// Pair the files of two folders by leading-number order.
///
/// Fails without producing anything if the folders hold different numbers
/// of files.
pub fn build_mapping(original_dir: &Path, renamed_dir: &Path) -> Result<Vec<MappingRow>> {
    let originals = sorted_files(original_dir)?;
    let renamed = sorted_files(renamed_dir)?;

    if originals.len() != renamed.len() {
        return Err(CorpusError::CountMismatch {
            what: "Mapping folder file".to_string(),
            left: originals.len(),
            right: renamed.len(),
        });
    }

    Ok(originals
        .iter()
        .zip(&renamed)
        .map(|(original, renamed)| MappingRow {
            original: file_name(original),
            renamed: file_name(renamed),
        })
        .collect())
}

pub fn write_mapping_csv(rows: &[MappingRow], output: &Path) -> Result<()> {
    write_rows(rows, output)
}

pub fn read_mapping_csv(path: &Path) -> Result<Vec<MappingRow>> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize::<MappingRow>() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Generate catalog rows for a mapping and its per-row durations.
pub fn build_catalog(
    rows: &[MappingRow],
    durations: &[String],
    settings: &CatalogSettings,
) -> Result<Vec<CatalogRow>> {
    if rows.len() != durations.len() {
        return Err(CorpusError::CountMismatch {
            what: "Catalog row/duration".to_string(),
            left: rows.len(),
            right: durations.len(),
        });
    }

    Ok(rows
        .iter()
        .zip(durations)
        .enumerate()
        .map(|(i, (row, duration))| {
            let sequence = settings.start_index + i;
            let extension = Path::new(&row.renamed)
                .extension()
                .map(|e| e.to_string_lossy().to_string())
                .unwrap_or_default();

            CatalogRow {
                sr_no: i + 1,
                original: row.original.clone(),
                renamed: row.renamed.clone(),
                id: settings.id(sequence),
                text_link: settings.link(sequence, "txt"),
                audio_link: settings.link(sequence, &extension),
                duration: duration.clone(),
            }
        })
        .collect())
}

pub fn write_catalog_csv(rows: &[CatalogRow], output: &Path) -> Result<()> {
    write_rows(rows, output)
}

fn write_rows<T: Serialize>(rows: &[T], output: &Path) -> Result<()> {
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(output)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
