//! Copy matched text/audio pairs into sequentially numbered unit folders.

use crate::catalog::unit_folder_name;
use crate::error::{CorpusError, Result};
use crate::files::{file_name, sorted_files};
use std::fs;
use std::path::Path;

/// Copy the i-th file of `text_dir` and of `audio_dir` into
/// `output_dir/<unit_prefix>_<i>` for every i, starting at 1.
///
/// Both folders are paired in leading-number order. Nothing is created when
/// their file counts differ. Returns the number of unit folders written.
pub fn remap_pairs(
    text_dir: &Path,
    audio_dir: &Path,
    output_dir: &Path,
    unit_prefix: &str,
) -> Result<usize> {
    let texts = sorted_files(text_dir)?;
    let audios = sorted_files(audio_dir)?;

    if texts.len() != audios.len() {
        return Err(CorpusError::CountMismatch {
            what: "Text/audio file".to_string(),
            left: texts.len(),
            right: audios.len(),
        });
    }

    fs::create_dir_all(output_dir)?;

    for (i, (text, audio)) in texts.iter().zip(&audios).enumerate() {
        let unit_dir = output_dir.join(unit_folder_name(unit_prefix, i + 1));
        fs::create_dir_all(&unit_dir)?;

        for source in [text, audio] {
            fs::copy(source, unit_dir.join(file_name(source)))?;
        }
        log::debug!(
            "{} <- {}, {}",
            unit_dir.display(),
            file_name(text),
            file_name(audio)
        );
    }

    Ok(texts.len())
}
