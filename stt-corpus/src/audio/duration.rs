//! Audio durations via ffprobe.

use super::progress_bar;
use crate::error::Result;
use crate::files::{file_name, sorted_files};
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Duration recorded for files that cannot be probed.
pub const UNKNOWN_DURATION: &str = "00:00:00";

/// Wrapper around an ffprobe executable.
#[derive(Debug, Clone)]
pub struct Ffprobe {
    program: PathBuf,
}

impl Default for Ffprobe {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

impl Ffprobe {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Get duration of an audio file in milliseconds.
    pub fn duration_ms(&self, audio_path: &Path) -> anyhow::Result<u64> {
        let output = Command::new(&self.program)
            .args([
                "-v",
                "quiet",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .arg(audio_path)
            .output()
            .with_context(|| format!("Failed to run {}", self.program.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("ffprobe failed: {}", stderr.trim());
        }

        let duration_str = String::from_utf8_lossy(&output.stdout);
        let duration_secs: f64 = duration_str
            .trim()
            .parse()
            .context("Failed to parse duration")?;

        if !duration_secs.is_finite() || duration_secs < 0.0 {
            anyhow::bail!("ffprobe reported invalid duration: {}", duration_secs);
        }

        Ok((duration_secs * 1000.0) as u64)
    }

    /// Check if the executable can be run.
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("-version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

/// Format milliseconds as `hh:mm:ss`, truncating partial seconds.
pub fn format_hms(duration_ms: u64) -> String {
    let total_secs = duration_ms / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// One `hh:mm:ss` string per file in `dir`, in leading-number order.
///
/// A file that cannot be probed gets [`UNKNOWN_DURATION`]; the batch always
/// finishes.
pub fn extract_durations(dir: &Path, ffprobe: &Ffprobe) -> Result<Vec<String>> {
    let files = sorted_files(dir)?;
    Ok(durations_for(&files, ffprobe))
}

/// Probe an ordered list of files.
pub fn durations_for(files: &[PathBuf], ffprobe: &Ffprobe) -> Vec<String> {
    let pb = progress_bar(files.len(), "Probing durations");
    let mut durations = Vec::with_capacity(files.len());

    for file in files {
        pb.set_message(file_name(file));
        let duration = match ffprobe.duration_ms(file) {
            Ok(ms) => format_hms(ms),
            Err(e) => {
                log::warn!("Error processing {}: {:#}", file.display(), e);
                UNKNOWN_DURATION.to_string()
            }
        };
        log::debug!("{}: {}", file.display(), duration);
        durations.push(duration);
        pb.inc(1);
    }

    pb.finish_and_clear();
    durations
}
