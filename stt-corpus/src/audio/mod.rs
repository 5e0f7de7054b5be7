//! Audio folder tooling: content deduplication and duration probing.

pub mod dedup;
pub mod duration;

pub use dedup::remove_duplicates;
pub use duration::{Ffprobe, extract_durations};

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar for a batch of `len` files.
fn progress_bar(len: usize, prefix: &'static str) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix} [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb.set_prefix(prefix);
    pb
}
