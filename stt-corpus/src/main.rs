//! stt-corpus - Prepare speech-to-text corpora from transcript exports and audio folders

mod audio;
mod catalog;
mod config;
mod error;
mod extract;
mod files;
mod remap;

use anyhow::{Context, Result};
use audio::Ffprobe;
use clap::{Parser, Subcommand};
use config::CorpusConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "stt-corpus")]
#[command(about = "Prepare speech-to-text corpora from transcript exports and audio folders", long_about = None)]
#[command(version)]
struct Args {
    /// Enable debug output
    #[arg(short, long, default_value_t = false, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Split an XHTML transcript export into numbered title/body text files
    Extract {
        /// Path to the XHTML export
        input: PathBuf,

        /// Directory for the numbered .txt units
        #[arg(short, long, default_value = "extracted_files")]
        output: PathBuf,
    },
    /// Delete audio files whose content duplicates an earlier file
    Dedup {
        /// Folder of audio files
        dir: PathBuf,

        /// Only report what would be deleted
        #[arg(long)]
        dry_run: bool,
    },
    /// Write a CSV pairing original and renamed audio filenames
    Mapping {
        /// Folder with the original recordings
        original: PathBuf,

        /// Folder with the renamed recordings
        renamed: PathBuf,

        /// Output CSV path
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Extend a mapping CSV with IDs, storage links and durations
    Catalog {
        /// Mapping CSV (Original Filename, Renamed Filename)
        mapping: PathBuf,

        /// Folder of the renamed audio files
        audio_dir: PathBuf,

        /// Output CSV path
        #[arg(short, long)]
        output: PathBuf,

        /// Sequence number of the first row
        #[arg(long)]
        start_index: Option<usize>,

        /// ID prefix (e.g. STT_KAB)
        #[arg(long)]
        id_prefix: Option<String>,

        /// Storage base URL for links
        #[arg(long)]
        base_url: Option<String>,

        /// Unit folder prefix (e.g. STT_NY)
        #[arg(long)]
        unit_prefix: Option<String>,
    },
    /// Copy text/audio pairs into sequentially numbered unit folders
    Remap {
        /// Folder of extracted text units
        text_dir: PathBuf,

        /// Folder of matching audio files
        audio_dir: PathBuf,

        /// Destination for the unit folders
        #[arg(short, long)]
        output: PathBuf,

        /// Unit folder prefix (e.g. STT_NY)
        #[arg(long)]
        unit_prefix: Option<String>,
    },
    /// Print the hh:mm:ss duration of every audio file in a folder
    Durations {
        /// Folder of audio files
        dir: PathBuf,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set the storage base URL used for catalog links
    SetBaseUrl {
        /// URL without trailing slash
        url: String,
    },
    /// Set the catalog ID prefix
    SetIdPrefix {
        /// Prefix (e.g. STT_KAB)
        prefix: String,
    },
    /// Set the unit folder prefix
    SetUnitPrefix {
        /// Prefix (e.g. STT_NY)
        prefix: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    if let Commands::Config { action } = &args.command {
        return handle_config_command(action);
    }

    let config = CorpusConfig::load().context("Failed to load configuration")?;
    log::debug!("Configuration: {:?}", config);

    match args.command {
        Commands::Extract { input, output } => {
            let settings = config.extract_settings()?;
            eprintln!("Extracting: {}", input.display());
            let summary = extract::extract_document(&input, &output, &settings)
                .with_context(|| format!("Failed to extract {}", input.display()))?;
            println!(
                "Extracted {} record(s) into '{}'",
                summary.records,
                summary.output_dir.display()
            );
        }
        Commands::Dedup { dir, dry_run } => {
            eprintln!("Checking and removing duplicates...");
            let report = audio::remove_duplicates(&dir, &config.audio_extensions, dry_run)
                .with_context(|| format!("Failed to deduplicate {}", dir.display()))?;
            let label = if dry_run { "Duplicate" } else { "Deleted duplicate" };
            for path in &report.removed {
                println!("{}: {}", label, path.display());
            }
            println!(
                "{} duplicate files {} ({} scanned).",
                report.removed.len(),
                if dry_run { "found" } else { "removed" },
                report.scanned
            );
        }
        Commands::Mapping {
            original,
            renamed,
            output,
        } => {
            let rows = catalog::build_mapping(&original, &renamed)
                .context("Failed to pair original and renamed files")?;
            catalog::write_mapping_csv(&rows, &output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!(
                "Mapping of {} file(s) written to {}",
                rows.len(),
                output.display()
            );
        }
        Commands::Catalog {
            mapping,
            audio_dir,
            output,
            start_index,
            id_prefix,
            base_url,
            unit_prefix,
        } => {
            let mut settings = config.catalog_settings();
            if let Some(start_index) = start_index {
                settings.start_index = start_index;
            }
            if let Some(id_prefix) = id_prefix {
                settings.id_prefix = id_prefix;
            }
            if let Some(base_url) = base_url {
                settings.base_url = base_url;
            }
            if let Some(unit_prefix) = unit_prefix {
                settings.unit_prefix = unit_prefix;
            }

            let rows = catalog::read_mapping_csv(&mapping)
                .with_context(|| format!("Failed to read {}", mapping.display()))?;
            let durations = audio::extract_durations(&audio_dir, &ffprobe(&config))?;
            let catalog = catalog::build_catalog(&rows, &durations, &settings)?;
            catalog::write_catalog_csv(&catalog, &output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!(
                "Catalog of {} row(s) saved to {}",
                catalog.len(),
                output.display()
            );
        }
        Commands::Remap {
            text_dir,
            audio_dir,
            output,
            unit_prefix,
        } => {
            let unit_prefix = unit_prefix.unwrap_or_else(|| config.unit_prefix.clone());
            let count = remap::remap_pairs(&text_dir, &audio_dir, &output, &unit_prefix)
                .context("Failed to copy files into unit folders")?;
            println!("Copied {} pair(s) into {}", count, output.display());
        }
        Commands::Durations { dir } => {
            let ffprobe = ffprobe(&config);
            if !ffprobe.is_available() {
                log::warn!("ffprobe not found; every duration will be 00:00:00");
            }
            let files = files::sorted_files(&dir)?;
            let durations = audio::duration::durations_for(&files, &ffprobe);
            for (file, duration) in files.iter().zip(&durations) {
                println!("{}\t{}", duration, files::file_name(file));
            }
        }
        Commands::Config { .. } => unreachable!("handled above"),
    }

    Ok(())
}

fn ffprobe(config: &CorpusConfig) -> Ffprobe {
    config
        .ffprobe
        .clone()
        .map(Ffprobe::new)
        .unwrap_or_default()
}

fn handle_config_command(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = CorpusConfig::load()?;
            println!("Configuration file: {:?}", CorpusConfig::config_path()?);
            println!();
            print!("{}", config.to_toml()?);
            if config.ffprobe.is_none() {
                println!("ffprobe = (PATH)");
            }
        }
        ConfigAction::SetBaseUrl { url } => {
            let mut config = CorpusConfig::load()?;
            config.base_url = url.trim_end_matches('/').to_string();
            config.save()?;
            println!("Base URL set to: {}", config.base_url);
        }
        ConfigAction::SetIdPrefix { prefix } => {
            let mut config = CorpusConfig::load()?;
            config.id_prefix = prefix.clone();
            config.save()?;
            println!("ID prefix set to: {}", config.id_prefix);
        }
        ConfigAction::SetUnitPrefix { prefix } => {
            let mut config = CorpusConfig::load()?;
            config.unit_prefix = prefix.clone();
            config.save()?;
            println!("Unit prefix set to: {}", config.unit_prefix);
        }
    }
    Ok(())
}
