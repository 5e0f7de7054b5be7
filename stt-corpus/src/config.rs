//! stt-corpus configuration management.

use crate::catalog::CatalogSettings;
use crate::error::Result;
use crate::extract::{ExtractSettings, ScriptRange, StyleTags};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

// Defaults match the class names and storage layout of the Kham transcript export
const DEFAULT_CONTINUATION_TAG: &str = "c24";
const DEFAULT_SCRIPT_START: u32 = 0x0F00;
const DEFAULT_SCRIPT_END: u32 = 0x0FFF;
const DEFAULT_ID_PREFIX: &str = "STT_KAB";
const DEFAULT_UNIT_PREFIX: &str = "STT_NY";
const DEFAULT_BASE_URL: &str =
    "https://s3.ap-south-1.amazonaws.com/monlam.ai.stt/naykor_data/naykor_kham_data";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Span classes that mark a title run
    #[serde(default = "default_title_tags")]
    pub title_tags: Vec<String>,

    /// Span classes that mark a body run
    #[serde(default = "default_body_tags")]
    pub body_tags: Vec<String>,

    /// Span class of fragments split out of a paragraph
    #[serde(default = "default_continuation_tag")]
    pub continuation_tag: String,

    /// First code point kept by body normalization
    #[serde(default = "default_script_start")]
    pub script_start: u32,

    /// Last code point kept by body normalization
    #[serde(default = "default_script_end")]
    pub script_end: u32,

    /// Catalog ID prefix
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,

    /// Unit folder prefix used by remap and catalog links
    #[serde(default = "default_unit_prefix")]
    pub unit_prefix: String,

    /// Storage base URL for catalog links
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sequence number of the first catalog row
    #[serde(default = "default_start_index")]
    pub start_index: usize,

    /// Extensions treated as audio by dedup
    #[serde(default = "default_audio_extensions")]
    pub audio_extensions: Vec<String>,

    /// ffprobe executable. None means `ffprobe` on PATH.
    #[serde(default)]
    pub ffprobe: Option<PathBuf>,
}

fn default_title_tags() -> Vec<String> {
    StyleTags::default().title
}

fn default_body_tags() -> Vec<String> {
    StyleTags::default().body
}

fn default_continuation_tag() -> String {
    DEFAULT_CONTINUATION_TAG.to_string()
}

fn default_script_start() -> u32 {
    DEFAULT_SCRIPT_START
}

fn default_script_end() -> u32 {
    DEFAULT_SCRIPT_END
}

fn default_id_prefix() -> String {
    DEFAULT_ID_PREFIX.to_string()
}

fn default_unit_prefix() -> String {
    DEFAULT_UNIT_PREFIX.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_start_index() -> usize {
    1
}

fn default_audio_extensions() -> Vec<String> {
    vec!["mp3".to_string(), "wav".to_string()]
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            title_tags: default_title_tags(),
            body_tags: default_body_tags(),
            continuation_tag: default_continuation_tag(),
            script_start: default_script_start(),
            script_end: default_script_end(),
            id_prefix: default_id_prefix(),
            unit_prefix: default_unit_prefix(),
            base_url: default_base_url(),
            start_index: default_start_index(),
            audio_extensions: default_audio_extensions(),
            ffprobe: None,
        }
    }
}

impl CorpusConfig {
    /// Get the config file path: ~/.config/cli-programs/stt-corpus.toml
    pub fn config_path() -> anyhow::Result<PathBuf> {
        let home = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("cli-programs")
            .join("stt-corpus.toml"))
    }

    /// Load config from file, returning default if file doesn't exist
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        Ok(Self::parse(&content)?)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save config to file
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Extraction settings; fails if the script range is unusable.
    pub fn extract_settings(&self) -> Result<ExtractSettings> {
        Ok(ExtractSettings {
            tags: StyleTags {
                title: self.title_tags.clone(),
                body: self.body_tags.clone(),
                continuation: self.continuation_tag.clone(),
            },
            script: ScriptRange::new(self.script_start, self.script_end)?,
        })
    }

    pub fn catalog_settings(&self) -> CatalogSettings {
        CatalogSettings {
            id_prefix: self.id_prefix.clone(),
            unit_prefix: self.unit_prefix.clone(),
            base_url: self.base_url.clone(),
            start_index: self.start_index,
        }
    }
}
