use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("No <body> element found in {}", path.display())]
    MissingBody { path: PathBuf },

    #[error("Folder not found: {}", path.display())]
    FolderNotFound { path: PathBuf },

    #[error("{what} count mismatch: {left} vs {right}")]
    CountMismatch {
        what: String,
        left: usize,
        right: usize,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, CorpusError>;
