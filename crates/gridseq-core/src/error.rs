//! Error types for gridseq

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridseqError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Page size must be at least one step")]
    InvalidPageSize,
    #[error("Grid must have at least one row")]
    InvalidRowCount,
    #[error("Resolution index {index} out of range (table has {count} entries)")]
    ResolutionOutOfRange { index: usize, count: usize },
    #[error("Resolution table is empty")]
    EmptyResolutionTable,
    #[error("Invalid resolution value: {0}")]
    InvalidResolution(f64),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, GridseqError>;
