//! Errors from the fallible edges of the crate: style files, pixmaps and PNG
//! export. State-machine and renderer operations never fail.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HudError {
    /// Reading or writing a file failed.
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A style file is not valid TOML or has wrongly typed fields.
    #[error("Invalid style file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize style: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Zero-sized or oversized pixmap.
    #[error("Cannot allocate a {width}x{height} surface")]
    InvalidSurface { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    Png(String),
}
