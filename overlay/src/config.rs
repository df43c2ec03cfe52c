//! Style files
//!
//! A style file is a TOML rendition of [`HudStyle`]. Missing keys fall back
//! to the defaults, so a file only needs to list what it changes.

use std::path::{Path, PathBuf};

use hudkit_types::HudStyle;

use crate::error::HudError;

/// Default style file location (`<config dir>/hudkit/style.toml`)
pub fn default_style_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("hudkit").join("style.toml"))
}

pub fn load_style(path: &Path) -> Result<HudStyle, HudError> {
    let contents = std::fs::read_to_string(path).map_err(|source| HudError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| HudError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a style, using the defaults if the file is missing or invalid
pub fn load_style_or_default(path: &Path) -> HudStyle {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no style file, using defaults");
        return HudStyle::default();
    }
    match load_style(path) {
        Ok(style) => style,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring style file");
            HudStyle::default()
        }
    }
}

/// Write `style` as pretty TOML, creating parent directories
pub fn save_style(path: &Path, style: &HudStyle) -> Result<(), HudError> {
    let content = toml::to_string_pretty(style)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| HudError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    std::fs::write(path, content).map_err(|source| HudError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "style saved");
    Ok(())
}
