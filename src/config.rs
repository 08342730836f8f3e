/// User settings persisted between sessions
///
/// Stored as JSON in the user's config directory:
/// - Linux: ~/.config/pinsplorer/settings.json
/// - macOS: ~/Library/Application Support/pinsplorer/settings.json
/// - Windows: %APPDATA%\pinsplorer\settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GalleryError, GalleryResult};

/// Smallest thumbnail edge the slider allows
pub const MIN_THUMB_SIZE: u32 = 64;
/// Largest thumbnail edge the slider allows
pub const MAX_THUMB_SIZE: u32 = 300;
/// Thumbnail edge used on first launch
pub const DEFAULT_THUMB_SIZE: u32 = 150;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Thumbnail edge length in pixels (64 to 300)
    pub thumb_size: u32,
    /// Folder opened most recently, reopened on startup if it still exists
    pub last_folder: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            thumb_size: DEFAULT_THUMB_SIZE,
            last_folder: None,
        }
    }
}

impl Settings {
    /// Where the settings file lives, or `None` if no config or home
    /// directory can be determined.
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("pinsplorer");
        path.push("settings.json");
        Some(path)
    }

    /// Load settings from `path`.
    ///
    /// A missing file yields the defaults silently; an unreadable or
    /// malformed one yields the defaults with a warning.
    pub fn load_from(path: &Path) -> Self {
        match Self::try_load_from(path) {
            Ok(Some(settings)) => {
                log::info!("⚙️  Settings loaded from {}", path.display());
                settings
            }
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    fn try_load_from(path: &Path) -> GalleryResult<Option<Self>> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(GalleryError::Settings(format!(
                    "failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let mut settings: Settings = serde_json::from_str(&text).map_err(|e| {
            GalleryError::Settings(format!("failed to parse {}: {}", path.display(), e))
        })?;
        settings.thumb_size = clamp_thumb_size(settings.thumb_size);
        Ok(Some(settings))
    }

    /// Save settings to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> GalleryResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                GalleryError::Settings(format!("failed to create {}: {}", parent.display(), e))
            })?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| GalleryError::Settings(format!("failed to serialize: {}", e)))?;

        fs::write(path, json).map_err(|e| {
            GalleryError::Settings(format!("failed to write {}: {}", path.display(), e))
        })?;

        log::debug!("Settings saved to {}", path.display());
        Ok(())
    }
}

/// Keep a thumbnail size inside the slider's range
pub fn clamp_thumb_size(size: u32) -> u32 {
    size.clamp(MIN_THUMB_SIZE, MAX_THUMB_SIZE)
}
