// EditorConfig - Defaults for new projects and the edit history
//
// Stored as RON, the same format the project layer has always used for
// structured settings. Every field is optional in the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default number of undo steps kept per project
pub const DEFAULT_MAX_HISTORY: usize = 1000;

/// Duration assumed for an asset whose probe failed (milliseconds)
pub const DEFAULT_FALLBACK_ASSET_DURATION_MS: u64 = 10_000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] ron::Error),
}

/// Editor-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Undo depth per project; `None` keeps every step
    pub max_history: Option<usize>,
    pub default_project_name: String,
    pub fps: u32,
    pub width: u32,
    pub height: u32,
    /// Name of the track every new project starts with
    pub default_track_name: String,
    pub fallback_asset_duration_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_history: Some(DEFAULT_MAX_HISTORY),
            default_project_name: "Untitled".to_string(),
            fps: 30,
            width: 1920,
            height: 1080,
            default_track_name: "video".to_string(),
            fallback_asset_duration_ms: DEFAULT_FALLBACK_ASSET_DURATION_MS,
        }
    }
}

impl EditorConfig {
    /// Parse a RON document; missing fields keep their defaults
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Load from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron(&text)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "No editor config, using defaults");
            Ok(Self::default())
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }

    /// `<config_dir>/clipforge/editor.ron`, when the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("clipforge").join("editor.ron"))
    }
}
