// MediaAsset - Immutable reference to an imported media file

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Kind of media an asset contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    Video,
    Audio,
    Image,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Video => write!(f, "video"),
            MediaKind::Audio => write!(f, "audio"),
            MediaKind::Image => write!(f, "image"),
        }
    }
}

/// An imported media file
///
/// Assets are never mutated after import. Clips share them through
/// [`SharedAsset`], so one asset can back any number of clips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaAsset {
    path: PathBuf,
    kind: MediaKind,
    duration_ms: u64,
}

/// Reference-counted handle to an asset, shared between clips
pub type SharedAsset = Arc<MediaAsset>;

impl MediaAsset {
    pub fn new(path: impl Into<PathBuf>, kind: MediaKind, duration_ms: u64) -> Self {
        Self {
            path: path.into(),
            kind,
            duration_ms,
        }
    }

    /// Convenience constructor returning the shared handle directly
    pub fn shared(path: impl Into<PathBuf>, kind: MediaKind, duration_ms: u64) -> SharedAsset {
        Arc::new(Self::new(path, kind, duration_ms))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// Total duration of the media in milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// File name for display, falling back to the full path
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let asset = MediaAsset::new("/media/clips/intro.mp4", MediaKind::Video, 5000);
        assert_eq!(asset.display_name(), "intro.mp4");
        assert_eq!(asset.kind().to_string(), "video");
    }

    #[test]
    fn test_shared_asset_is_shared() {
        let asset = MediaAsset::shared("a.wav", MediaKind::Audio, 1200);
        let other = Arc::clone(&asset);
        assert!(Arc::ptr_eq(&asset, &other));
        assert_eq!(Arc::strong_count(&asset), 2);
    }
}
