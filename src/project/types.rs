// Types describing a project independently of its timeline

use serde::{Deserialize, Serialize};

/// Project metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Project name
    pub name: String,
    /// Frame rate of the output
    pub fps: u32,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Creation timestamp (RFC 3339)
    pub created: String,
    /// Last modification timestamp (RFC 3339)
    pub modified: String,
}

impl ProjectMetadata {
    pub fn new(name: impl Into<String>, fps: u32, width: u32, height: u32) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            name: name.into(),
            fps,
            width,
            height,
            created: now.clone(),
            modified: now,
        }
    }

    /// Stamp the modification time
    pub fn touch(&mut self) {
        self.modified = chrono::Utc::now().to_rfc3339();
    }

    /// Width over height, 0 for a degenerate frame
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            0.0
        } else {
            self.width as f64 / self.height as f64
        }
    }
}

impl Default for ProjectMetadata {
    fn default() -> Self {
        Self::new("Untitled", 30, 1920, 1080)
    }
}
