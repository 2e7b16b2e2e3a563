// Clipforge - Editing core for a non-linear media editor

pub mod command;
pub mod config;
pub mod media;
pub mod model;
pub mod project;

// Re-export commonly used types for convenience
pub use command::{
    AddClipCommand, AddTrackCommand, Command, CommandError, CommandResult, MacroCommand,
    MoveClipCommand, RemoveClipCommand, RemoveTrackCommand, TrimClipCommand, UndoStack,
};
pub use config::EditorConfig;
pub use media::{MediaError, MediaInfo, MediaProbe};
pub use model::{Clip, ClipId, MediaAsset, MediaKind, SharedAsset, Timeline, Track};
pub use project::{Project, ProjectMetadata, validate_project};
