// Project - Aggregate root binding the timeline to metadata, observers and history

pub mod observer;
pub mod state;
pub mod types;

pub use observer::{ObserverId, ObserverRegistry};
pub use state::Project;
pub use types::ProjectMetadata;

/// Project error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectError {
    #[error("Invalid project structure: {0}")]
    InvalidStructure(String),
}

/// Check the structural invariants of a project
///
/// The model keeps most of these by construction. This catches the ones it
/// only assumes, like unique track indices.
pub fn validate_project(project: &Project) -> Result<(), ProjectError> {
    let metadata = project.metadata();

    if metadata.name.trim().is_empty() {
        return Err(ProjectError::InvalidStructure(
            "Project name cannot be empty".to_string(),
        ));
    }

    if metadata.name.len() > 255 {
        return Err(ProjectError::InvalidStructure(
            "Project name cannot exceed 255 characters".to_string(),
        ));
    }

    if metadata.fps == 0 {
        return Err(ProjectError::InvalidStructure(
            "Frame rate must be greater than 0".to_string(),
        ));
    }

    if metadata.width == 0 || metadata.height == 0 {
        return Err(ProjectError::InvalidStructure(
            "Frame dimensions must be greater than 0".to_string(),
        ));
    }

    let tracks = project.timeline().tracks();
    if tracks.is_empty() {
        return Err(ProjectError::InvalidStructure(
            "Project must have at least one track".to_string(),
        ));
    }

    let mut indices = std::collections::HashSet::new();
    for track in tracks {
        if !indices.insert(track.index()) {
            return Err(ProjectError::InvalidStructure(format!(
                "Duplicate track index: {}",
                track.index()
            )));
        }

        if !track.is_sorted() {
            return Err(ProjectError::InvalidStructure(format!(
                "Clips on track {} are not sorted by start time",
                track.index()
            )));
        }

        if let Some(clip) = track.clips().iter().find(|c| c.duration_ms() == 0) {
            return Err(ProjectError::InvalidStructure(format!(
                "Clip {} on track {} has zero duration",
                clip.id(),
                track.index()
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::model::{Timeline, Track};

    #[test]
    fn test_validate_new_project() {
        let project = Project::new("Valid Test");
        assert!(validate_project(&project).is_ok());
    }

    #[test]
    fn test_validate_invalid_name() {
        let mut project = Project::new("Test");
        project.metadata_mut().name = "  ".to_string();
        let result = validate_project(&project);
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("name cannot be empty")
        );

        project.metadata_mut().name = "x".repeat(256);
        assert!(validate_project(&project).is_err());
    }

    #[test]
    fn test_validate_invalid_frame() {
        let mut project = Project::new("Test");
        project.metadata_mut().fps = 0;
        assert!(validate_project(&project).is_err());

        project.metadata_mut().fps = 30;
        project.metadata_mut().height = 0;
        assert!(
            validate_project(&project)
                .unwrap_err()
                .to_string()
                .contains("Frame dimensions")
        );
    }

    #[test]
    fn test_validate_duplicate_track_index() {
        // Timeline itself does not reject duplicates
        let timeline = Timeline::with_tracks([Track::new(1, "a"), Track::new(1, "b")]);
        let project =
            Project::with_timeline(ProjectMetadata::default(), timeline, &EditorConfig::default());

        let result = validate_project(&project);
        assert_eq!(
            result,
            Err(ProjectError::InvalidStructure(
                "Duplicate track index: 1".to_string()
            ))
        );
    }
}
