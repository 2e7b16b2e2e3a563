// Command trait definition

use crate::model::TimelineError;
use crate::project::Project;
use std::any::Any;

/// Result type for command operations
pub type CommandResult<T> = Result<T, CommandError>;

/// Errors that can occur while applying or reverting a command
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The command referenced a track or clip that does not exist, or
    /// would have broken a clip invariant
    #[error(transparent)]
    Timeline(#[from] TimelineError),

    /// undo() called on a command with no successful execute/redo to revert
    #[error("Command not executed: {0}")]
    NotExecuted(String),

    /// Command execution failed
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// Undo operation failed
    #[error("Undo failed: {0}")]
    UndoFailed(String),

    /// Invalid state for this operation
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// A reversible edit to a [`Project`]
///
/// A command captures its arguments when it is built. The project it edits
/// is handed in on every call, so history never holds a reference back into
/// the project that owns it.
///
/// # Example
/// ```
/// use std::any::Any;
/// use clipforge::command::{Command, CommandError, CommandResult};
/// use clipforge::project::Project;
///
/// struct RenameCommand {
///     new_name: String,
///     old_name: Option<String>,
/// }
///
/// impl Command for RenameCommand {
///     fn execute(&mut self, project: &mut Project) -> CommandResult<bool> {
///         if project.metadata().name == self.new_name {
///             return Ok(false);
///         }
///         self.old_name = Some(project.rename(self.new_name.clone()));
///         Ok(true)
///     }
///
///     fn undo(&mut self, project: &mut Project) -> CommandResult<()> {
///         let old = self
///             .old_name
///             .take()
///             .ok_or_else(|| CommandError::NotExecuted(self.description()))?;
///         project.rename(old);
///         Ok(())
///     }
///
///     fn description(&self) -> String {
///         format!("Rename to {}", self.new_name)
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
/// ```
pub trait Command: Send {
    /// Apply the edit
    ///
    /// `Ok(false)` means the edit was declined (validation failure, nothing
    /// to do) and must not be recorded in history.
    fn execute(&mut self, project: &mut Project) -> CommandResult<bool>;

    /// Revert the most recent successful execute() or redo()
    ///
    /// Returns [`CommandError::NotExecuted`] when there is nothing to revert.
    fn undo(&mut self, project: &mut Project) -> CommandResult<()>;

    /// Re-apply the edit after an undo
    ///
    /// Defaults to running execute() again. Commands whose execute() creates
    /// new identity must override this to restore exactly what undo() took away.
    fn redo(&mut self, project: &mut Project) -> CommandResult<()> {
        if self.execute(project)? {
            Ok(())
        } else {
            Err(CommandError::ExecutionFailed(format!(
                "{} declined on redo",
                self.description()
            )))
        }
    }

    /// Human-readable description shown in history menus
    fn description(&self) -> String;

    /// Token identifying commands that coalesce into one history entry
    fn merge_key(&self) -> Option<&str> {
        None
    }

    /// Whether this command may be folded into `other`
    ///
    /// True when both carry the same non-empty merge key.
    fn can_merge_with(&self, other: &dyn Command) -> bool {
        match (self.merge_key(), other.merge_key()) {
            (Some(mine), Some(theirs)) => !mine.is_empty() && mine == theirs,
            _ => false,
        }
    }

    /// Absorb `other`'s effect into this command, applying it to `project`
    ///
    /// Returns `Ok(true)` when absorbed; `other` is then dropped without being
    /// executed. The default never merges.
    fn merge_with(&mut self, _other: &dyn Command, _project: &mut Project) -> CommandResult<bool> {
        Ok(false)
    }

    /// Downcasting hook used by merge_with() implementations
    fn as_any(&self) -> &dyn Any;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Keyed(Option<&'static str>);

    impl Command for Keyed {
        fn execute(&mut self, _project: &mut Project) -> CommandResult<bool> {
            Ok(true)
        }

        fn undo(&mut self, _project: &mut Project) -> CommandResult<()> {
            Ok(())
        }

        fn description(&self) -> String {
            "Keyed".to_string()
        }

        fn merge_key(&self) -> Option<&str> {
            self.0
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    struct Declining;

    impl Command for Declining {
        fn execute(&mut self, _project: &mut Project) -> CommandResult<bool> {
            Ok(false)
        }

        fn undo(&mut self, _project: &mut Project) -> CommandResult<()> {
            Err(CommandError::NotExecuted(self.description()))
        }

        fn description(&self) -> String {
            "Declining".to_string()
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_default_merge_policy() {
        assert!(Keyed(Some("drag")).can_merge_with(&Keyed(Some("drag"))));
        assert!(!Keyed(Some("drag")).can_merge_with(&Keyed(Some("trim"))));
        assert!(!Keyed(Some("")).can_merge_with(&Keyed(Some(""))));
        assert!(!Keyed(None).can_merge_with(&Keyed(None)));
        assert!(!Keyed(Some("drag")).can_merge_with(&Keyed(None)));
    }

    #[test]
    fn test_default_merge_with_declines() {
        let mut project = Project::new("Merge");
        let mut first = Keyed(Some("drag"));
        let second = Keyed(Some("drag"));
        assert_eq!(first.merge_with(&second, &mut project), Ok(false));
    }

    #[test]
    fn test_default_redo_reports_declined_execute() {
        let mut project = Project::new("Redo");
        let mut cmd = Declining;
        let err = cmd.redo(&mut project).unwrap_err();
        assert!(matches!(err, CommandError::ExecutionFailed(_)));
        assert!(err.to_string().contains("Declining"));
    }

    #[test]
    fn test_error_display() {
        let err = CommandError::from(TimelineError::TrackNotFound(3));
        assert_eq!(err.to_string(), "Track 3 not found");
        assert_eq!(
            CommandError::NotExecuted("Add Clip".into()).to_string(),
            "Command not executed: Add Clip"
        );
    }
}
