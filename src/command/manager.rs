// UndoStack - Bounded edit history with a redo buffer

use crate::command::trait_def::{Command, CommandResult};
use crate::config::DEFAULT_MAX_HISTORY;
use crate::project::Project;
use std::collections::VecDeque;
use std::fmt;

/// Manages command execution and undo/redo
///
/// The stack maintains two buffers:
/// - History: commands that have been applied and can be undone
/// - Redo: commands that have been undone and can be re-applied
///
/// Pushing a command first offers it to the newest history entry for
/// merging. Otherwise it is executed, recorded, and the redo buffer is
/// cleared since the undone branch is no longer reachable.
///
/// # Memory Management
/// History is capacity-limited. When full, the oldest entry is dropped and
/// can never be undone. The redo buffer is unbounded.
pub struct UndoStack {
    /// Most recent at the back
    history: VecDeque<Box<dyn Command>>,

    /// Most recent at the back
    redo: VecDeque<Box<dyn Command>>,

    /// `None` disables eviction
    max_depth: Option<usize>,
}

impl UndoStack {
    /// Create a stack keeping the default number of steps
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_HISTORY)
    }

    /// Create a stack keeping at most `max_depth` steps
    pub fn with_capacity(max_depth: usize) -> Self {
        Self::with_max_depth(Some(max_depth))
    }

    /// Create a stack that never evicts history
    pub fn unbounded() -> Self {
        Self::with_max_depth(None)
    }

    pub fn with_max_depth(max_depth: Option<usize>) -> Self {
        Self {
            history: VecDeque::new(),
            redo: VecDeque::new(),
            max_depth,
        }
    }

    /// Apply a command and record it
    ///
    /// This will:
    /// 1. Offer the command to the newest entry; if absorbed, stop here
    /// 2. Execute the command
    /// 3. Record it (evicting the oldest entry at capacity)
    /// 4. Clear the redo buffer
    ///
    /// Returns `Ok(false)` when the command declined to run. Nothing is
    /// recorded in that case and redo is left untouched.
    ///
    /// # Errors
    /// Propagates errors from merge_with() or execute(); history is unchanged.
    pub fn push(
        &mut self,
        mut command: Box<dyn Command>,
        project: &mut Project,
    ) -> CommandResult<bool> {
        if let Some(top) = self.history.back_mut() {
            if command.can_merge_with(&**top) && top.merge_with(&*command, project)? {
                tracing::debug!(
                    merged = %command.description(),
                    into = %top.description(),
                    "Command merged into history"
                );
                return Ok(true);
            }
        }

        if !command.execute(project)? {
            tracing::debug!(command = %command.description(), "Command declined");
            return Ok(false);
        }

        tracing::debug!(
            command = %command.description(),
            undo_depth = self.history.len() + 1,
            "Command pushed"
        );
        self.record(command);
        self.redo.clear();

        Ok(true)
    }

    /// Undo the newest history entry
    ///
    /// Returns the description of the undone command, or `None` when
    /// history is empty.
    ///
    /// # Errors
    /// If the command fails to undo it stays on history and the error is
    /// returned.
    pub fn undo(&mut self, project: &mut Project) -> CommandResult<Option<String>> {
        let Some(mut command) = self.history.pop_back() else {
            return Ok(None);
        };

        let description = command.description();
        if let Err(e) = command.undo(project) {
            tracing::warn!(command = %description, error = %e, "Undo failed");
            self.history.push_back(command);
            return Err(e);
        }

        tracing::debug!(
            command = %description,
            undo_remaining = self.history.len(),
            "Undo"
        );
        self.redo.push_back(command);

        Ok(Some(description))
    }

    /// Redo the newest undone command
    ///
    /// Returns the description of the redone command, or `None` when the
    /// redo buffer is empty.
    ///
    /// # Errors
    /// If the command fails to redo it stays on the redo buffer and the
    /// error is returned.
    pub fn redo(&mut self, project: &mut Project) -> CommandResult<Option<String>> {
        let Some(mut command) = self.redo.pop_back() else {
            return Ok(None);
        };

        let description = command.description();
        if let Err(e) = command.redo(project) {
            tracing::warn!(command = %description, error = %e, "Redo failed");
            self.redo.push_back(command);
            return Err(e);
        }

        tracing::debug!(
            command = %description,
            redo_remaining = self.redo.len(),
            "Redo"
        );
        self.record(command);

        Ok(Some(description))
    }

    fn record(&mut self, command: Box<dyn Command>) {
        self.history.push_back(command);

        if let Some(max_depth) = self.max_depth {
            while self.history.len() > max_depth {
                if let Some(evicted) = self.history.pop_front() {
                    tracing::debug!(command = %evicted.description(), "History entry evicted");
                }
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Description of the command the next undo() would revert
    pub fn undo_description(&self) -> Option<String> {
        self.history.back().map(|cmd| cmd.description())
    }

    /// Description of the command the next redo() would re-apply
    pub fn redo_description(&self) -> Option<String> {
        self.redo.back().map(|cmd| cmd.description())
    }

    /// History descriptions, newest first
    pub fn history_descriptions(&self) -> Vec<String> {
        self.history.iter().rev().map(|cmd| cmd.description()).collect()
    }

    /// Drop both buffers without undoing anything
    ///
    /// Used when the project state is replaced wholesale.
    pub fn clear(&mut self) {
        self.history.clear();
        self.redo.clear();
    }

    pub fn undo_count(&self) -> usize {
        self.history.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo.len()
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UndoStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UndoStack")
            .field("undo_count", &self.undo_count())
            .field("redo_count", &self.redo_count())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}
