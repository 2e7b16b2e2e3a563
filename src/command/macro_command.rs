// MacroCommand - Several commands recorded as one history entry

use crate::command::trait_def::{Command, CommandResult};
use crate::project::Project;
use std::any::Any;

/// An ordered group of commands undone and redone as a unit
///
/// Execution stops at the first sub-command that declines or fails. The
/// ones already applied stay applied; [`MacroCommand::rollback`] reverts
/// them if the caller wants all-or-nothing behavior.
pub struct MacroCommand {
    commands: Vec<Box<dyn Command>>,
    description: String,
    /// Sub-commands applied by the last execute()
    applied: usize,
}

impl MacroCommand {
    pub fn new(commands: Vec<Box<dyn Command>>) -> Self {
        Self::with_description("Macro Command", commands)
    }

    pub fn with_description(description: impl Into<String>, commands: Vec<Box<dyn Command>>) -> Self {
        Self {
            commands,
            description: description.into(),
            applied: 0,
        }
    }

    /// Append a sub-command (builder style)
    pub fn push(mut self, command: Box<dyn Command>) -> Self {
        self.commands.push(command);
        self
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of sub-commands the last execute() applied
    pub fn applied_count(&self) -> usize {
        self.applied
    }

    /// Undo the sub-commands a partial execute() left applied, newest first
    pub fn rollback(&mut self, project: &mut Project) -> CommandResult<()> {
        while self.applied > 0 {
            self.commands[self.applied - 1].undo(project)?;
            self.applied -= 1;
        }
        Ok(())
    }
}

impl Command for MacroCommand {
    fn execute(&mut self, project: &mut Project) -> CommandResult<bool> {
        self.applied = 0;
        for command in &mut self.commands {
            if !command.execute(project)? {
                return Ok(false);
            }
            self.applied += 1;
        }
        Ok(true)
    }

    fn undo(&mut self, project: &mut Project) -> CommandResult<()> {
        for command in self.commands.iter_mut().rev() {
            command.undo(project)?;
        }
        self.applied = 0;
        Ok(())
    }

    fn redo(&mut self, project: &mut Project) -> CommandResult<()> {
        for command in &mut self.commands {
            command.redo(project)?;
        }
        self.applied = self.commands.len();
        Ok(())
    }

    fn description(&self) -> String {
        self.description.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
