// Command Pattern for Undo/Redo functionality
//
// Every edit that should be undoable goes through a Command submitted to the
// project's UndoStack.
//
// Architecture:
// - Command trait: execute(), undo(), redo(), description(), merge hooks
// - UndoStack: bounded history plus redo buffer, coalesces mergeable edits
// - MacroCommand: groups commands into one history entry
// - Concrete commands: AddClipCommand, MoveClipCommand, AddTrackCommand, etc.
//
// Commands receive the Project on every call rather than holding it, so the
// project can own its history without a reference cycle.

pub mod commands;
pub mod macro_command;
pub mod manager;
pub mod trait_def;

pub use commands::{
    AddClipCommand, AddTrackCommand, MoveClipCommand, RemoveClipCommand, RemoveTrackCommand,
    TrimClipCommand,
};
pub use macro_command::MacroCommand;
pub use manager::UndoStack;
pub use trait_def::{Command, CommandError, CommandResult};
