// Concrete command implementations

use crate::command::trait_def::{Command, CommandError, CommandResult};
use crate::model::{Clip, ClipId, SharedAsset, TimelineError, Track};
use crate::project::Project;
use std::any::Any;

fn find_clip(project: &Project, track_index: u32, clip_id: ClipId) -> CommandResult<&Clip> {
    project
        .timeline()
        .track(track_index)?
        .clip(clip_id)
        .ok_or(CommandError::Timeline(TimelineError::ClipNotFound {
            track: track_index,
            clip: clip_id,
        }))
}

/// Command to place a segment of an asset on a track
///
/// The clip created by the first execute() is the one undo() removes and
/// redo() puts back, so history never confuses it with a lookalike clip.
pub struct AddClipCommand {
    track_index: u32,
    asset: SharedAsset,
    start_ms: u64,
    in_point_ms: u64,
    duration_ms: Option<u64>,
    /// Set while the clip is on the timeline
    clip_id: Option<ClipId>,
    /// Held between undo and redo, with the index it occupied
    removed: Option<(usize, Clip)>,
}

impl AddClipCommand {
    /// Create a command placing the whole asset at `start_ms`
    pub fn new(track_index: u32, asset: SharedAsset, start_ms: u64) -> Self {
        Self {
            track_index,
            asset,
            start_ms,
            in_point_ms: 0,
            duration_ms: None,
            clip_id: None,
            removed: None,
        }
    }

    pub fn with_in_point(mut self, in_point_ms: u64) -> Self {
        self.in_point_ms = in_point_ms;
        self
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Id of the clip this command placed, once executed
    pub fn clip_id(&self) -> Option<ClipId> {
        self.clip_id
            .or_else(|| self.removed.as_ref().map(|(_, clip)| clip.id()))
    }
}

impl Command for AddClipCommand {
    fn execute(&mut self, project: &mut Project) -> CommandResult<bool> {
        let id = project.add_clip(
            self.track_index,
            self.asset.clone(),
            self.start_ms,
            self.in_point_ms,
            self.duration_ms,
        )?;

        self.clip_id = Some(id);
        self.removed = None;
        Ok(true)
    }

    fn undo(&mut self, project: &mut Project) -> CommandResult<()> {
        let id = self
            .clip_id
            .ok_or_else(|| CommandError::NotExecuted(self.description()))?;

        let taken = project.take_clip(self.track_index, id)?;
        self.clip_id = None;
        self.removed = Some(taken);
        Ok(())
    }

    fn redo(&mut self, project: &mut Project) -> CommandResult<()> {
        // Check the track before giving up the stored clip
        project.timeline().track(self.track_index)?;
        let (index, clip) = self
            .removed
            .take()
            .ok_or_else(|| CommandError::NotExecuted(self.description()))?;

        self.clip_id = Some(project.insert_clip_at(self.track_index, index, clip)?);
        Ok(())
    }

    fn description(&self) -> String {
        "Add Clip".to_string()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Command to take a clip off its track
///
/// Undo puts the clip back at the index it held, so its order among clips
/// with the same start is unchanged.
pub struct RemoveClipCommand {
    track_index: u32,
    clip_id: ClipId,
    removed: Option<(usize, Clip)>,
}

impl RemoveClipCommand {
    pub fn new(track_index: u32, clip_id: ClipId) -> Self {
        Self {
            track_index,
            clip_id,
            removed: None,
        }
    }
}

impl Command for RemoveClipCommand {
    fn execute(&mut self, project: &mut Project) -> CommandResult<bool> {
        self.removed = Some(project.take_clip(self.track_index, self.clip_id)?);
        Ok(true)
    }

    fn undo(&mut self, project: &mut Project) -> CommandResult<()> {
        project.timeline().track(self.track_index)?;
        let (index, clip) = self
            .removed
            .take()
            .ok_or_else(|| CommandError::NotExecuted(self.description()))?;

        project.insert_clip_at(self.track_index, index, clip)?;
        Ok(())
    }

    fn description(&self) -> String {
        "Remove Clip".to_string()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Command to change where a clip starts on its track
///
/// Successive moves of the same clip coalesce, so a drag gesture emitting
/// many moves leaves a single history entry that returns the clip to where
/// the drag began.
pub struct MoveClipCommand {
    track_index: u32,
    clip_id: ClipId,
    new_start_ms: u64,
    /// Start and index before the first execute()
    old_place: Option<(u64, usize)>,
    applied: bool,
    merge_key: String,
}

impl MoveClipCommand {
    pub fn new(track_index: u32, clip_id: ClipId, new_start_ms: u64) -> Self {
        Self {
            track_index,
            clip_id,
            new_start_ms,
            old_place: None,
            applied: false,
            merge_key: format!("move-clip:{}", clip_id),
        }
    }

    pub fn new_start_ms(&self) -> u64 {
        self.new_start_ms
    }
}

impl Command for MoveClipCommand {
    fn execute(&mut self, project: &mut Project) -> CommandResult<bool> {
        let track = project.timeline().track(self.track_index)?;
        let index = track
            .position_of(self.clip_id)
            .ok_or(TimelineError::ClipNotFound {
                track: self.track_index,
                clip: self.clip_id,
            })?;
        if track.clips()[index].start_ms() == self.new_start_ms {
            return Ok(false);
        }

        let old = project.move_clip(self.track_index, self.clip_id, self.new_start_ms)?;
        self.old_place = Some((old, index));
        self.applied = true;
        Ok(true)
    }

    fn undo(&mut self, project: &mut Project) -> CommandResult<()> {
        let (old_start, index) = match (self.applied, self.old_place) {
            (true, Some(old)) => old,
            _ => return Err(CommandError::NotExecuted(self.description())),
        };

        project.restore_clip(self.track_index, self.clip_id, old_start, index)?;
        self.applied = false;
        Ok(())
    }

    // A merged drag can end where it began, so redo must not rely on
    // execute()'s no-op check.
    fn redo(&mut self, project: &mut Project) -> CommandResult<()> {
        if self.applied || self.old_place.is_none() {
            return Err(CommandError::NotExecuted(self.description()));
        }

        project.move_clip(self.track_index, self.clip_id, self.new_start_ms)?;
        self.applied = true;
        Ok(())
    }

    fn description(&self) -> String {
        "Move Clip".to_string()
    }

    fn merge_key(&self) -> Option<&str> {
        Some(self.merge_key.as_str())
    }

    fn merge_with(&mut self, other: &dyn Command, project: &mut Project) -> CommandResult<bool> {
        let Some(other) = other.as_any().downcast_ref::<MoveClipCommand>() else {
            return Ok(false);
        };
        if !self.applied || other.track_index != self.track_index {
            return Ok(false);
        }

        project.move_clip(self.track_index, self.clip_id, other.new_start_ms)?;
        // Keep the original old start so one undo reverts the whole gesture
        self.new_start_ms = other.new_start_ms;
        Ok(true)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Command to change a clip's in-point and duration
///
/// Coalesces like [`MoveClipCommand`], so continuous edits from a spin box
/// collapse into one history entry.
pub struct TrimClipCommand {
    track_index: u32,
    clip_id: ClipId,
    new_bounds: (u64, u64),
    old_bounds: Option<(u64, u64)>,
    applied: bool,
    merge_key: String,
}

impl TrimClipCommand {
    pub fn new(track_index: u32, clip_id: ClipId, in_point_ms: u64, duration_ms: u64) -> Self {
        Self {
            track_index,
            clip_id,
            new_bounds: (in_point_ms, duration_ms),
            old_bounds: None,
            applied: false,
            merge_key: format!("trim-clip:{}", clip_id),
        }
    }

    fn apply(&self, project: &mut Project, (in_point, duration): (u64, u64)) -> CommandResult<(u64, u64)> {
        project.set_clip_bounds(self.track_index, self.clip_id, in_point, duration)
    }
}

impl Command for TrimClipCommand {
    fn execute(&mut self, project: &mut Project) -> CommandResult<bool> {
        let clip = find_clip(project, self.track_index, self.clip_id)?;
        if (clip.in_point_ms(), clip.duration_ms()) == self.new_bounds {
            return Ok(false);
        }

        let old = self.apply(project, self.new_bounds)?;
        self.old_bounds = Some(old);
        self.applied = true;
        Ok(true)
    }

    fn undo(&mut self, project: &mut Project) -> CommandResult<()> {
        let old = match (self.applied, self.old_bounds) {
            (true, Some(old)) => old,
            _ => return Err(CommandError::NotExecuted(self.description())),
        };

        self.apply(project, old)?;
        self.applied = false;
        Ok(())
    }

    fn redo(&mut self, project: &mut Project) -> CommandResult<()> {
        if self.applied || self.old_bounds.is_none() {
            return Err(CommandError::NotExecuted(self.description()));
        }

        self.apply(project, self.new_bounds)?;
        self.applied = true;
        Ok(())
    }

    fn description(&self) -> String {
        "Trim Clip".to_string()
    }

    fn merge_key(&self) -> Option<&str> {
        Some(self.merge_key.as_str())
    }

    fn merge_with(&mut self, other: &dyn Command, project: &mut Project) -> CommandResult<bool> {
        let Some(other) = other.as_any().downcast_ref::<TrimClipCommand>() else {
            return Ok(false);
        };
        if !self.applied || other.track_index != self.track_index {
            return Ok(false);
        }

        self.apply(project, other.new_bounds)?;
        self.new_bounds = other.new_bounds;
        Ok(true)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Command to add an empty track
///
/// Declines (without error) when the index is already in use.
pub struct AddTrackCommand {
    index: u32,
    name: String,
    applied: bool,
}

impl AddTrackCommand {
    pub fn new(index: u32, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            applied: false,
        }
    }

    /// Add a track after the last one currently in `project`
    pub fn append(project: &Project, name: impl Into<String>) -> Self {
        Self::new(project.timeline().next_track_index(), name)
    }

    pub fn index(&self) -> u32 {
        self.index
    }
}

impl Command for AddTrackCommand {
    fn execute(&mut self, project: &mut Project) -> CommandResult<bool> {
        if project.timeline().has_track(self.index) {
            return Ok(false);
        }

        project.add_track(Track::new(self.index, self.name.clone()))?;
        self.applied = true;
        Ok(true)
    }

    fn undo(&mut self, project: &mut Project) -> CommandResult<()> {
        if !self.applied {
            return Err(CommandError::NotExecuted(self.description()));
        }

        project.remove_track(self.index)?;
        self.applied = false;
        Ok(())
    }

    fn description(&self) -> String {
        "Add Track".to_string()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Command to remove a track together with its clips
///
/// Declines when asked to remove the project's only track.
pub struct RemoveTrackCommand {
    index: u32,
    removed: Option<Track>,
}

impl RemoveTrackCommand {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            removed: None,
        }
    }
}

impl Command for RemoveTrackCommand {
    fn execute(&mut self, project: &mut Project) -> CommandResult<bool> {
        project.timeline().track(self.index)?;
        if project.timeline().len() == 1 {
            return Ok(false);
        }

        self.removed = Some(project.remove_track(self.index)?);
        Ok(true)
    }

    fn undo(&mut self, project: &mut Project) -> CommandResult<()> {
        if project.timeline().has_track(self.index) {
            return Err(CommandError::InvalidState(format!(
                "Track {} already exists",
                self.index
            )));
        }
        let track = self
            .removed
            .take()
            .ok_or_else(|| CommandError::NotExecuted(self.description()))?;

        project.add_track(track)?;
        Ok(())
    }

    fn description(&self) -> String {
        "Remove Track".to_string()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
