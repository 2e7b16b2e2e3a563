// Project - Aggregate root owning the timeline, metadata, observers and history
//
// The mutators here apply edits directly and notify observers. They are the
// effects commands wrap; UI code should go through submit() instead so the
// edit lands in history.

use crate::command::{Command, CommandError, CommandResult, UndoStack};
use crate::config::EditorConfig;
use crate::model::{Clip, ClipId, SharedAsset, Timeline, TimelineError, Track};
use crate::project::observer::{ObserverId, ObserverRegistry};
use crate::project::types::ProjectMetadata;

/// The root of all editable state
#[derive(Debug)]
pub struct Project {
    metadata: ProjectMetadata,
    timeline: Timeline,
    /// Created on first use
    undo_stack: Option<UndoStack>,
    max_history: Option<usize>,
    observers: ObserverRegistry,
}

impl Project {
    /// New project with default settings and a single video track
    pub fn new(name: impl Into<String>) -> Self {
        let config = EditorConfig::default();
        let metadata = ProjectMetadata::new(name, config.fps, config.width, config.height);
        Self::with_timeline(metadata, Timeline::new(), &config)
    }

    /// New project using the configured defaults
    pub fn from_config(config: &EditorConfig) -> Self {
        let metadata = ProjectMetadata::new(
            config.default_project_name.clone(),
            config.fps,
            config.width,
            config.height,
        );
        Self::with_timeline(metadata, Timeline::new(), config)
    }

    /// Assemble a project from existing parts
    ///
    /// An empty timeline gets the configured default track at index 0.
    pub fn with_timeline(
        metadata: ProjectMetadata,
        mut timeline: Timeline,
        config: &EditorConfig,
    ) -> Self {
        if timeline.is_empty() {
            timeline.add_track(Track::new(0, config.default_track_name.clone()));
        }

        Self {
            metadata,
            timeline,
            undo_stack: None,
            max_history: config.max_history,
            observers: ObserverRegistry::new(),
        }
    }

    pub fn metadata(&self) -> &ProjectMetadata {
        &self.metadata
    }

    /// Direct metadata access; does not notify observers
    pub fn metadata_mut(&mut self) -> &mut ProjectMetadata {
        &mut self.metadata
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Rename the project, returning the previous name
    pub fn rename(&mut self, name: impl Into<String>) -> String {
        let old = std::mem::replace(&mut self.metadata.name, name.into());
        self.notify("Rename project");
        old
    }

    // --- Observers ---

    pub fn attach_observer<F>(&mut self, callback: F) -> ObserverId
    where
        F: FnMut(&str) + Send + 'static,
    {
        self.observers.attach(callback)
    }

    pub fn detach_observer(&mut self, id: ObserverId) -> bool {
        self.observers.detach(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn notify(&mut self, description: &str) {
        self.metadata.touch();
        self.observers.notify(description);
    }

    // --- Timeline mutation ---

    /// Place a segment of `asset` on a track
    ///
    /// `duration_ms` defaults to the asset's full length (`Some(0)` is
    /// treated the same way). Returns the id of the new clip.
    ///
    /// # Errors
    /// Fails if the track does not exist, the resulting duration is zero or
    /// the clip would end past the representable time range.
    pub fn add_clip(
        &mut self,
        track_index: u32,
        asset: SharedAsset,
        start_ms: u64,
        in_point_ms: u64,
        duration_ms: Option<u64>,
    ) -> CommandResult<ClipId> {
        let duration_ms = match duration_ms {
            Some(duration) if duration > 0 => duration,
            _ => asset.duration_ms(),
        };

        let track = self.timeline.track_mut(track_index)?;
        let clip = Clip::new(asset, in_point_ms, duration_ms, start_ms)?;
        let id = clip.id();
        track.add_clip(clip);

        self.notify(&format!("Add clip to track {}", track_index));
        Ok(id)
    }

    /// Put a clip back at `index` on a track, keeping its identity
    ///
    /// Reverses [`Project::take_clip`] exactly, including the order among
    /// clips sharing a start time.
    pub fn insert_clip_at(
        &mut self,
        track_index: u32,
        index: usize,
        clip: Clip,
    ) -> CommandResult<ClipId> {
        let id = clip.id();
        self.timeline
            .track_mut(track_index)?
            .insert_clip_at(index, clip);
        self.notify(&format!("Add clip to track {}", track_index));
        Ok(id)
    }

    /// Remove a clip by identity, returning it
    pub fn remove_clip(&mut self, track_index: u32, clip_id: ClipId) -> CommandResult<Clip> {
        self.take_clip(track_index, clip_id).map(|(_, clip)| clip)
    }

    /// Remove a clip by identity, returning it with the index it held
    pub fn take_clip(
        &mut self,
        track_index: u32,
        clip_id: ClipId,
    ) -> CommandResult<(usize, Clip)> {
        let taken = self
            .timeline
            .track_mut(track_index)?
            .take_clip(clip_id)
            .ok_or(TimelineError::ClipNotFound {
                track: track_index,
                clip: clip_id,
            })?;

        self.notify(&format!("Remove clip from track {}", track_index));
        Ok(taken)
    }

    /// Set a clip's timeline start, returning the previous start
    pub fn move_clip(
        &mut self,
        track_index: u32,
        clip_id: ClipId,
        start_ms: u64,
    ) -> CommandResult<u64> {
        let old_start = self
            .timeline
            .track_mut(track_index)?
            .move_clip(clip_id, start_ms)?;

        self.notify(&format!("Move clip on track {}", track_index));
        Ok(old_start)
    }

    /// Return a moved clip to `start_ms` at `index` among its track's clips
    pub fn restore_clip(
        &mut self,
        track_index: u32,
        clip_id: ClipId,
        start_ms: u64,
        index: usize,
    ) -> CommandResult<u64> {
        let old_start = self
            .timeline
            .track_mut(track_index)?
            .restore_clip(clip_id, start_ms, index)?;

        self.notify(&format!("Move clip on track {}", track_index));
        Ok(old_start)
    }

    /// Set a clip's in-point and duration, returning the previous pair
    pub fn set_clip_bounds(
        &mut self,
        track_index: u32,
        clip_id: ClipId,
        in_point_ms: u64,
        duration_ms: u64,
    ) -> CommandResult<(u64, u64)> {
        let previous = self
            .timeline
            .track_mut(track_index)?
            .set_clip_bounds(clip_id, in_point_ms, duration_ms)?;

        self.notify(&format!("Trim clip on track {}", track_index));
        Ok(previous)
    }

    /// # Errors
    /// Returns [`CommandError::InvalidState`] if the index is already taken.
    pub fn add_track(&mut self, track: Track) -> CommandResult<()> {
        let index = track.index();
        if self.timeline.has_track(index) {
            return Err(CommandError::InvalidState(format!(
                "Track {} already exists",
                index
            )));
        }

        self.timeline.add_track(track);
        self.notify(&format!("Add track {}", index));
        Ok(())
    }

    /// # Errors
    /// Fails if the track does not exist, or if it is the only track left.
    pub fn remove_track(&mut self, index: u32) -> CommandResult<Track> {
        self.timeline.track(index)?;
        if self.timeline.len() == 1 {
            return Err(CommandError::InvalidState(
                "Project must keep at least one track".to_string(),
            ));
        }

        let track = self
            .timeline
            .remove_track(index)
            .ok_or(TimelineError::TrackNotFound(index))?;
        self.notify(&format!("Remove track {}", index));
        Ok(track)
    }

    // --- History ---

    pub fn undo_stack(&self) -> Option<&UndoStack> {
        self.undo_stack.as_ref()
    }

    /// The project's history, created on first call
    pub fn undo_stack_mut(&mut self) -> &mut UndoStack {
        let max_history = self.max_history;
        self.undo_stack
            .get_or_insert_with(|| UndoStack::with_max_depth(max_history))
    }

    // The stack is moved out while it runs so commands can borrow the
    // project mutably, then put back.
    fn with_history<T>(
        &mut self,
        f: impl FnOnce(&mut UndoStack, &mut Project) -> CommandResult<T>,
    ) -> CommandResult<T> {
        let mut stack = std::mem::take(self.undo_stack_mut());
        let result = f(&mut stack, self);
        self.undo_stack = Some(stack);
        result
    }

    /// Run a command through this project's history
    pub fn submit(&mut self, command: Box<dyn Command>) -> CommandResult<bool> {
        self.with_history(|stack, project| stack.push(command, project))
    }

    pub fn undo(&mut self) -> CommandResult<Option<String>> {
        if !self.can_undo() {
            return Ok(None);
        }
        self.with_history(|stack, project| stack.undo(project))
    }

    pub fn redo(&mut self) -> CommandResult<Option<String>> {
        if !self.can_redo() {
            return Ok(None);
        }
        self.with_history(|stack, project| stack.redo(project))
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.as_ref().is_some_and(UndoStack::can_undo)
    }

    pub fn can_redo(&self) -> bool {
        self.undo_stack.as_ref().is_some_and(UndoStack::can_redo)
    }

    /// Forget all history, e.g. after the project was reloaded
    pub fn reset_history(&mut self) {
        if let Some(stack) = self.undo_stack.as_mut() {
            stack.clear();
        }
    }
}
