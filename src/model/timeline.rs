// Timeline - Ordered set of tracks composing a project's edit

use super::clip::{Clip, ClipId};
use super::error::{TimelineError, TimelineResult};
use super::track::Track;
use serde::{Deserialize, Serialize};

/// One clip visible at a given playhead position
///
/// Produced by [`Timeline::layers_at`] in ascending track order, which is
/// also compositing order: later layers are painted over earlier ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer<'a> {
    pub track_index: u32,
    pub clip: &'a Clip,
    /// Asset-relative time to sample
    pub source_time_ms: u64,
}

/// Tracks sorted by ascending index
///
/// Index uniqueness is assumed, not enforced here; see
/// [`crate::project::validate_project`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    tracks: Vec<Track>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a timeline from tracks in any order
    pub fn with_tracks(tracks: impl IntoIterator<Item = Track>) -> Self {
        let mut timeline = Self::new();
        for track in tracks {
            timeline.add_track(track);
        }
        timeline
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Insert a track, keeping tracks sorted by index
    pub fn add_track(&mut self, track: Track) {
        let insert_pos = self
            .tracks
            .partition_point(|t| t.index() <= track.index());
        self.tracks.insert(insert_pos, track);
    }

    /// Remove the first track with `index`
    pub fn remove_track(&mut self, index: u32) -> Option<Track> {
        let position = self.tracks.iter().position(|t| t.index() == index)?;
        Some(self.tracks.remove(position))
    }

    pub fn has_track(&self, index: u32) -> bool {
        self.tracks.iter().any(|t| t.index() == index)
    }

    /// # Errors
    /// Returns [`TimelineError::TrackNotFound`] if no track has this index.
    pub fn track(&self, index: u32) -> TimelineResult<&Track> {
        self.tracks
            .iter()
            .find(|t| t.index() == index)
            .ok_or(TimelineError::TrackNotFound(index))
    }

    /// # Errors
    /// Returns [`TimelineError::TrackNotFound`] if no track has this index.
    pub fn track_mut(&mut self, index: u32) -> TimelineResult<&mut Track> {
        self.tracks
            .iter_mut()
            .find(|t| t.index() == index)
            .ok_or(TimelineError::TrackNotFound(index))
    }

    /// Index one past the highest in use
    pub fn next_track_index(&self) -> u32 {
        self.tracks.last().map_or(0, |t| t.index() + 1)
    }

    /// Latest clip end over all tracks
    pub fn duration_ms(&self) -> u64 {
        self.tracks.iter().map(Track::end_ms).max().unwrap_or(0)
    }

    pub fn clip_count(&self) -> usize {
        self.tracks.iter().map(Track::len).sum()
    }

    /// Locate a clip anywhere on the timeline
    pub fn find_clip(&self, id: ClipId) -> Option<(u32, &Clip)> {
        self.tracks
            .iter()
            .find_map(|t| t.clip(id).map(|clip| (t.index(), clip)))
    }

    /// Clips under the playhead, one per track at most, in compositing order
    pub fn layers_at(&self, position_ms: u64) -> Vec<Layer<'_>> {
        self.tracks
            .iter()
            .filter_map(|track| {
                let clip = track.find_clip_at(position_ms)?;
                let source_time_ms = clip.source_time_at(position_ms)?;
                Some(Layer {
                    track_index: track.index(),
                    clip,
                    source_time_ms,
                })
            })
            .collect()
    }
}
