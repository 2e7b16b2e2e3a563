// Track - Ordered lane of clips

use super::clip::{Clip, ClipId};
use super::error::{TimelineError, TimelineResult};
use serde::{Deserialize, Serialize};

/// A lane of clips identified by an index unique within its timeline
///
/// Clips are always sorted by ascending start time. Overlapping clips are
/// allowed; resolving overlap is up to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    index: u32,
    pub name: String,
    clips: Vec<Clip>,
}

impl Track {
    pub fn new(index: u32, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            clips: Vec::new(),
        }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    /// Clips in ascending start order
    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Insert a clip, keeping the lane sorted by start time
    ///
    /// A clip sharing its start with existing clips goes after them, the same
    /// order an append followed by a stable sort would produce.
    pub fn add_clip(&mut self, clip: Clip) {
        self.insert_sorted(clip);
    }

    fn insert_sorted(&mut self, clip: Clip) -> usize {
        let insert_pos = self
            .clips
            .partition_point(|c| c.start_ms() <= clip.start_ms());
        self.clips.insert(insert_pos, clip);
        insert_pos
    }

    /// Insert a clip at `index` when that keeps the lane sorted
    ///
    /// Used to put a clip back exactly where it was among clips sharing its
    /// start. Falls back to [`Track::add_clip`] when `index` would break the
    /// order. Returns the index the clip ended up at.
    pub fn insert_clip_at(&mut self, index: usize, clip: Clip) -> usize {
        let start = clip.start_ms();
        let fits = index <= self.clips.len()
            && (index == 0 || self.clips[index - 1].start_ms() <= start)
            && self.clips.get(index).is_none_or(|next| start <= next.start_ms());

        if fits {
            self.clips.insert(index, clip);
            index
        } else {
            self.insert_sorted(clip)
        }
    }

    /// Index of a clip in start order
    pub fn position_of(&self, id: ClipId) -> Option<usize> {
        self.clips.iter().position(|c| c.id() == id)
    }

    /// Remove a clip by identity
    ///
    /// A lookalike clip with equal fields but another id is never matched.
    pub fn remove_clip(&mut self, id: ClipId) -> Option<Clip> {
        self.take_clip(id).map(|(_, clip)| clip)
    }

    /// Remove a clip by identity, also returning the index it held
    pub fn take_clip(&mut self, id: ClipId) -> Option<(usize, Clip)> {
        let index = self.position_of(id)?;
        Some((index, self.clips.remove(index)))
    }

    /// First clip (in sorted order) covering `position_ms`
    pub fn find_clip_at(&self, position_ms: u64) -> Option<&Clip> {
        self.clips.iter().find(|c| c.contains(position_ms))
    }

    pub fn clip(&self, id: ClipId) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id() == id)
    }

    /// Move a clip to a new start time, returning its previous start
    ///
    /// The clip goes after any clips already starting at `new_start_ms`.
    pub fn move_clip(&mut self, id: ClipId, new_start_ms: u64) -> TimelineResult<u64> {
        self.reposition(id, new_start_ms, None)
    }

    /// Move a clip back to `start_ms` at `index`, reversing a move
    pub fn restore_clip(&mut self, id: ClipId, start_ms: u64, index: usize) -> TimelineResult<u64> {
        self.reposition(id, start_ms, Some(index))
    }

    fn reposition(&mut self, id: ClipId, start_ms: u64, index: Option<usize>) -> TimelineResult<u64> {
        let track = self.index;
        let position = self
            .position_of(id)
            .ok_or(TimelineError::ClipNotFound { track, clip: id })?;

        // Validated in place so a rejected move leaves the lane untouched
        let old_start = self.clips[position].start_ms();
        self.clips[position].set_start(start_ms)?;

        let clip = self.clips.remove(position);
        match index {
            Some(index) => {
                self.insert_clip_at(index, clip);
            }
            None => self.add_clip(clip),
        }
        Ok(old_start)
    }

    /// Change a clip's in-point and duration, returning the previous pair
    ///
    /// Start times are unchanged, so the ordering is preserved.
    pub fn set_clip_bounds(
        &mut self,
        id: ClipId,
        in_point_ms: u64,
        duration_ms: u64,
    ) -> TimelineResult<(u64, u64)> {
        let track = self.index;
        let clip = self
            .clips
            .iter_mut()
            .find(|c| c.id() == id)
            .ok_or(TimelineError::ClipNotFound { track, clip: id })?;

        let previous = (clip.in_point_ms(), clip.duration_ms());
        clip.set_bounds(in_point_ms, duration_ms)?;
        Ok(previous)
    }

    /// End of the last clip on this lane, or 0 when empty
    pub fn end_ms(&self) -> u64 {
        self.clips.iter().map(Clip::end_ms).max().unwrap_or(0)
    }

    /// Whether the clips are in ascending start order
    pub fn is_sorted(&self) -> bool {
        self.clips
            .windows(2)
            .all(|pair| pair[0].start_ms() <= pair[1].start_ms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::asset::{MediaAsset, MediaKind, SharedAsset};

    fn asset() -> SharedAsset {
        MediaAsset::shared("clip.mp4", MediaKind::Video, 60_000)
    }

    fn clip_at(start: u64, duration: u64) -> Clip {
        Clip::new(asset(), 0, duration, start).unwrap()
    }

    fn starts(track: &Track) -> Vec<u64> {
        track.clips().iter().map(Clip::start_ms).collect()
    }

    #[test]
    fn test_add_keeps_order() {
        let mut track = Track::new(0, "video");
        for start in [3000, 0, 9000, 1500, 6000] {
            track.add_clip(clip_at(start, 500));
        }

        assert_eq!(starts(&track), vec![0, 1500, 3000, 6000, 9000]);
        assert!(track.is_sorted());
    }

    #[test]
    fn test_equal_start_inserts_after_existing() {
        let mut track = Track::new(0, "video");
        let first = clip_at(1000, 500);
        let second = clip_at(1000, 800);
        let first_id = first.id();
        let second_id = second.id();

        track.add_clip(first);
        track.add_clip(clip_at(0, 100));
        track.add_clip(second);

        assert_eq!(track.clips()[1].id(), first_id);
        assert_eq!(track.clips()[2].id(), second_id);
    }

    #[test]
    fn test_remove_by_identity_not_value() {
        let mut track = Track::new(0, "video");
        let shared = asset();
        let placed = Clip::new(shared.clone(), 0, 1000, 0).unwrap();
        let lookalike = Clip::new(shared, 0, 1000, 0).unwrap();
        let placed_id = placed.id();
        track.add_clip(placed);

        assert!(track.remove_clip(lookalike.id()).is_none());
        assert_eq!(track.len(), 1);

        let removed = track.remove_clip(placed_id).unwrap();
        assert_eq!(removed.id(), placed_id);
        assert!(track.is_empty());
    }

    #[test]
    fn test_find_clip_at() {
        let mut track = Track::new(0, "video");
        track.add_clip(clip_at(0, 1000));
        track.add_clip(clip_at(500, 1000));
        track.add_clip(clip_at(3000, 1000));

        // Overlap: the first in sorted order wins
        assert_eq!(track.find_clip_at(700).unwrap().start_ms(), 0);
        assert_eq!(track.find_clip_at(1200).unwrap().start_ms(), 500);
        assert!(track.find_clip_at(2000).is_none());
        assert!(track.find_clip_at(4000).is_none());
    }

    #[test]
    fn test_move_clip_resorts() {
        let mut track = Track::new(0, "video");
        let moving = clip_at(0, 100);
        let id = moving.id();
        track.add_clip(moving);
        track.add_clip(clip_at(1000, 100));

        assert_eq!(track.move_clip(id, 5000), Ok(0));
        assert_eq!(starts(&track), vec![1000, 5000]);
        assert_eq!(track.clips()[1].id(), id);

        let missing = ClipId::new();
        assert_eq!(
            track.move_clip(missing, 0),
            Err(TimelineError::ClipNotFound {
                track: 0,
                clip: missing
            })
        );
    }

    #[test]
    fn test_move_past_end_of_time_is_rejected() {
        let mut track = Track::new(0, "video");
        let clip = clip_at(0, 100);
        let id = clip.id();
        track.add_clip(clip);
        track.add_clip(clip_at(50, 100));

        assert!(matches!(
            track.move_clip(id, u64::MAX - 10),
            Err(TimelineError::EndOutOfRange { .. })
        ));
        assert_eq!(starts(&track), vec![0, 50]);
        assert_eq!(track.clips()[0].id(), id);
    }

    #[test]
    fn test_take_and_insert_at_restores_tie_order() {
        let mut track = Track::new(0, "video");
        let a = clip_at(0, 100);
        let b = clip_at(0, 200);
        let (a_id, b_id) = (a.id(), b.id());
        track.add_clip(a);
        track.add_clip(b);
        let before = track.clone();

        let (index, taken) = track.take_clip(a_id).unwrap();
        assert_eq!(index, 0);
        assert_eq!(track.clips()[0].id(), b_id);

        assert_eq!(track.insert_clip_at(index, taken), 0);
        assert_eq!(track, before);
        assert_eq!(track.find_clip_at(10).unwrap().id(), a_id);
    }

    #[test]
    fn test_insert_at_out_of_order_index_falls_back() {
        let mut track = Track::new(0, "video");
        track.add_clip(clip_at(0, 100));
        track.add_clip(clip_at(500, 100));

        // Index 0 would put 900 before 0
        assert_eq!(track.insert_clip_at(0, clip_at(900, 100)), 2);
        assert_eq!(track.insert_clip_at(7, clip_at(200, 100)), 1);
        assert_eq!(starts(&track), vec![0, 200, 500, 900]);
    }

    #[test]
    fn test_restore_clip_puts_tied_clip_back() {
        let mut track = Track::new(0, "video");
        let a = clip_at(0, 100);
        let a_id = a.id();
        track.add_clip(a);
        track.add_clip(clip_at(0, 300));
        let before = track.clone();

        let index = track.position_of(a_id).unwrap();
        let old_start = track.move_clip(a_id, 700).unwrap();
        assert_eq!(track.restore_clip(a_id, old_start, index), Ok(700));
        assert_eq!(track, before);
    }

    #[test]
    fn test_set_clip_bounds() {
        let mut track = Track::new(2, "audio");
        let clip = clip_at(0, 1000);
        let id = clip.id();
        track.add_clip(clip);

        assert_eq!(track.set_clip_bounds(id, 250, 400), Ok((0, 1000)));
        assert_eq!(track.clip(id).unwrap().end_ms(), 400);

        assert_eq!(
            track.set_clip_bounds(id, 0, 0),
            Err(TimelineError::InvalidDuration)
        );

        let missing = ClipId::new();
        assert_eq!(
            track.set_clip_bounds(missing, 0, 10),
            Err(TimelineError::ClipNotFound {
                track: 2,
                clip: missing
            })
        );
    }

    #[test]
    fn test_end_ms() {
        let mut track = Track::new(0, "video");
        assert_eq!(track.end_ms(), 0);
        track.add_clip(clip_at(0, 8000));
        track.add_clip(clip_at(2000, 1000));
        assert_eq!(track.end_ms(), 8000);
    }
}
