// Clip - A placed segment of a media asset on a track

use super::asset::SharedAsset;
use super::error::{TimelineError, TimelineResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity of a clip
///
/// Clips are compared by identity when removed from a track, so two clips
/// with identical placement are still distinct if their ids differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClipId(Uuid);

impl ClipId {
    /// Mint a fresh, globally unique id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClipId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A segment of an asset placed on the timeline
///
/// All times are in milliseconds. `in_point_ms` is the offset into the asset,
/// `start_ms` the position on the timeline. The end is always derived.
///
/// Every constructed or deserialized clip has a non-zero duration and an end
/// that fits in a `u64`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ClipRecord")]
pub struct Clip {
    id: ClipId,
    asset: SharedAsset,
    in_point_ms: u64,
    duration_ms: u64,
    start_ms: u64,
}

/// Unchecked serialized form, validated into a [`Clip`]
#[derive(Deserialize)]
struct ClipRecord {
    id: ClipId,
    asset: SharedAsset,
    in_point_ms: u64,
    duration_ms: u64,
    start_ms: u64,
}

impl TryFrom<ClipRecord> for Clip {
    type Error = TimelineError;

    fn try_from(record: ClipRecord) -> TimelineResult<Self> {
        check_span(record.start_ms, record.duration_ms)?;
        Ok(Self {
            id: record.id,
            asset: record.asset,
            in_point_ms: record.in_point_ms,
            duration_ms: record.duration_ms,
            start_ms: record.start_ms,
        })
    }
}

fn check_span(start_ms: u64, duration_ms: u64) -> TimelineResult<()> {
    if duration_ms == 0 {
        return Err(TimelineError::InvalidDuration);
    }
    match start_ms.checked_add(duration_ms) {
        Some(_) => Ok(()),
        None => Err(TimelineError::EndOutOfRange {
            start: start_ms,
            duration: duration_ms,
        }),
    }
}

impl Clip {
    /// Create a clip with a fresh identity
    ///
    /// # Errors
    /// Returns [`TimelineError::InvalidDuration`] if `duration_ms` is zero and
    /// [`TimelineError::EndOutOfRange`] if the end does not fit in a `u64`.
    pub fn new(
        asset: SharedAsset,
        in_point_ms: u64,
        duration_ms: u64,
        start_ms: u64,
    ) -> TimelineResult<Self> {
        check_span(start_ms, duration_ms)?;

        Ok(Self {
            id: ClipId::new(),
            asset,
            in_point_ms,
            duration_ms,
            start_ms,
        })
    }

    pub fn id(&self) -> ClipId {
        self.id
    }

    pub fn asset(&self) -> &SharedAsset {
        &self.asset
    }

    pub fn in_point_ms(&self) -> u64 {
        self.in_point_ms
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    /// Timeline position just past the last frame of the clip
    pub fn end_ms(&self) -> u64 {
        self.start_ms + self.duration_ms
    }

    /// Whether `position_ms` falls in `[start, end)`
    pub fn contains(&self, position_ms: u64) -> bool {
        self.start_ms <= position_ms && position_ms < self.end_ms()
    }

    /// Asset-relative time shown when the playhead is at `position_ms`
    pub fn source_time_at(&self, position_ms: u64) -> Option<u64> {
        if self.contains(position_ms) {
            self.in_point_ms.checked_add(position_ms - self.start_ms)
        } else {
            None
        }
    }

    // Position and bounds are only changed through Track, which owns the
    // ordering invariant.
    pub(crate) fn set_start(&mut self, start_ms: u64) -> TimelineResult<()> {
        check_span(start_ms, self.duration_ms)?;
        self.start_ms = start_ms;
        Ok(())
    }

    pub(crate) fn set_bounds(&mut self, in_point_ms: u64, duration_ms: u64) -> TimelineResult<()> {
        check_span(self.start_ms, duration_ms)?;
        self.in_point_ms = in_point_ms;
        self.duration_ms = duration_ms;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::asset::{MediaAsset, MediaKind};

    fn asset() -> SharedAsset {
        MediaAsset::shared("clip.mp4", MediaKind::Video, 10_000)
    }

    #[test]
    fn test_end_is_derived() {
        let mut clip = Clip::new(asset(), 0, 5000, 1000).unwrap();
        assert_eq!(clip.end_ms(), 6000);

        clip.set_start(2000).unwrap();
        assert_eq!(clip.end_ms(), 7000);
    }

    #[test]
    fn test_unrepresentable_end_rejected() {
        let near_max = u64::MAX - 10;
        assert_eq!(
            Clip::new(asset(), 0, 5000, near_max).unwrap_err(),
            TimelineError::EndOutOfRange {
                start: near_max,
                duration: 5000
            }
        );

        // Exactly u64::MAX is still representable
        let edge = Clip::new(asset(), 0, 10, near_max).unwrap();
        assert_eq!(edge.end_ms(), u64::MAX);

        let mut clip = Clip::new(asset(), 0, 5000, 0).unwrap();
        assert!(clip.set_start(near_max).is_err());
        assert_eq!(clip.start_ms(), 0);

        let mut late = Clip::new(asset(), 0, 5, near_max).unwrap();
        assert!(late.set_bounds(0, 11).is_err());
        assert_eq!(late.duration_ms(), 5);
    }

    #[test]
    fn test_deserialize_rejects_broken_clip() {
        let clip = Clip::new(asset(), 0, 1000, 500).unwrap();
        let mut value = serde_json::to_value(&clip).unwrap();
        assert_eq!(serde_json::from_value::<Clip>(value.clone()).unwrap(), clip);

        value["duration_ms"] = serde_json::json!(0);
        assert!(serde_json::from_value::<Clip>(value.clone()).is_err());

        value["duration_ms"] = serde_json::json!(1000);
        value["start_ms"] = serde_json::json!(u64::MAX);
        assert!(serde_json::from_value::<Clip>(value).is_err());
    }

    #[test]
    fn test_source_time_saturates_to_none() {
        let clip = Clip::new(asset(), u64::MAX, 100, 0).unwrap();
        assert_eq!(clip.source_time_at(0), Some(u64::MAX));
        assert_eq!(clip.source_time_at(1), None);
    }

    #[test]
    fn test_zero_duration_rejected() {
        let result = Clip::new(asset(), 0, 0, 0);
        assert_eq!(result.unwrap_err(), TimelineError::InvalidDuration);

        let mut clip = Clip::new(asset(), 0, 100, 0).unwrap();
        assert!(clip.set_bounds(10, 0).is_err());
        assert_eq!(clip.duration_ms(), 100);
    }

    #[test]
    fn test_contains_is_half_open() {
        let clip = Clip::new(asset(), 0, 1000, 500).unwrap();
        assert!(!clip.contains(499));
        assert!(clip.contains(500));
        assert!(clip.contains(1499));
        assert!(!clip.contains(1500));
    }

    #[test]
    fn test_source_time() {
        let clip = Clip::new(asset(), 2000, 1000, 500).unwrap();
        assert_eq!(clip.source_time_at(750), Some(2250));
        assert_eq!(clip.source_time_at(100), None);
    }

    #[test]
    fn test_identical_clips_have_distinct_ids() {
        let shared = asset();
        let a = Clip::new(shared.clone(), 0, 1000, 0).unwrap();
        let b = Clip::new(shared, 0, 1000, 0).unwrap();
        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
    }
}
