// Timeline model errors

use super::clip::ClipId;

/// Errors raised by track and timeline lookups or clip invariants
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimelineError {
    #[error("Track {0} not found")]
    TrackNotFound(u32),

    #[error("Clip {clip} not found on track {track}")]
    ClipNotFound { track: u32, clip: ClipId },

    #[error("Clip duration must be greater than zero")]
    InvalidDuration,

    #[error("Clip end out of range: start {start} ms + duration {duration} ms")]
    EndOutOfRange { start: u64, duration: u64 },
}

pub type TimelineResult<T> = Result<T, TimelineError>;
