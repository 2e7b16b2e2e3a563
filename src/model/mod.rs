// Timeline model - Assets, clips, tracks and the timeline that orders them
//
// This is plain data: nothing here is undo-aware or notifies anyone.
// Mutation that should be undoable goes through Project + Command.

pub mod asset;
pub mod clip;
pub mod error;
pub mod timeline;
pub mod track;

pub use asset::{MediaAsset, MediaKind, SharedAsset};
pub use clip::{Clip, ClipId};
pub use error::{TimelineError, TimelineResult};
pub use timeline::{Layer, Timeline};
pub use track::Track;
