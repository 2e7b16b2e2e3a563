// Media - Boundary to the decoding, compositing and encoding backend
//
// The editing core never touches codecs. It talks to a backend through the
// traits below; a concrete backend (FFmpeg or otherwise) lives outside this
// crate.

pub mod frame;
pub mod import;

pub use frame::{AudioChunk, Thumbnail, VideoFrame, PLACEHOLDER_RGBA};
pub use import::{import_asset, infer_kind, thumbnail_or_placeholder};

use crate::project::ProjectMetadata;
use std::path::Path;

/// Errors reported by a media backend
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaError {
    #[error("Probe failed for {path}: {reason}")]
    ProbeFailed { path: String, reason: String },

    #[error("Thumbnail extraction failed: {0}")]
    ThumbnailFailed(String),

    #[error("Unsupported media: {0}")]
    Unsupported(String),

    #[error("Encoding failed: {0}")]
    EncodeFailed(String),
}

/// Video stream properties
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoInfo {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
}

/// Audio stream properties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioInfo {
    pub sample_rate: u32,
    pub channels: u16,
}

/// What a probe learned about a file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaInfo {
    /// `None` when the container does not report a duration
    pub duration_ms: Option<u64>,
    pub video: Option<VideoInfo>,
    pub audio: Option<AudioInfo>,
}

pub trait MediaProbe {
    fn probe(&self, path: &Path) -> Result<MediaInfo, MediaError>;
}

pub trait Thumbnailer {
    /// Extract the frame at `timestamp_ms`, scaled to `size`×`size`
    fn thumbnail(&self, path: &Path, timestamp_ms: u64, size: u32)
        -> Result<Thumbnail, MediaError>;
}

pub trait Compositor {
    /// Blend `layers` bottom to top with alpha-over onto one canvas
    fn compose(&self, layers: &[VideoFrame]) -> VideoFrame;
}

/// Output parameters handed to an encoder
#[derive(Debug, Clone, PartialEq)]
pub struct EncoderSettings {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// Display aspect ratio written into the container
    pub display_aspect: f64,
    pub sample_rate: u32,
    pub channels: u16,
    pub video_codec: String,
    pub audio_codec: String,
}

impl EncoderSettings {
    /// Settings matching a project's frame format, with stereo 48 kHz audio
    pub fn for_project(metadata: &ProjectMetadata) -> Self {
        Self {
            width: metadata.width,
            height: metadata.height,
            fps: metadata.fps,
            display_aspect: metadata.aspect_ratio(),
            sample_rate: 48_000,
            channels: 2,
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
        }
    }
}

/// Sink for an export: frames and samples are submitted in presentation order
pub trait MediaEncoder {
    fn start(&mut self) -> Result<(), MediaError>;
    fn submit_video(&mut self, frame: VideoFrame) -> Result<(), MediaError>;
    fn submit_audio(&mut self, chunk: AudioChunk) -> Result<(), MediaError>;
    /// Flush and close the output
    fn finish(&mut self) -> Result<(), MediaError>;
}
