// Asset import and thumbnail helpers that degrade instead of failing

use crate::config::EditorConfig;
use crate::media::{MediaInfo, MediaProbe, Thumbnail, Thumbnailer};
use crate::model::{MediaAsset, MediaKind, SharedAsset};
use std::path::Path;

/// Classify probed media by its streams
pub fn infer_kind(info: &MediaInfo) -> MediaKind {
    match (&info.video, &info.audio) {
        (Some(_), _) => MediaKind::Video,
        (None, Some(_)) => MediaKind::Audio,
        (None, None) => MediaKind::Image,
    }
}

fn kind_from_extension(path: &Path) -> MediaKind {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png" | "jpg" | "jpeg" | "bmp" | "gif" | "webp") => MediaKind::Image,
        Some("wav" | "mp3" | "flac" | "aac" | "ogg" | "m4a") => MediaKind::Audio,
        _ => MediaKind::Video,
    }
}

/// Build an asset for `path`, always succeeding
///
/// A probe failure or a missing/zero duration falls back to
/// `config.fallback_asset_duration_ms`. When the probe fails entirely the
/// kind is guessed from the file extension.
pub fn import_asset<P>(probe: &P, path: &Path, config: &EditorConfig) -> SharedAsset
where
    P: MediaProbe + ?Sized,
{
    let fallback = config.fallback_asset_duration_ms;

    let (kind, duration_ms) = match probe.probe(path) {
        Ok(info) => {
            let duration = match info.duration_ms {
                Some(duration) if duration > 0 => duration,
                _ => {
                    tracing::warn!(
                        path = %path.display(),
                        fallback_ms = fallback,
                        "No duration reported, using fallback"
                    );
                    fallback
                }
            };
            (infer_kind(&info), duration)
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                fallback_ms = fallback,
                "Probe failed, using fallback duration"
            );
            (kind_from_extension(path), fallback)
        }
    };

    MediaAsset::shared(path, kind, duration_ms)
}

/// Thumbnail for `path`, or a gray square when extraction fails
pub fn thumbnail_or_placeholder<T>(
    thumbnailer: &T,
    path: &Path,
    timestamp_ms: u64,
    size: u32,
) -> Thumbnail
where
    T: Thumbnailer + ?Sized,
{
    match thumbnailer.thumbnail(path, timestamp_ms, size) {
        Ok(thumbnail) => thumbnail,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Using placeholder thumbnail");
            Thumbnail::placeholder(size)
        }
    }
}
