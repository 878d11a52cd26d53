//! URL media classification for gallery consolidation.

/// Media category a URL falls into, judged by its path extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

const IMAGE_EXTENSIONS: &[&str] = &["apng", "avif", "bmp", "gif", "jpeg", "jpg", "png", "webp"];
const VIDEO_EXTENSIONS: &[&str] = &["avi", "m4v", "mkv", "mov", "mp4", "webm"];
const AUDIO_EXTENSIONS: &[&str] = &["aac", "flac", "m4a", "mp3", "ogg", "opus", "wav"];

/// Classify a URL by the extension of its path component. Query string and
/// fragment are ignored.
pub fn classify_url(url: &str) -> Option<MediaKind> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let file = path.rsplit('/').next().unwrap_or(path);
    let (_, extension) = file.rsplit_once('.')?;
    let extension = extension.to_ascii_lowercase();

    if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        Some(MediaKind::Image)
    } else if VIDEO_EXTENSIONS.contains(&extension.as_str()) {
        Some(MediaKind::Video)
    } else if AUDIO_EXTENSIONS.contains(&extension.as_str()) {
        Some(MediaKind::Audio)
    } else {
        None
    }
}

/// True for URLs that belong in a gallery rather than a plain link.
pub fn is_media_url(url: &str) -> bool {
    classify_url(url).is_some()
}
