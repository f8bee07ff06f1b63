//! Filesystem adapters for VisionChat.
//!
//! Implements the `VideoReader` port from `visionchat-core` over `tokio::fs`.

use std::path::Path;

use visionchat_core::media::reader::VideoReader;

/// MIME type used when the extension is unknown.
pub const FALLBACK_VIDEO_MIME: &str = "video/mp4";

/// Detect a video MIME type from the file extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "mpeg" | "mpg" => "video/mpeg",
        "wmv" => "video/x-ms-wmv",
        "flv" => "video/x-flv",
        "3gp" => "video/3gpp",
        _ => FALLBACK_VIDEO_MIME,
    }
}

/// Reads videos from the local filesystem.
pub struct LocalVideoReader;

impl LocalVideoReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalVideoReader {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoReader for LocalVideoReader {
    fn mime_type(&self, path: &Path) -> String {
        mime_for_path(path).to_string()
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>, std::io::Error> {
        tokio::fs::read(path).await
    }
}
