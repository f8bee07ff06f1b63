//! VideoReader trait for abstracting video file access.
//!
//! The `LocalVideoReader` adapter lives in visionchat-infra.

use std::path::Path;

/// Reads a selected video and reports its MIME type.
pub trait VideoReader: Send + Sync {
    /// MIME type for the file, detected from its extension.
    fn mime_type(&self, path: &Path) -> String;

    /// Read the whole file into memory.
    fn read(
        &self,
        path: &Path,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, std::io::Error>> + Send;
}
