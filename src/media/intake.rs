// SPDX-License-Identifier: MPL-2.0
//! Reading user-chosen files, classifying their media type and writing
//! saved images back to disk.

use crate::error::Result;
use image_rs::ImageFormat;
use std::path::{Path, PathBuf};

/// Media type reported for files whose extension is not a known image format.
pub const UNKNOWN_MIME_TYPE: &str = "application/octet-stream";

/// A file read from disk, not yet validated as an image.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl IncomingFile {
    pub fn is_image(&self) -> bool {
        is_image_type(&self.mime_type)
    }
}

/// Whether a media type belongs to the `image/*` family.
pub fn is_image_type(mime_type: &str) -> bool {
    mime_type.starts_with("image/")
}

/// Media type declared by the file name's extension, falling back to the
/// content signature when the extension is unknown.
pub fn detect_mime_type(path: &Path, bytes: &[u8]) -> &'static str {
    ImageFormat::from_path(path)
        .or_else(|_| image_rs::guess_format(bytes))
        .map(|format| format.to_mime_type())
        .unwrap_or(UNKNOWN_MIME_TYPE)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Reads a file from disk on the blocking pool.
pub async fn read_file(path: PathBuf) -> Result<IncomingFile> {
    tokio::task::spawn_blocking(move || read_file_sync(&path)).await?
}

pub fn read_file_sync(path: &Path) -> Result<IncomingFile> {
    let bytes = std::fs::read(path)?;
    tracing::debug!(path = %path.display(), size = bytes.len(), "read file");
    Ok(IncomingFile {
        name: file_name(path),
        mime_type: detect_mime_type(path, &bytes).to_string(),
        bytes,
    })
}

/// Writes bytes to the chosen destination on the blocking pool.
pub async fn write_file(path: PathBuf, bytes: std::sync::Arc<[u8]>) -> Result<PathBuf> {
    tokio::task::spawn_blocking(move || -> Result<PathBuf> {
        std::fs::write(&path, &bytes)?;
        tracing::info!(path = %path.display(), size = bytes.len(), "saved image");
        Ok(path)
    })
    .await?
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn image_types_are_recognized() {
        assert!(is_image_type("image/png"));
        assert!(is_image_type("image/jpeg"));
        assert!(!is_image_type("text/plain"));
        assert!(!is_image_type(""));
    }

    #[test]
    fn mime_type_follows_extension() {
        assert_eq!(detect_mime_type(Path::new("a.png"), b""), "image/png");
        assert_eq!(detect_mime_type(Path::new("a.JPG"), b""), "image/jpeg");
        assert_eq!(detect_mime_type(Path::new("a.webp"), b""), "image/webp");
        assert_eq!(detect_mime_type(Path::new("notes.txt"), b"hello"), UNKNOWN_MIME_TYPE);
        assert_eq!(detect_mime_type(Path::new("no_extension"), b""), UNKNOWN_MIME_TYPE);
    }

    #[test]
    fn unknown_extension_falls_back_to_signature() {
        let png_signature = b"\x89PNG\r\n\x1a\n";
        assert_eq!(detect_mime_type(Path::new("download"), png_signature), "image/png");
    }

    #[test]
    fn read_file_sync_captures_name_type_and_bytes() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("photo.png");
        fs::write(&path, b"not really a png").expect("write");

        let file = read_file_sync(&path).expect("read");
        assert_eq!(file.name, "photo.png");
        assert_eq!(file.mime_type, "image/png");
        assert_eq!(file.bytes, b"not really a png");
        assert!(file.is_image());
    }

    #[test]
    fn read_file_sync_reports_missing_file() {
        let dir = tempdir().expect("temp dir");
        let result = read_file_sync(&dir.path().join("missing.png"));
        assert!(matches!(result, Err(crate::error::Error::Io(_))));
    }

    #[test]
    fn text_files_are_not_images() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("readme.txt");
        fs::write(&path, b"hello").expect("write");

        let file = read_file_sync(&path).expect("read");
        assert!(!file.is_image());
    }
}
