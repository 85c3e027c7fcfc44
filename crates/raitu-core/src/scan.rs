//! Crop photo analysis: encode an image file as a data URI and submit it.

use std::path::{Path, PathBuf};

use base64::Engine as _;

use crate::client::{ApiClient, ClientError};

/// MIME type for an image path, from its extension.
pub fn image_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}

/// Encode bytes as `data:<mime>;base64,<payload>`.
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!(
        "data:{mime};base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Read an image file and return it as a data URI.
pub fn image_data_uri(path: &Path) -> Result<String, ScanError> {
    let mime = image_mime(path).ok_or_else(|| ScanError::UnsupportedImage(path.to_path_buf()))?;
    let bytes = std::fs::read(path).map_err(|e| ScanError::Read(path.to_path_buf(), e))?;
    if bytes.is_empty() {
        return Err(ScanError::EmptyImage(path.to_path_buf()));
    }
    tracing::debug!(path = %path.display(), mime, size = bytes.len(), "encoded image");
    Ok(encode_data_uri(mime, &bytes))
}

/// Analyze a crop photo. The returned text is shown as-is.
pub async fn analyze_file(client: &ApiClient, path: &Path) -> Result<String, ScanError> {
    let uri = image_data_uri(path)?;
    Ok(client.analyze_image(&uri).await?)
}

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("unsupported image type: {0}")]
    UnsupportedImage(PathBuf),
    #[error("image is empty: {0}")]
    EmptyImage(PathBuf),
    #[error("read error for {0}: {1}")]
    Read(PathBuf, std::io::Error),
    #[error("analysis failed: {0}")]
    Client(#[from] ClientError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_from_extension() {
        assert_eq!(image_mime(Path::new("leaf.JPG")), Some("image/jpeg"));
        assert_eq!(image_mime(Path::new("leaf.png")), Some("image/png"));
        assert_eq!(image_mime(Path::new("notes.txt")), None);
        assert_eq!(image_mime(Path::new("noext")), None);
    }

    #[test]
    fn data_uri_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaf.png");
        std::fs::write(&path, b"abc").unwrap();
        assert_eq!(image_data_uri(&path).unwrap(), "data:image/png;base64,YWJj");
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaf.bmp");
        std::fs::write(&path, b"abc").unwrap();
        assert!(matches!(
            image_data_uri(&path),
            Err(ScanError::UnsupportedImage(_))
        ));
    }

    #[test]
    fn missing_and_empty_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.jpg");
        assert!(matches!(image_data_uri(&missing), Err(ScanError::Read(..))));
        let empty = dir.path().join("empty.jpg");
        std::fs::write(&empty, b"").unwrap();
        assert!(matches!(image_data_uri(&empty), Err(ScanError::EmptyImage(_))));
    }
}
