//! Proof image handles.
//!
//! A [`ProofFile`] is only a reference to the image; its bytes are read by
//! the submission client on every attempt.

use std::path::{Path, PathBuf};

use mime::Mime;

/// Proof-of-payment image, on disk or already in memory.
#[derive(Debug, Clone)]
pub enum ProofFile {
    /// Image on the local filesystem (CLI).
    Path(PathBuf),
    /// Image received over the network (relay).
    Memory {
        file_name: String,
        content_type: Option<String>,
        bytes: Vec<u8>,
    },
}

impl ProofFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        ProofFile::Path(path.into())
    }

    pub fn in_memory(file_name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        ProofFile::Memory {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    /// File name sent with the upload.
    pub fn file_name(&self) -> String {
        match self {
            ProofFile::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "proof.jpg".to_string()),
            ProofFile::Memory { file_name, .. } => file_name.clone(),
        }
    }

    /// Declared content type, falling back to a guess from the extension.
    pub fn content_type(&self) -> Mime {
        if let ProofFile::Memory { content_type: Some(ct), .. } = self {
            if let Ok(mime) = ct.parse::<Mime>() {
                return mime;
            }
        }
        guess_mime(Path::new(&self.file_name()))
    }

    pub fn is_image(&self) -> bool {
        self.content_type().type_() == mime::IMAGE
    }

    /// Read the image bytes.
    pub async fn read(&self) -> std::io::Result<Vec<u8>> {
        match self {
            ProofFile::Path(path) => tokio::fs::read(path).await,
            ProofFile::Memory { bytes, .. } => Ok(bytes.clone()),
        }
    }
}

/// Content type from a file extension.
fn guess_mime(path: &Path) -> Mime {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => mime::IMAGE_JPEG,
        "png" => mime::IMAGE_PNG,
        "gif" => mime::IMAGE_GIF,
        "bmp" => mime::IMAGE_BMP,
        "svg" => mime::IMAGE_SVG,
        "webp" => "image/webp".parse().unwrap_or(mime::APPLICATION_OCTET_STREAM),
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_guess() {
        assert_eq!(ProofFile::from_path("/tmp/bukti.JPG").content_type(), mime::IMAGE_JPEG);
        assert_eq!(ProofFile::from_path("shot.png").content_type(), mime::IMAGE_PNG);
        assert_eq!(ProofFile::from_path("shot.webp").content_type().essence_str(), "image/webp");
        assert!(!ProofFile::from_path("notes.txt").is_image());
    }

    #[test]
    fn test_memory_file_prefers_declared_type() {
        let file = ProofFile::in_memory("upload.bin", Some("image/png".into()), vec![1]);
        assert_eq!(file.content_type(), mime::IMAGE_PNG);
        assert_eq!(file.file_name(), "upload.bin");

        let file = ProofFile::in_memory("upload.jpeg", Some("not a mime".into()), vec![1]);
        assert_eq!(file.content_type(), mime::IMAGE_JPEG);
    }

    #[test]
    fn test_path_file_name() {
        assert_eq!(ProofFile::from_path("/home/u/bukti.jpg").file_name(), "bukti.jpg");
    }
}
