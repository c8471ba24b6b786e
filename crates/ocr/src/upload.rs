use image::ImageFormat;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Empty upload")]
    Empty,
    #[error("File too large: {size} bytes (limit {limit})")]
    TooLarge { size: usize, limit: usize },
    #[error("Invalid file type: {0}")]
    InvalidFileType(String),
    #[error("Declared type {declared} does not match file content ({detected})")]
    ContentMismatch { declared: String, detected: String },
}

/// What an uploaded flyer image must satisfy before it reaches OCR.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UploadPolicy {
    pub max_bytes: usize,
    /// Lowercase MIME types, e.g. `image/png`.
    pub allowed_types: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: 5 * 1024 * 1024,
            allowed_types: vec![
                "image/jpeg".to_string(),
                "image/png".to_string(),
                "image/webp".to_string(),
            ],
        }
    }
}

impl UploadPolicy {
    /// Check size, declared MIME type and the actual image signature.
    /// Returns the sniffed format.
    pub fn validate(&self, data: &[u8], declared_type: &str) -> Result<ImageFormat, UploadError> {
        if data.is_empty() {
            return Err(UploadError::Empty);
        }
        if data.len() > self.max_bytes {
            return Err(UploadError::TooLarge { size: data.len(), limit: self.max_bytes });
        }

        let declared = normalize_mime(declared_type);
        if !self.allowed_types.iter().any(|t| normalize_mime(t) == declared) {
            return Err(UploadError::InvalidFileType(declared));
        }

        let detected = image::guess_format(data)
            .map_err(|_| UploadError::InvalidFileType("unrecognized image content".to_string()))?;
        if detected.to_mime_type() != declared {
            return Err(UploadError::ContentMismatch {
                declared,
                detected: detected.to_mime_type().to_string(),
            });
        }
        Ok(detected)
    }
}

/// MIME type for a file extension (`jpg` → `image/jpeg`).
pub fn content_type_for_extension(ext: &str) -> Option<&'static str> {
    ImageFormat::from_extension(ext).map(|f| f.to_mime_type())
}

/// Lowercase, drop parameters, fold the common `image/jpg` alias.
fn normalize_mime(mime: &str) -> String {
    let base = mime.split(';').next().unwrap_or_default().trim().to_lowercase();
    match base.as_str() {
        "image/jpg" | "image/pjpeg" => "image/jpeg".to_string(),
        _ => base,
    }
}
