use std::path::Path;

use promoscan_core::OfferRecord;
use promoscan_parse::{OfferParser, ParseStats};
use serde::Serialize;
use thiserror::Error;

use crate::recognizer::{check_language, OcrBackend, OcrError};
use crate::upload::{content_type_for_extension, UploadError, UploadPolicy};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Upload rejected: {0}")]
    Upload(#[from] UploadError),
    #[error("OCR recognition failed: {0}")]
    Ocr(#[from] OcrError),
}

/// The result of scanning one flyer image.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    /// Raw OCR text output.
    pub ocr_text: String,
    /// Offers parsed from the OCR text, in line order.
    pub offers: Vec<OfferRecord>,
    pub stats: ParseStats,
}

/// Orchestrates: validate upload → OCR → parse offers.
pub struct ScanPipeline<R: OcrBackend> {
    recognizer: R,
    parser: OfferParser,
    policy: UploadPolicy,
    language: String,
}

impl<R: OcrBackend> ScanPipeline<R> {
    pub fn new(
        recognizer: R,
        parser: OfferParser,
        policy: UploadPolicy,
        language: impl Into<String>,
    ) -> Self {
        Self { recognizer, parser, policy, language: language.into() }
    }

    pub fn parser(&self) -> &OfferParser {
        &self.parser
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Process an image on disk; the content type comes from its extension.
    pub async fn process_file(&self, path: &Path) -> Result<ScanResult, PipelineError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();
        let content_type = content_type_for_extension(&ext)
            .ok_or_else(|| UploadError::InvalidFileType(format!(".{ext}")))?;
        let bytes = tokio::fs::read(path).await?;
        self.process_bytes(&bytes, content_type)
    }

    /// Process uploaded bytes. Blocking: recognition is CPU-bound.
    pub fn process_bytes(&self, data: &[u8], declared_type: &str) -> Result<ScanResult, PipelineError> {
        // 1. Reject anything that is not an acceptable image.
        let format = self.policy.validate(data, declared_type)?;

        // 2. Run OCR.
        check_language(&self.language)?;
        let ocr_text = self.recognizer.recognize(data, &self.language)?;
        tracing::debug!(?format, chars = ocr_text.len(), "ocr complete");

        // 3. Structure the text.
        Ok(self.scan_text(ocr_text))
    }

    /// Parse already-recognized text.
    pub fn scan_text(&self, ocr_text: String) -> ScanResult {
        let (offers, stats) = self.parser.parse_with_stats(&ocr_text);
        ScanResult { ocr_text, offers, stats }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
