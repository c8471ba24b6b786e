use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Image decode error: {0}")]
    ImageDecode(String),
    #[error("Unsupported OCR language: {0}")]
    UnsupportedLanguage(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
    #[error("Tesseract not available: build with the `tesseract` feature")]
    NotAvailable,
}

/// Abstraction over an OCR backend.
/// Implementations accept raw PNG/JPEG/WEBP bytes plus a Tesseract-style
/// language code (`spa`, `eng`, `spa+eng`) and return the recognized text.
pub trait OcrBackend: Send + Sync {
    fn recognize(&self, image_bytes: &[u8], language: &str) -> Result<String, OcrError>;
}

impl<T: OcrBackend + ?Sized> OcrBackend for Box<T> {
    fn recognize(&self, image_bytes: &[u8], language: &str) -> Result<String, OcrError> {
        (**self).recognize(image_bytes, language)
    }
}

/// Reject language codes Tesseract could never load (`../x`, empty, `spa eng`).
pub fn check_language(language: &str) -> Result<(), OcrError> {
    let valid = !language.is_empty()
        && language
            .split('+')
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    if valid {
        Ok(())
    } else {
        Err(OcrError::UnsupportedLanguage(language.to_string()))
    }
}

// ── Mock backend (always available, used for tests) ───────────────────────────

/// Returns a pre-set string, for exercising the parsing pipeline in tests
/// without requiring Tesseract to be installed.
pub struct MockRecognizer {
    pub text: String,
    /// When set, any other language fails with `UnsupportedLanguage`.
    pub languages: Option<Vec<String>>,
}

impl MockRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), languages: None }
    }

    pub fn with_languages(mut self, languages: &[&str]) -> Self {
        self.languages = Some(languages.iter().map(|l| l.to_string()).collect());
        self
    }
}

impl OcrBackend for MockRecognizer {
    fn recognize(&self, _image_bytes: &[u8], language: &str) -> Result<String, OcrError> {
        if let Some(languages) = &self.languages {
            if !languages.iter().any(|l| l == language) {
                return Err(OcrError::UnsupportedLanguage(language.to_string()));
            }
        }
        Ok(self.text.clone())
    }
}

/// Stand-in when the binary was built without an OCR engine.
pub struct UnavailableRecognizer;

impl OcrBackend for UnavailableRecognizer {
    fn recognize(&self, _image_bytes: &[u8], _language: &str) -> Result<String, OcrError> {
        Err(OcrError::NotAvailable)
    }
}

// ── Tesseract backend (optional, gated behind `tesseract` feature) ─────────────

#[cfg(feature = "tesseract")]
pub mod tesseract_backend {
    use super::{OcrBackend, OcrError};
    use leptess::LepTess;

    pub struct TesseractRecognizer {
        data_path: Option<String>,
    }

    impl TesseractRecognizer {
        pub fn new(data_path: Option<String>) -> Self {
            Self { data_path }
        }
    }

    impl OcrBackend for TesseractRecognizer {
        fn recognize(&self, image_bytes: &[u8], language: &str) -> Result<String, OcrError> {
            // Init fails when the traineddata for `language` is missing.
            let mut lt = LepTess::new(self.data_path.as_deref(), language)
                .map_err(|e| OcrError::UnsupportedLanguage(format!("{language}: {e}")))?;
            lt.set_image_from_mem(image_bytes)
                .map_err(|e| OcrError::ImageDecode(e.to_string()))?;
            lt.get_utf8_text().map_err(|e| OcrError::Engine(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_returns_preset_text() {
        let r = MockRecognizer::new("MARTES\nRestobar Visa 30%");
        assert_eq!(r.recognize(b"fake image data", "spa").unwrap(), "MARTES\nRestobar Visa 30%");
    }

    #[test]
    fn mock_ignores_image_content() {
        let r = MockRecognizer::new("hello");
        assert_eq!(r.recognize(b"anything", "eng").unwrap(), "hello");
        assert_eq!(r.recognize(b"", "spa").unwrap(), "hello");
    }

    #[test]
    fn mock_language_restriction() {
        let r = MockRecognizer::new("x").with_languages(&["spa"]);
        assert!(r.recognize(b"", "spa").is_ok());
        assert!(matches!(r.recognize(b"", "klingon"), Err(OcrError::UnsupportedLanguage(l)) if l == "klingon"));
    }

    #[test]
    fn boxed_backend_delegates() {
        let r: Box<dyn OcrBackend> = Box::new(MockRecognizer::new("boxed"));
        assert_eq!(r.recognize(b"", "spa").unwrap(), "boxed");
    }

    #[test]
    fn unavailable_always_fails() {
        assert!(matches!(UnavailableRecognizer.recognize(b"", "spa"), Err(OcrError::NotAvailable)));
    }

    #[test]
    fn check_language_accepts_tesseract_codes() {
        assert!(check_language("spa").is_ok());
        assert!(check_language("spa+eng").is_ok());
        assert!(check_language("chi_sim").is_ok());
    }

    #[test]
    fn check_language_rejects_malformed() {
        for bad in ["", "spa+", "../etc", "spa eng"] {
            assert!(check_language(bad).is_err(), "accepted {bad:?}");
        }
    }
}
