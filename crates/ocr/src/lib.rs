pub mod pipeline;
pub mod recognizer;
pub mod upload;

pub use pipeline::{PipelineError, ScanPipeline, ScanResult};
pub use recognizer::{check_language, MockRecognizer, OcrBackend, OcrError, UnavailableRecognizer};
pub use upload::{content_type_for_extension, UploadError, UploadPolicy};

#[cfg(feature = "tesseract")]
pub use recognizer::tesseract_backend::TesseractRecognizer;
