use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use promoscan_ocr::{OcrError, PipelineError, UploadError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No file uploaded (expected multipart field `{0}`)")]
    MissingField(&'static str),
    #[error("Expected a multipart/form-data upload: {0}")]
    NotMultipart(#[from] MultipartRejection),
    #[error("Malformed upload: {0}")]
    Multipart(#[from] MultipartError),
    #[error("Unreadable request body: {0}")]
    Body(#[from] BytesRejection),
    #[error("Request body is not valid UTF-8: {0}")]
    InvalidText(#[from] std::str::Utf8Error),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error("Processing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingField(_) | ApiError::InvalidText(_) => StatusCode::BAD_REQUEST,
            ApiError::NotMultipart(e) => e.status(),
            ApiError::Multipart(e) => e.status(),
            ApiError::Body(e) => e.status(),
            ApiError::Pipeline(PipelineError::Upload(e)) => match e {
                UploadError::Empty => StatusCode::BAD_REQUEST,
                UploadError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
                UploadError::InvalidFileType(_) | UploadError::ContentMismatch { .. } => {
                    StatusCode::UNSUPPORTED_MEDIA_TYPE
                }
            },
            ApiError::Pipeline(PipelineError::Ocr(e)) => match e {
                OcrError::UnsupportedLanguage(_) => StatusCode::UNPROCESSABLE_ENTITY,
                OcrError::NotAvailable => StatusCode::SERVICE_UNAVAILABLE,
                OcrError::ImageDecode(_) | OcrError::Engine(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Pipeline(PipelineError::Io(_)) | ApiError::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            tracing::error!(%status, error = %message, "request failed");
        } else {
            tracing::warn!(%status, error = %message, "request rejected");
        }
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
