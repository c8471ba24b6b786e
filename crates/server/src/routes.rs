//! Router and request handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use promoscan_core::OfferRecord;
use promoscan_ocr::{OcrBackend, ScanPipeline};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;

/// Multipart field carrying the flyer image.
pub const UPLOAD_FIELD: &str = "image";

/// Room for multipart boundaries and part headers on top of the image itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub type Pipeline = ScanPipeline<Box<dyn OcrBackend>>;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub offers: Vec<OfferRecord>,
    /// Raw OCR text, returned so clients can show what was read.
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub offers: Vec<OfferRecord>,
}

pub fn create_router(state: AppState) -> Router {
    let body_limit = state.pipeline.policy().max_bytes + MULTIPART_OVERHEAD;

    Router::new()
        .route("/health", get(health))
        .route("/upload", post(upload))
        .route("/parse", post(parse_text))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

/// Validate, OCR and parse one uploaded flyer image.
async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let (bytes, content_type) = read_image_field(&mut multipart?).await?;
    tracing::info!(size = bytes.len(), %content_type, "flyer upload received");

    let pipeline = Arc::clone(&state.pipeline);
    let result =
        tokio::task::spawn_blocking(move || pipeline.process_bytes(&bytes, &content_type)).await??;

    tracing::info!(
        offers = result.stats.emitted,
        dropped = result.stats.dropped,
        "flyer scanned"
    );
    Ok(Json(UploadResponse { offers: result.offers, text: result.ocr_text }))
}

/// Parse text that was recognized elsewhere.
async fn parse_text(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ParseResponse>, ApiError> {
    let body = body?;
    let text = std::str::from_utf8(&body)?;
    let offers = state.pipeline.parser().parse(text);
    tracing::info!(offers = offers.len(), "text parsed");
    Ok(Json(ParseResponse { offers }))
}

async fn read_image_field(multipart: &mut Multipart) -> Result<(Bytes, String), ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field.bytes().await?;
        return Ok((bytes, content_type));
    }
    Err(ApiError::MissingField(UPLOAD_FIELD))
}
