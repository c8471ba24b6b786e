use std::sync::Arc;

use anyhow::Context;
use promoscan_ocr::{OcrBackend, ScanPipeline};
use promoscan_parse::OfferParser;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod routes;

use config::{LogFormat, OcrSettings, ServerConfig};
use routes::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    init_tracing(config.log_format);

    let parser = OfferParser::new(config.parser.clone()).context("Invalid parser vocabulary")?;
    let pipeline = ScanPipeline::new(
        build_recognizer(&config.ocr),
        parser,
        config.upload.clone(),
        config.ocr.language.clone(),
    );
    let app = routes::create_router(AppState { pipeline: Arc::new(pipeline) });

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(
        language = %config.ocr.language,
        max_upload_bytes = config.upload.max_bytes,
        "Listening on http://{addr}"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,promoscan=debug,tower_http=debug"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(JsonStorageLayer)
            .with(BunyanFormattingLayer::new("promoscan".into(), std::io::stdout))
            .init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[cfg(feature = "tesseract")]
fn build_recognizer(ocr: &OcrSettings) -> Box<dyn OcrBackend> {
    Box::new(promoscan_ocr::TesseractRecognizer::new(ocr.data_path.clone()))
}

#[cfg(not(feature = "tesseract"))]
fn build_recognizer(ocr: &OcrSettings) -> Box<dyn OcrBackend> {
    tracing::warn!(
        language = %ocr.language,
        "built without the `tesseract` feature; /upload will answer 503"
    );
    Box::new(promoscan_ocr::UnavailableRecognizer)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
}
