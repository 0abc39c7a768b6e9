//! PDF export: hands the rendered preview to an external renderer.
//!
//! The renderer sits behind the `PdfExporter` trait; `AppState` carries an
//! `Arc<dyn PdfExporter>`. One export is a single-shot future with two
//! outcomes: the PDF bytes, or a failure with detail. There is no timeout,
//! no retry and no way to cancel an export once started.

pub mod handlers;
pub mod http;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::builder::ResumeBuilder;

pub use self::http::HttpPdfExporter;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("renderer error (status {status}): {message}")]
    Renderer { status: u16, message: String },

    #[error("renderer returned an empty document")]
    EmptyDocument,

    #[error("export interrupted: {0}")]
    Interrupted(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Options
// ────────────────────────────────────────────────────────────────────────────

/// Export settings that do not depend on the form, loaded from config.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    pub margin_mm: f32,
    pub image_quality: f32,
    pub scale: f32,
    pub page_format: String,
    pub orientation: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            margin_mm: 10.0,
            image_quality: 0.98,
            scale: 2.0,
            page_format: "a4".to_string(),
            orientation: "portrait".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageOptions {
    pub format: String,
    pub quality: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageOptions {
    pub unit: String,
    pub format: String,
    pub orientation: String,
}

/// The configuration object sent to the renderer with every export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportOptions {
    pub filename: String,
    /// Top, right, bottom, left.
    pub margin_mm: [f32; 4],
    pub image: ImageOptions,
    pub scale: f32,
    pub page: PageOptions,
}

impl ExportSettings {
    pub fn options_for(&self, name: &str) -> ExportOptions {
        ExportOptions {
            filename: export_filename(name),
            margin_mm: [self.margin_mm; 4],
            image: ImageOptions {
                format: "jpeg".to_string(),
                quality: self.image_quality,
            },
            scale: self.scale,
            page: PageOptions {
                unit: "mm".to_string(),
                format: self.page_format.clone(),
                orientation: self.orientation.clone(),
            },
        }
    }
}

/// Output filename derived from the name field.
/// Whitespace runs become `_`, anything but letters, digits, `-` and `_` is dropped.
pub fn export_filename(name: &str) -> String {
    let slug = name
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    if slug.is_empty() {
        "resume.pdf".to_string()
    } else {
        format!("{slug}_resume.pdf")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Renderer trait
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait PdfExporter: Send + Sync {
    async fn render_pdf(&self, html: &str, options: &ExportOptions) -> Result<Bytes, ExportError>;
}

#[derive(Debug, Clone)]
pub struct ExportedPdf {
    pub filename: String,
    pub bytes: Bytes,
}

// ────────────────────────────────────────────────────────────────────────────
// Export flow
// ────────────────────────────────────────────────────────────────────────────

/// Runs one export to completion on its own task, so a dropped caller cannot
/// leave the preview stuck in the exporting state.
pub async fn export_preview(
    builder: Arc<Mutex<ResumeBuilder>>,
    exporter: Arc<dyn PdfExporter>,
    settings: ExportSettings,
) -> Result<ExportedPdf, ExportError> {
    tokio::spawn(run_export(builder, exporter, settings))
        .await
        .map_err(|e| ExportError::Interrupted(e.to_string()))?
}

async fn run_export(
    builder: Arc<Mutex<ResumeBuilder>>,
    exporter: Arc<dyn PdfExporter>,
    settings: ExportSettings,
) -> Result<ExportedPdf, ExportError> {
    // The lock is held only to flip the flag and snapshot the preview.
    let ticket = builder.lock().await.begin_export();
    let options = settings.options_for(&ticket.name);
    info!(filename = %options.filename, "starting PDF export");

    let render = tokio::spawn({
        let options = options.clone();
        async move { exporter.render_pdf(&ticket.html, &options).await }
    });
    let outcome = match render.await {
        Ok(result) => result,
        Err(e) => Err(ExportError::Interrupted(e.to_string())),
    };

    let failure = outcome.as_ref().err().map(|e| {
        warn!("PDF export failed: {e}");
        format!("Could not export PDF: {e}")
    });
    builder.lock().await.finish_export(failure);

    let bytes = outcome?;
    info!(filename = %options.filename, size = bytes.len(), "PDF export finished");
    Ok(ExportedPdf {
        filename: options.filename,
        bytes,
    })
}
