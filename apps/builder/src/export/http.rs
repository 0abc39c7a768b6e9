//! HTTP-backed PDF renderer: posts the preview HTML and options as JSON to a
//! rendering endpoint and takes the response body as the document.
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::export::{ExportError, ExportOptions, PdfExporter};

#[derive(Debug, Serialize)]
struct RenderRequest<'a> {
    html: &'a str,
    options: &'a ExportOptions,
}

#[derive(Debug, Deserialize)]
struct RendererError {
    error: RendererErrorBody,
}

#[derive(Debug, Deserialize)]
struct RendererErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct HttpPdfExporter {
    client: Client,
    endpoint: String,
}

impl HttpPdfExporter {
    /// The client carries no request timeout: a hung renderer keeps the
    /// export pending until it answers.
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PdfExporter for HttpPdfExporter {
    async fn render_pdf(&self, html: &str, options: &ExportOptions) -> Result<Bytes, ExportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(&RenderRequest { html, options })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExportError::Renderer {
                status: status.as_u16(),
                message: renderer_message(body),
            });
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(ExportError::EmptyDocument);
        }

        debug!(size = bytes.len(), "renderer returned document");
        Ok(bytes)
    }
}

/// Pulls `error.message` out of a JSON error body, or returns the body as is.
fn renderer_message(body: String) -> String {
    serde_json::from_str::<RendererError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}
