use std::sync::Arc;

use tokio::sync::Mutex;

use crate::builder::ResumeBuilder;
use crate::config::Config;
use crate::export::PdfExporter;
use crate::markup::PageTemplate;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup; there is exactly one builder instance per process.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Each request holds the lock for its whole mutation, so edits apply
    /// one at a time, run to completion.
    pub builder: Arc<Mutex<ResumeBuilder>>,
    /// Pluggable PDF renderer. Default: HttpPdfExporter.
    pub exporter: Arc<dyn PdfExporter>,
    pub page: Arc<PageTemplate>,
}

impl AppState {
    pub fn new(config: Config, exporter: Arc<dyn PdfExporter>, page: PageTemplate) -> Self {
        let builder = ResumeBuilder::new(&config.preset_skills);
        Self {
            config,
            builder: Arc::new(Mutex::new(builder)),
            exporter,
            page: Arc::new(page),
        }
    }
}
