mod builder;
mod config;
mod errors;
mod export;
mod markup;
mod models;
mod preview;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::export::HttpPdfExporter;
use crate::markup::PageTemplate;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume builder v{}", env!("CARGO_PKG_VERSION"));

    // Verify the host page before anything else; a missing element is fatal.
    let page = PageTemplate::load(config.page_template.as_deref())
        .context("host page does not satisfy the markup contract")?;
    info!("Page template verified");

    // Initialize the PDF renderer client
    let exporter = HttpPdfExporter::new(config.pdf_render_url.clone());
    info!("PDF renderer endpoint: {}", exporter.endpoint());

    info!(
        "Preset skills: {} | export {} {} at {}x",
        config.preset_skills.join(", "),
        config.export.page_format,
        config.export.orientation,
        config.export.scale
    );

    // Build app state
    let state = AppState::new(config.clone(), Arc::new(exporter), page);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
