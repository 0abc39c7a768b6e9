use axum::{extract::State, http::header, response::IntoResponse};

use crate::errors::AppError;
use crate::export::export_preview;
use crate::state::AppState;

/// POST /api/v1/export
///
/// Renders the current preview to PDF and returns it as a download.
/// On failure the builder records a notice and the request answers 502.
pub async fn handle_export(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let pdf = export_preview(
        state.builder.clone(),
        state.exporter.clone(),
        state.config.export.clone(),
    )
    .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", pdf.filename),
            ),
        ],
        pdf.bytes,
    ))
}
