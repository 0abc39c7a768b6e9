use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::builder::{BuilderSnapshot, SyncReport};
use crate::errors::AppError;
use crate::models::resume::{EducationField, ExperienceField, PersonalField, RowHandle};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PersonalUpdate {
    pub field: PersonalField,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct EducationUpdate {
    pub field: EducationField,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct ExperienceUpdate {
    pub field: ExperienceField,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct PresetToggle {
    pub checked: bool,
}

#[derive(Debug, Deserialize)]
pub struct TagText {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct TagResponse {
    pub accepted: bool,
    #[serde(flatten)]
    pub report: SyncReport,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /
pub async fn handle_page(State(state): State<AppState>) -> Html<String> {
    let builder = state.builder.lock().await;
    Html(state.page.render(&builder))
}

/// GET /api/v1/builder
pub async fn handle_snapshot(State(state): State<AppState>) -> Json<BuilderSnapshot> {
    Json(state.builder.lock().await.snapshot())
}

/// PATCH /api/v1/builder/personal
pub async fn handle_set_personal(
    State(state): State<AppState>,
    Json(req): Json<PersonalUpdate>,
) -> Json<SyncReport> {
    Json(state.builder.lock().await.set_personal(req.field, req.value))
}

/// POST /api/v1/builder/education
pub async fn handle_add_education(
    State(state): State<AppState>,
) -> (StatusCode, Json<SyncReport>) {
    let report = state.builder.lock().await.add_education_row();
    (StatusCode::CREATED, Json(report))
}

/// PATCH /api/v1/builder/education/:handle
pub async fn handle_set_education(
    State(state): State<AppState>,
    Path(handle): Path<RowHandle>,
    Json(req): Json<EducationUpdate>,
) -> Result<Json<SyncReport>, AppError> {
    let report = state
        .builder
        .lock()
        .await
        .set_education_field(handle, req.field, req.value)?;
    Ok(Json(report))
}

/// POST /api/v1/builder/experience
pub async fn handle_add_experience(
    State(state): State<AppState>,
) -> (StatusCode, Json<SyncReport>) {
    let report = state.builder.lock().await.add_experience_row();
    (StatusCode::CREATED, Json(report))
}

/// PATCH /api/v1/builder/experience/:handle
pub async fn handle_set_experience(
    State(state): State<AppState>,
    Path(handle): Path<RowHandle>,
    Json(req): Json<ExperienceUpdate>,
) -> Result<Json<SyncReport>, AppError> {
    let report = state
        .builder
        .lock()
        .await
        .set_experience_field(handle, req.field, req.value)?;
    Ok(Json(report))
}

/// DELETE /api/v1/builder/education/:handle and /api/v1/builder/experience/:handle
///
/// Handles are unique across both lists, so one handler serves both routes.
pub async fn handle_remove_row(
    State(state): State<AppState>,
    Path(handle): Path<RowHandle>,
) -> Result<Json<SyncReport>, AppError> {
    let report = state.builder.lock().await.remove_row(handle)?;
    Ok(Json(report))
}

/// PUT /api/v1/builder/skills/presets/:name
pub async fn handle_set_preset(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<PresetToggle>,
) -> Result<Json<SyncReport>, AppError> {
    let report = state.builder.lock().await.set_preset(&name, req.checked)?;
    Ok(Json(report))
}

/// PUT /api/v1/builder/skills/draft
pub async fn handle_set_draft(
    State(state): State<AppState>,
    Json(req): Json<TagText>,
) -> StatusCode {
    state.builder.lock().await.set_tag_draft(req.text);
    StatusCode::NO_CONTENT
}

/// POST /api/v1/builder/skills/draft/commit
pub async fn handle_commit_draft(State(state): State<AppState>) -> Json<TagResponse> {
    let (accepted, report) = state.builder.lock().await.commit_tag_draft();
    Json(TagResponse { accepted, report })
}

/// POST /api/v1/builder/skills/tags
pub async fn handle_add_tag(
    State(state): State<AppState>,
    Json(req): Json<TagText>,
) -> Json<TagResponse> {
    let (accepted, report) = state.builder.lock().await.add_tag(&req.text);
    Json(TagResponse { accepted, report })
}

/// DELETE /api/v1/builder/skills/tags/:text
pub async fn handle_remove_tag(
    State(state): State<AppState>,
    Path(text): Path<String>,
) -> Json<SyncReport> {
    Json(state.builder.lock().await.remove_tag(&text))
}

/// POST /api/v1/builder/reset
pub async fn handle_reset(State(state): State<AppState>) -> Json<SyncReport> {
    Json(state.builder.lock().await.reset())
}

/// DELETE /api/v1/builder/notice
pub async fn handle_dismiss_notice(State(state): State<AppState>) -> StatusCode {
    state.builder.lock().await.dismiss_notice();
    StatusCode::NO_CONTENT
}
