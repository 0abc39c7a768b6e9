pub mod health;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::builder::handlers;
use crate::export::handlers::handle_export;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(handlers::handle_page))
        // Builder API
        .route("/api/v1/builder", get(handlers::handle_snapshot))
        .route(
            "/api/v1/builder/personal",
            patch(handlers::handle_set_personal),
        )
        .route(
            "/api/v1/builder/education",
            post(handlers::handle_add_education),
        )
        .route(
            "/api/v1/builder/education/:handle",
            patch(handlers::handle_set_education).delete(handlers::handle_remove_row),
        )
        .route(
            "/api/v1/builder/experience",
            post(handlers::handle_add_experience),
        )
        .route(
            "/api/v1/builder/experience/:handle",
            patch(handlers::handle_set_experience).delete(handlers::handle_remove_row),
        )
        .route(
            "/api/v1/builder/skills/presets/:name",
            put(handlers::handle_set_preset),
        )
        .route("/api/v1/builder/skills/draft", put(handlers::handle_set_draft))
        .route(
            "/api/v1/builder/skills/draft/commit",
            post(handlers::handle_commit_draft),
        )
        .route("/api/v1/builder/skills/tags", post(handlers::handle_add_tag))
        .route(
            "/api/v1/builder/skills/tags/:text",
            delete(handlers::handle_remove_tag),
        )
        .route("/api/v1/builder/reset", post(handlers::handle_reset))
        .route(
            "/api/v1/builder/notice",
            delete(handlers::handle_dismiss_notice),
        )
        // Export API
        .route("/api/v1/export", post(handle_export))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::{default_presets, Config};
    use crate::export::tests::FakeExporter;
    use crate::export::ExportSettings;
    use crate::markup::PageTemplate;

    fn test_state(fail_export: bool) -> AppState {
        let config = Config {
            pdf_render_url: "http://renderer.invalid/render".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            page_template: None,
            preset_skills: default_presets(),
            export: ExportSettings::default(),
        };
        AppState::new(
            config,
            Arc::new(FakeExporter::new(fail_export)),
            PageTemplate::built_in().unwrap(),
        )
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state(false));
        let response = send(&app, Method::GET, "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_page_renders_template() {
        let app = build_router(test_state(false));
        let response = send(&app, Method::GET, "/", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("id=\"resumePreview\""));
        assert!(html.contains("aria-valuenow=\"0\""));
    }

    #[tokio::test]
    async fn test_personal_edit_returns_identity_and_progress() {
        let app = build_router(test_state(false));
        let response = send(
            &app,
            Method::PATCH,
            "/api/v1/builder/personal",
            Some(json!({"field": "name", "value": "Ada Lovelace"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["progress"], 14);
        assert_eq!(body["visible"], true);
        assert_eq!(body["sections"][0]["section"], "identity");
        assert_eq!(body["sections"][0]["content"]["name"], "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_lovelace_scenario_over_http() {
        let app = build_router(test_state(false));
        let snapshot = json_body(send(&app, Method::GET, "/api/v1/builder", None).await).await;
        let edu = snapshot["form"]["education"][0]["handle"]
            .as_str()
            .unwrap()
            .to_string();

        send(
            &app,
            Method::PATCH,
            "/api/v1/builder/personal",
            Some(json!({"field": "name", "value": "Ada Lovelace"})),
        )
        .await;
        send(
            &app,
            Method::PATCH,
            &format!("/api/v1/builder/education/{edu}"),
            Some(json!({"field": "school", "value": "Trinity"})),
        )
        .await;
        send(
            &app,
            Method::PATCH,
            &format!("/api/v1/builder/education/{edu}"),
            Some(json!({"field": "year", "value": "1840"})),
        )
        .await;
        let response = send(
            &app,
            Method::PUT,
            "/api/v1/builder/skills/presets/Python",
            Some(json!({"checked": true})),
        )
        .await;
        assert_eq!(json_body(response).await["progress"], 43);

        let snapshot = json_body(send(&app, Method::GET, "/api/v1/builder", None).await).await;
        assert_eq!(
            snapshot["signals"],
            json!({
                "name": true, "email": false, "phone": false, "summary": false,
                "education": true, "experience": false, "skills": true
            })
        );
        assert_eq!(snapshot["preview"]["education"][0]["primary"], "Trinity");
        assert_eq!(snapshot["preview"]["education"][0]["secondary"], "1840");
    }

    #[tokio::test]
    async fn test_add_and_remove_experience_row() {
        let app = build_router(test_state(false));
        let response = send(&app, Method::POST, "/api/v1/builder/experience", None).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["focus"]["field"], "role");
        let handle = body["focus"]["row"].as_str().unwrap().to_string();

        let response = send(
            &app,
            Method::DELETE,
            &format!("/api/v1/builder/experience/{handle}"),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let snapshot = json_body(send(&app, Method::GET, "/api/v1/builder", None).await).await;
        assert_eq!(snapshot["form"]["experience"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_row_is_not_found() {
        let app = build_router(test_state(false));
        let response = send(
            &app,
            Method::PATCH,
            "/api/v1/builder/education/6f1c1f4e-3d0b-4c55-9a51-7a0e1f2b3c4d",
            Some(json!({"field": "degree", "value": "BSc"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_unknown_preset_is_not_found() {
        let app = build_router(test_state(false));
        let response = send(
            &app,
            Method::PUT,
            "/api/v1/builder/skills/presets/COBOL",
            Some(json!({"checked": true})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_tag_dedupe_and_draft_commit() {
        let app = build_router(test_state(false));
        let first = json_body(
            send(
                &app,
                Method::POST,
                "/api/v1/builder/skills/tags",
                Some(json!({"text": "Go"})),
            )
            .await,
        )
        .await;
        assert_eq!(first["accepted"], true);

        send(
            &app,
            Method::PUT,
            "/api/v1/builder/skills/draft",
            Some(json!({"text": " Go "})),
        )
        .await;
        let commit = json_body(
            send(&app, Method::POST, "/api/v1/builder/skills/draft/commit", None).await,
        )
        .await;
        assert_eq!(commit["accepted"], false);

        let snapshot = json_body(send(&app, Method::GET, "/api/v1/builder", None).await).await;
        assert_eq!(snapshot["form"]["skills"]["tags"], json!(["Go"]));
        assert_eq!(snapshot["form"]["skills"]["draft"], "");

        let response = send(&app, Method::DELETE, "/api/v1/builder/skills/tags/Go", None).await;
        assert_eq!(json_body(response).await["progress"], 0);
    }

    #[tokio::test]
    async fn test_reset_hides_preview() {
        let app = build_router(test_state(false));
        send(
            &app,
            Method::PATCH,
            "/api/v1/builder/personal",
            Some(json!({"field": "email", "value": "ada@example.com"})),
        )
        .await;
        let body = json_body(send(&app, Method::POST, "/api/v1/builder/reset", None).await).await;
        assert_eq!(body["visible"], false);
        assert_eq!(body["progress"], 0);
        assert_eq!(body["sections"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_export_success_returns_pdf() {
        let app = build_router(test_state(false));
        send(
            &app,
            Method::PATCH,
            "/api/v1/builder/personal",
            Some(json!({"field": "name", "value": "Ada Lovelace"})),
        )
        .await;
        let response = send(&app, Method::POST, "/api/v1/export", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/pdf"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Ada_Lovelace_resume.pdf\""
        );
    }

    #[tokio::test]
    async fn test_export_failure_sets_notice_until_dismissed() {
        let app = build_router(test_state(true));
        let response = send(&app, Method::POST, "/api/v1/export", None).await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(json_body(response).await["error"]["code"], "EXPORT_FAILED");

        let snapshot = json_body(send(&app, Method::GET, "/api/v1/builder", None).await).await;
        assert_eq!(snapshot["preview"]["exporting"], false);
        assert!(snapshot["notice"]["message"].as_str().unwrap().contains("boom"));

        let response = send(&app, Method::DELETE, "/api/v1/builder/notice", None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let snapshot = json_body(send(&app, Method::GET, "/api/v1/builder", None).await).await;
        assert!(snapshot["notice"].is_null());
    }
}
