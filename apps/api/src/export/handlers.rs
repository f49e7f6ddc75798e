//! Axum route handlers for the Export API.

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::pipeline::{export_document, ExportOutcome};
use crate::layout::{Document, PageSpec};
use crate::profile::{resolve, EnhancementRecord, MissingDataPolicy, ProfileSources, ResolvedProfile};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Page spec and policy stay raw so that bad overrides surface as 400s.
#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub record: Value,
    #[serde(default)]
    pub page_spec: Option<Value>,
    #[serde(default)]
    pub on_missing_data: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub export_id: Uuid,
    /// Footer timestamp. Not part of the layout.
    pub generated_at: DateTime<Utc>,
    pub profile_sources: ProfileSources,
    pub document: Document,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/export/profile
///
/// Content-resolution preview: the canonical profile with per-field provenance.
pub async fn handle_export_profile(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<Json<ResolvedProfile>, AppError> {
    let policy = request_policy(&state, request.on_missing_data.as_deref())?;
    let record = EnhancementRecord::from_value(request.record);

    let profile = tokio::task::spawn_blocking(move || resolve(&record, policy))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed resolving profile: {e}"))
        })?;

    Ok(Json(profile))
}

/// POST /api/v1/export/layout
///
/// Full pipeline: resolve → build blocks → paginate. Returns the paginated document
/// for a render backend; no bytes are produced here.
pub async fn handle_export_layout(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<Json<ExportResponse>, AppError> {
    let spec = request_spec(&state, request.page_spec)?;
    let policy = request_policy(&state, request.on_missing_data.as_deref())?;
    let record = EnhancementRecord::from_value(request.record);

    let ExportOutcome { profile, document } =
        tokio::task::spawn_blocking(move || export_document(&record, policy, &spec))
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("spawn_blocking failed in export pipeline: {e}"))
            })?;

    let export_id = Uuid::new_v4();
    info!(%export_id, pages = document.page_count(), "Export document generated");

    Ok(Json(ExportResponse {
        export_id,
        generated_at: Utc::now(),
        profile_sources: profile.sources,
        document,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Request validation
// ────────────────────────────────────────────────────────────────────────────

/// The service default, or a validated per-request override.
fn request_spec(state: &AppState, raw: Option<Value>) -> Result<Arc<PageSpec>, AppError> {
    let Some(raw) = raw.filter(|v| !v.is_null()) else {
        return Ok(Arc::clone(&state.page_spec));
    };
    let spec: PageSpec = serde_json::from_value(raw)
        .map_err(|e| AppError::Validation(format!("page_spec is malformed: {e}")))?;
    spec.validate()
        .map_err(|e| AppError::Validation(format!("page_spec is invalid: {e}")))?;
    Ok(Arc::new(spec))
}

fn request_policy(state: &AppState, raw: Option<&str>) -> Result<MissingDataPolicy, AppError> {
    match raw {
        None => Ok(state.config.on_missing_data),
        Some(raw) => raw.parse().map_err(AppError::Validation),
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::json;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::routes::build_router;
    use crate::state::AppState;

    use super::*;

    fn app() -> Router {
        build_router(AppState::new(Config::default(), PageSpec::default()))
    }

    async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app()
            .oneshot(
                Request::post(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_layout_returns_paginated_document() {
        let (status, body) = post(
            "/api/v1/export/layout",
            json!({"record": {
                "personalInfo": {"name": "Jane Doe", "title": "Backend Engineer"},
                "keywordAnalysis": ["SQL", "Go", "Testing"]
            }}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["document"]["pages"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["document"]["suggested_filename"], "CV_Backend_Engineer");
        assert_eq!(body["profile_sources"]["skills"], "enhancement");
        assert!(body["export_id"].is_string());
    }

    #[tokio::test]
    async fn test_non_object_record_gives_empty_document() {
        let (status, body) = post("/api/v1/export/layout", json!({"record": "oops"})).await;
        assert_eq!(status, StatusCode::OK);
        let pages = &body["document"]["pages"];
        assert_eq!(pages.as_array().map(Vec::len), Some(1));
        assert_eq!(pages[0]["blocks"], json!([]));
    }

    #[tokio::test]
    async fn test_invalid_page_spec_is_rejected() {
        let mut spec = serde_json::to_value(PageSpec::default()).unwrap();
        spec["pageWidth"] = json!(-10.0);
        let (status, body) =
            post("/api/v1/export/layout", json!({"record": {}, "page_spec": spec})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_malformed_page_spec_is_rejected() {
        let (status, _) = post(
            "/api/v1/export/layout",
            json!({"record": {}, "page_spec": {"pageWidth": "wide"}}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_policy_is_rejected() {
        let (status, body) = post(
            "/api/v1/export/profile",
            json!({"record": {}, "on_missing_data": "invent"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_profile_preview_reports_placeholder_source() {
        let (status, body) = post(
            "/api/v1/export/profile",
            json!({"record": {}, "on_missing_data": "placeholder"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sources"]["skills"], "placeholder");
        assert_eq!(body["sources"]["experience"], "placeholder");
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
