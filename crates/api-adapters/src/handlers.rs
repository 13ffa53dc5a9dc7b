//! # Handlers
//!
//! Each handler pulls exactly the fields it needs out of the request and hands
//! them to `ReportService`. No validation happens here; failures go straight
//! to `ApiError`.

use askama::Template;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use axum::response::Html;
use axum::Json;
use domains::{CloseConfirmation, Comment, CommentDraft, Report, ReportDraft};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;
use crate::templates::NotFoundTemplate;

#[derive(Debug, Serialize, Deserialize)]
pub struct ReportList {
    pub reports: Vec<Report>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ClosePayload {
    pub password: Option<String>,
}

/// GET /reports
pub async fn list_reports(State(state): State<AppState>) -> Result<Json<ReportList>, ApiError> {
    let reports = state.reports.list_open_reports().await?;
    Ok(Json(ReportList { reports }))
}

/// POST /reports
pub async fn create_report(
    State(state): State<AppState>,
    payload: Result<Json<ReportDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Report>), ApiError> {
    let Json(draft) = payload?;
    let report = state.reports.create_report(draft).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// DELETE /reports/{report_id}
pub async fn close_report(
    State(state): State<AppState>,
    Path(report_id): Path<String>,
    payload: Result<Json<ClosePayload>, JsonRejection>,
) -> Result<Json<CloseConfirmation>, ApiError> {
    let Json(ClosePayload { password }) = payload?;
    let confirmation = state.reports.close_report(&report_id, password).await?;
    Ok(Json(confirmation))
}

/// POST /reports/{report_id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    Path(report_id): Path<String>,
    payload: Result<Json<CommentDraft>, JsonRejection>,
) -> Result<Json<Comment>, ApiError> {
    let Json(draft) = payload?;
    let comment = state.reports.create_comment(&report_id, draft).await?;
    Ok(Json(comment))
}

/// Fallback for unmatched routes.
pub async fn not_found(uri: Uri) -> (StatusCode, Html<String>) {
    tracing::debug!(path = %uri.path(), "no route matched");
    let page = NotFoundTemplate
        .render()
        .unwrap_or_else(|_| "<p>Page Not Found</p>".to_string());
    (StatusCode::NOT_FOUND, Html(page))
}
