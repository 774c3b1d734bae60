use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::dashboard::DashboardState;
use crate::errors::AppError;
use crate::models::resume::Resume;
use crate::models::template::{find_template, template_catalog, ResumeTemplate};
use crate::state::AppState;

fn resume_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Resume {id} not found"))
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<Vec<ResumeTemplate>> {
    Json(template_catalog())
}

/// GET /api/v1/dashboard
pub async fn handle_get_dashboard(State(state): State<AppState>) -> Json<DashboardState> {
    Json(state.dashboard.lock().await.state())
}

/// POST /api/v1/dashboard/back
/// Leaves the picker or builder without saving.
pub async fn handle_back(State(state): State<AppState>) -> Json<DashboardState> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard.back();
    Json(dashboard.state())
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(State(state): State<AppState>) -> Json<Vec<Resume>> {
    Json(state.dashboard.lock().await.resumes().to_vec())
}

/// POST /api/v1/resumes/new
pub async fn handle_create(State(state): State<AppState>) -> Json<DashboardState> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard.create();
    Json(dashboard.state())
}

/// POST /api/v1/templates/:id/select
pub async fn handle_select_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DashboardState>, AppError> {
    let template =
        find_template(&id).ok_or_else(|| AppError::NotFound(format!("Template {id} not found")))?;
    let mut dashboard = state.dashboard.lock().await;
    dashboard.select_template(template);
    Ok(Json(dashboard.state()))
}

/// POST /api/v1/resumes/:id/edit
pub async fn handle_edit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DashboardState>, AppError> {
    let mut dashboard = state.dashboard.lock().await;
    let resume = dashboard
        .find(id)
        .cloned()
        .ok_or_else(|| resume_not_found(id))?;
    dashboard.edit(&resume);
    Ok(Json(dashboard.state()))
}

/// POST /api/v1/resumes/:id/duplicate
pub async fn handle_duplicate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<Resume>), AppError> {
    let mut dashboard = state.dashboard.lock().await;
    let resume = dashboard
        .find(id)
        .cloned()
        .ok_or_else(|| resume_not_found(id))?;
    let copy = dashboard.duplicate(&resume).await;
    Ok((StatusCode::CREATED, Json(copy)))
}

/// DELETE /api/v1/resumes/:id
/// Deleting an absent id is not an error.
pub async fn handle_delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> StatusCode {
    state.dashboard.lock().await.delete(id).await;
    StatusCode::NO_CONTENT
}

/// GET /api/v1/resumes/:id/export
/// Downloads the resume's core content as a JSON attachment.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let (filename, document) = state
        .dashboard
        .lock()
        .await
        .export(id)
        .ok_or_else(|| resume_not_found(id))?;
    let body = serde_json::to_string_pretty(&document).map_err(anyhow::Error::from)?;
    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        filename.replace('"', "")
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/json")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
