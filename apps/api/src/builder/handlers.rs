use axum::{
    body::Bytes,
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::builder::fields::{EntryCollection, EntryField, PersonalField};
use crate::builder::presentation::{
    Dropdown, Presentation, PresentationUpdate, ACCENT_COLORS, FONT_SIZES, SUGGESTED_FONTS,
};
use crate::builder::sections::SectionKey;
use crate::builder::{Builder, PhotoUpload};
use crate::dashboard::Dashboard;
use crate::errors::AppError;
use crate::models::resume::{OptionalPersonalField, Resume};
use crate::preview::{render_markdown, render_preview, PreviewDocument};
use crate::state::AppState;

fn open_builder(dashboard: &mut Dashboard) -> Result<&mut Builder, AppError> {
    dashboard.builder_mut().ok_or_else(AppError::no_builder)
}

fn snapshot(builder: &Builder) -> Response {
    Json(builder.snapshot()).into_response()
}

// ──── Request / response bodies ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct TitleRequest {
    pub title: String,
}

#[derive(Deserialize)]
pub struct SignatureRequest {
    pub signature: String,
}

#[derive(Deserialize)]
pub struct PersonalFieldRequest {
    pub field: PersonalField,
    pub value: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadlineRequest {
    pub use_as_headline: bool,
}

#[derive(Deserialize)]
pub struct EntryFieldRequest {
    pub field: EntryField,
    pub value: String,
}

#[derive(Deserialize)]
pub struct CurrentFlagRequest {
    pub current: bool,
}

#[derive(Deserialize)]
pub struct OptionalValueRequest {
    pub value: String,
}

#[derive(Serialize)]
pub struct AppliedResponse {
    pub applied: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadAck {
    pub message: &'static str,
    pub file_name: String,
}

// ──── Session ────────────────────────────────────────────────────────────

/// GET /api/v1/builder
pub async fn handle_get_builder(State(state): State<AppState>) -> Result<Response, AppError> {
    let mut dashboard = state.dashboard.lock().await;
    Ok(snapshot(open_builder(&mut dashboard)?))
}

/// POST /api/v1/builder/save
/// Commits the draft, stores it, and returns to the list.
pub async fn handle_save(State(state): State<AppState>) -> Result<Json<Resume>, AppError> {
    let mut dashboard = state.dashboard.lock().await;
    let saved = dashboard
        .save_builder()
        .await
        .ok_or_else(AppError::no_builder)?;
    Ok(Json(saved))
}

/// GET /api/v1/builder/options
/// Catalogs the builder's pickers offer.
pub async fn handle_options() -> Json<Value> {
    let colors: Vec<Value> = ACCENT_COLORS
        .iter()
        .map(|(name, hex)| json!({ "name": name, "value": hex }))
        .collect();
    let optional_fields: Vec<Value> = OptionalPersonalField::ALL
        .iter()
        .map(|f| json!({ "field": f, "label": f.label() }))
        .collect();
    Json(json!({
        "fonts": SUGGESTED_FONTS,
        "colors": colors,
        "fontSizes": FONT_SIZES,
        "optionalFields": optional_fields,
        "sections": SectionKey::ALL,
    }))
}

// ──── Content ────────────────────────────────────────────────────────────

/// PUT /api/v1/builder/title
pub async fn handle_set_title(
    State(state): State<AppState>,
    Json(req): Json<TitleRequest>,
) -> Result<Response, AppError> {
    let mut dashboard = state.dashboard.lock().await;
    let builder = open_builder(&mut dashboard)?;
    builder.set_title(req.title);
    Ok(snapshot(builder))
}

/// PUT /api/v1/builder/signature
pub async fn handle_set_signature(
    State(state): State<AppState>,
    Json(req): Json<SignatureRequest>,
) -> Result<Response, AppError> {
    let mut dashboard = state.dashboard.lock().await;
    let builder = open_builder(&mut dashboard)?;
    builder.set_signature(req.signature);
    Ok(snapshot(builder))
}

/// PATCH /api/v1/builder/personal
pub async fn handle_set_personal(
    State(state): State<AppState>,
    Json(req): Json<PersonalFieldRequest>,
) -> Result<Response, AppError> {
    let mut dashboard = state.dashboard.lock().await;
    let builder = open_builder(&mut dashboard)?;
    builder.set_personal_field(req.field, req.value);
    Ok(snapshot(builder))
}

/// PUT /api/v1/builder/headline
pub async fn handle_set_headline(
    State(state): State<AppState>,
    Json(req): Json<HeadlineRequest>,
) -> Result<Response, AppError> {
    let mut dashboard = state.dashboard.lock().await;
    let builder = open_builder(&mut dashboard)?;
    builder.set_use_as_headline(req.use_as_headline);
    Ok(snapshot(builder))
}

/// POST /api/v1/builder/entries/:collection
/// Appends a blank entry and returns its index.
pub async fn handle_add_entry(
    State(state): State<AppState>,
    Path(collection): Path<EntryCollection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let mut dashboard = state.dashboard.lock().await;
    let index = open_builder(&mut dashboard)?.add_entry(collection);
    Ok((StatusCode::CREATED, Json(json!({ "index": index }))))
}

/// PATCH /api/v1/builder/entries/:collection/:index
/// Out-of-range indices and foreign fields are ignored, reported as `applied: false`.
pub async fn handle_update_entry(
    State(state): State<AppState>,
    Path((collection, index)): Path<(EntryCollection, usize)>,
    Json(req): Json<EntryFieldRequest>,
) -> Result<Json<AppliedResponse>, AppError> {
    let mut dashboard = state.dashboard.lock().await;
    let applied =
        open_builder(&mut dashboard)?.update_entry_field(collection, index, req.field, req.value);
    Ok(Json(AppliedResponse { applied }))
}

/// PUT /api/v1/builder/entries/:collection/:index/current
pub async fn handle_set_current(
    State(state): State<AppState>,
    Path((collection, index)): Path<(EntryCollection, usize)>,
    Json(req): Json<CurrentFlagRequest>,
) -> Result<Json<AppliedResponse>, AppError> {
    let mut dashboard = state.dashboard.lock().await;
    let applied = open_builder(&mut dashboard)?.set_current_flag(collection, index, req.current);
    Ok(Json(AppliedResponse { applied }))
}

/// PUT /api/v1/builder/optional-fields/:field
pub async fn handle_set_optional_value(
    State(state): State<AppState>,
    Path(field): Path<OptionalPersonalField>,
    Json(req): Json<OptionalValueRequest>,
) -> Result<Response, AppError> {
    let mut dashboard = state.dashboard.lock().await;
    let builder = open_builder(&mut dashboard)?;
    builder.set_optional_personal_value(field, req.value);
    Ok(snapshot(builder))
}

// ──── View state ─────────────────────────────────────────────────────────

/// POST /api/v1/builder/sections/:section/toggle
pub async fn handle_toggle_section(
    State(state): State<AppState>,
    Path(section): Path<SectionKey>,
) -> Result<Json<Value>, AppError> {
    let mut dashboard = state.dashboard.lock().await;
    let expanded = open_builder(&mut dashboard)?.toggle_section_expanded(section);
    Ok(Json(json!({ "section": section, "expanded": expanded })))
}

/// POST /api/v1/builder/sections/:section/open
pub async fn handle_open_section(
    State(state): State<AppState>,
    Path(section): Path<SectionKey>,
) -> Result<Json<Value>, AppError> {
    let mut dashboard = state.dashboard.lock().await;
    open_builder(&mut dashboard)?.open_section(section);
    Ok(Json(json!({ "section": section, "expanded": true })))
}

/// POST /api/v1/builder/optional-fields/:field/toggle
pub async fn handle_toggle_optional_field(
    State(state): State<AppState>,
    Path(field): Path<OptionalPersonalField>,
) -> Result<Json<Value>, AppError> {
    let mut dashboard = state.dashboard.lock().await;
    let visible = open_builder(&mut dashboard)?.toggle_optional_personal_field(field);
    Ok(Json(json!({ "field": field, "visible": visible })))
}

/// PATCH /api/v1/builder/presentation
pub async fn handle_set_presentation(
    State(state): State<AppState>,
    Json(update): Json<PresentationUpdate>,
) -> Result<Json<Presentation>, AppError> {
    let mut dashboard = state.dashboard.lock().await;
    let builder = open_builder(&mut dashboard)?;
    builder.set_presentation(update);
    Ok(Json(builder.presentation().clone()))
}

/// POST /api/v1/builder/dropdowns/:dropdown/toggle
pub async fn handle_toggle_dropdown(
    State(state): State<AppState>,
    Path(dropdown): Path<Dropdown>,
) -> Result<Json<Value>, AppError> {
    let mut dashboard = state.dashboard.lock().await;
    let open = open_builder(&mut dashboard)?.toggle_dropdown(dropdown);
    Ok(Json(json!({ "openDropdown": open })))
}

/// POST /api/v1/builder/dropdowns/close
pub async fn handle_close_dropdowns(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let mut dashboard = state.dashboard.lock().await;
    open_builder(&mut dashboard)?.close_dropdowns();
    Ok(Json(json!({ "openDropdown": null })))
}

// ──── Uploads ────────────────────────────────────────────────────────────

struct UploadedFile {
    file_name: String,
    content_type: String,
    data: Bytes,
}

/// Reads the first multipart part that carries a file.
async fn read_file(mut multipart: Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        return Ok(UploadedFile {
            file_name,
            content_type,
            data,
        });
    }
    Err(AppError::Validation("No file in upload".to_string()))
}

/// POST /api/v1/builder/photo
/// The body is read before the dashboard lock is taken.
pub async fn handle_upload_photo(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let file = read_file(multipart).await?;
    if !file.content_type.starts_with("image/") {
        return Err(AppError::Validation(format!(
            "Photo must be an image, got {}",
            file.content_type
        )));
    }

    let photo = PhotoUpload {
        file_name: file.file_name,
        content_type: file.content_type,
        data: file.data,
    };
    let summary = photo.summary();

    let mut dashboard = state.dashboard.lock().await;
    open_builder(&mut dashboard)?.attach_photo(photo);
    Ok(Json(json!({ "photo": summary })))
}

/// GET /api/v1/builder/photo
pub async fn handle_get_photo(State(state): State<AppState>) -> Result<Response, AppError> {
    let mut dashboard = state.dashboard.lock().await;
    let photo = open_builder(&mut dashboard)?
        .photo()
        .ok_or_else(|| AppError::NotFound("No photo attached".to_string()))?;
    Ok((
        [(header::CONTENT_TYPE, photo.content_type.clone())],
        photo.data.clone(),
    )
        .into_response())
}

/// POST /api/v1/builder/upload
/// Accepts an existing resume document. Nothing is extracted from it.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadAck>, AppError> {
    let file = read_file(multipart).await?;
    info!(
        "Resume document '{}' uploaded ({} bytes)",
        file.file_name,
        file.data.len()
    );

    let mut dashboard = state.dashboard.lock().await;
    let message = open_builder(&mut dashboard)?.acknowledge_resume_upload(&file.file_name);
    Ok(Json(UploadAck {
        message,
        file_name: file.file_name,
    }))
}

// ──── Preview ────────────────────────────────────────────────────────────

/// GET /api/v1/builder/preview
pub async fn handle_preview(
    State(state): State<AppState>,
) -> Result<Json<PreviewDocument>, AppError> {
    let mut dashboard = state.dashboard.lock().await;
    Ok(Json(render_preview(open_builder(&mut dashboard)?)))
}

/// GET /api/v1/builder/preview.md
pub async fn handle_preview_markdown(State(state): State<AppState>) -> Result<Response, AppError> {
    let mut dashboard = state.dashboard.lock().await;
    let doc = render_preview(open_builder(&mut dashboard)?);
    Ok((
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        render_markdown(&doc),
    )
        .into_response())
}
