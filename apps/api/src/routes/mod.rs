pub mod health;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::builder::handlers as builder;
use crate::dashboard::handlers as dashboard;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Dashboard
        .route("/api/v1/templates", get(dashboard::handle_list_templates))
        .route(
            "/api/v1/templates/:id/select",
            post(dashboard::handle_select_template),
        )
        .route("/api/v1/dashboard", get(dashboard::handle_get_dashboard))
        .route("/api/v1/dashboard/back", post(dashboard::handle_back))
        .route("/api/v1/resumes", get(dashboard::handle_list_resumes))
        .route("/api/v1/resumes/new", post(dashboard::handle_create))
        .route("/api/v1/resumes/:id", delete(dashboard::handle_delete))
        .route("/api/v1/resumes/:id/edit", post(dashboard::handle_edit))
        .route(
            "/api/v1/resumes/:id/duplicate",
            post(dashboard::handle_duplicate),
        )
        .route("/api/v1/resumes/:id/export", get(dashboard::handle_export))
        // Builder
        .route("/api/v1/builder", get(builder::handle_get_builder))
        .route("/api/v1/builder/options", get(builder::handle_options))
        .route("/api/v1/builder/save", post(builder::handle_save))
        .route("/api/v1/builder/title", put(builder::handle_set_title))
        .route(
            "/api/v1/builder/signature",
            put(builder::handle_set_signature),
        )
        .route(
            "/api/v1/builder/personal",
            patch(builder::handle_set_personal),
        )
        .route(
            "/api/v1/builder/headline",
            put(builder::handle_set_headline),
        )
        .route(
            "/api/v1/builder/sections/:section/toggle",
            post(builder::handle_toggle_section),
        )
        .route(
            "/api/v1/builder/sections/:section/open",
            post(builder::handle_open_section),
        )
        .route(
            "/api/v1/builder/entries/:collection",
            post(builder::handle_add_entry),
        )
        .route(
            "/api/v1/builder/entries/:collection/:index",
            patch(builder::handle_update_entry),
        )
        .route(
            "/api/v1/builder/entries/:collection/:index/current",
            put(builder::handle_set_current),
        )
        .route(
            "/api/v1/builder/optional-fields/:field/toggle",
            post(builder::handle_toggle_optional_field),
        )
        .route(
            "/api/v1/builder/optional-fields/:field",
            put(builder::handle_set_optional_value),
        )
        .route(
            "/api/v1/builder/presentation",
            patch(builder::handle_set_presentation),
        )
        .route(
            "/api/v1/builder/dropdowns/:dropdown/toggle",
            post(builder::handle_toggle_dropdown),
        )
        .route(
            "/api/v1/builder/dropdowns/close",
            post(builder::handle_close_dropdowns),
        )
        .route(
            "/api/v1/builder/photo",
            post(builder::handle_upload_photo).get(builder::handle_get_photo),
        )
        .route("/api/v1/builder/upload", post(builder::handle_upload_resume))
        .route("/api/v1/builder/preview", get(builder::handle_preview))
        .route(
            "/api/v1/builder/preview.md",
            get(builder::handle_preview_markdown),
        )
        .with_state(state)
}
