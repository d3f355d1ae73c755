//! # Template Retrieval
//!
//! - `GET /api/templates/get/{template_id}` returns the stored template.
//! - `GET /api/templates/get/{template_id}/draft` returns it rebuilt as an
//!   editable draft, examples re-synchronised with the body text, which is
//!   what the edit form is seeded with.

use actix_web::{web, HttpResponse};
use template_common::transform::draft_from_components;

use crate::db;
use crate::error::ServiceError;
use crate::state::AppState;

/// Actix web handler for `GET /api/templates/get/{template_id}`.
///
/// # Arguments
/// * `state` - Application state holding the database path.
/// * `template_id` - The template's id, extracted from the URL path.
///
/// # Returns
/// - `200 OK` with the `SavedTemplate` as JSON.
/// - `404 Not Found` if no template has that id.
pub async fn process(
    state: web::Data<AppState>,
    template_id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let id = template_id.into_inner();
    let template = db::run(&state.db_path, move |conn| db::fetch(conn, &id)).await?;
    Ok(HttpResponse::Ok().json(template))
}

/// Actix web handler for `GET /api/templates/get/{template_id}/draft`.
///
/// # Returns
/// - `200 OK` with a `TemplateDraft` rebuilt from the stored components.
/// - `404 Not Found` if no template has that id.
pub async fn draft(
    state: web::Data<AppState>,
    template_id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let id = template_id.into_inner();
    let template = db::run(&state.db_path, move |conn| db::fetch(conn, &id)).await?;
    let draft = draft_from_components(
        &template.name,
        template.category,
        &template.language,
        &template.components,
    );
    Ok(HttpResponse::Ok().json(draft))
}
