//! `PUT /api/templates/edit/{template_id}`: replaces a stored template with an
//! edited draft. Unchanged content leaves the stored row (and its review
//! status) alone.

use actix_web::{web, HttpResponse};
use log::info;
use template_common::requests::EditResponse;
use template_common::{submit, TemplateDraft};

use crate::db;
use crate::error::ServiceError;
use crate::state::AppState;

/// # Arguments
/// * `state` - Application state holding the database path.
/// * `template_id` - The template's id, extracted from the URL path.
/// * `payload` - The edited draft.
///
/// # Returns
/// - `200 OK` with `{id, changed}`; a changed template is back to `PENDING`.
/// - `400 Bad Request` with the validation message.
/// - `404 Not Found` if no template has that id.
/// - `409 Conflict` when the new name is taken by another template.
pub async fn process(
    state: web::Data<AppState>,
    template_id: web::Path<String>,
    payload: web::Json<TemplateDraft>,
) -> Result<HttpResponse, ServiceError> {
    let request = submit(&payload)?;
    let id = template_id.into_inner();
    let changed = {
        let id = id.clone();
        db::run(&state.db_path, move |conn| db::update(conn, &id, &request)).await?
    };
    if changed {
        info!("Template {} edited, back to review", id);
    }
    Ok(HttpResponse::Ok().json(EditResponse { id, changed }))
}
