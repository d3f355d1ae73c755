//! `PUT /api/templates/{template_id}/status`: records a review outcome.

use actix_web::{web, HttpResponse};
use log::info;
use template_common::requests::StatusRequest;

use crate::db;
use crate::error::ServiceError;
use crate::state::AppState;

/// # Arguments
/// * `state` - Application state holding the database path.
/// * `template_id` - The template's id, extracted from the URL path.
/// * `payload` - JSON body `{"status": "APPROVED"}`.
///
/// # Returns
/// - `200 OK` with the updated `SavedTemplate`.
/// - `404 Not Found` if no template has that id.
pub async fn process(
    state: web::Data<AppState>,
    template_id: web::Path<String>,
    payload: web::Json<StatusRequest>,
) -> Result<HttpResponse, ServiceError> {
    let id = template_id.into_inner();
    let status = payload.into_inner().status;
    let template = db::run(&state.db_path, move |conn| db::set_status(conn, &id, status)).await?;
    info!("Template {} is now {}", template.id, status.as_str());
    Ok(HttpResponse::Ok().json(template))
}
