//! `POST /api/templates/create`: validates a draft, shapes it into the API
//! request and stores it as a new `PENDING` template.

use actix_web::{web, HttpResponse};
use log::info;
use template_common::requests::CreatedResponse;
use template_common::{submit, TemplateDraft};

use crate::db;
use crate::error::ServiceError;
use crate::state::AppState;

/// # Returns
/// - `201 Created` with `{id}`.
/// - `400 Bad Request` with the validation message.
/// - `409 Conflict` when the name is already used for the draft's language.
pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<TemplateDraft>,
) -> Result<HttpResponse, ServiceError> {
    let request = submit(&payload)?;
    let name = request.name.clone();
    let id = db::run(&state.db_path, move |conn| db::insert(conn, &request)).await?;
    info!("Created template {} with id {}", name, id);
    Ok(HttpResponse::Created().json(CreatedResponse { id }))
}
