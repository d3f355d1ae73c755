//! `POST /api/templates/{template_id}/duplicate`: stores a copy of a template
//! under the name given in the body. The copy goes through review again.

use actix_web::{web, HttpResponse};
use log::info;
use template_common::requests::{CreatedResponse, DuplicateRequest};
use template_common::validate::check_name;

use crate::db;
use crate::error::ServiceError;
use crate::state::AppState;

/// # Returns
/// - `201 Created` with the copy's `{id}`.
/// - `400 Bad Request` if the new name is blank, malformed or too long.
/// - `404 Not Found` if the source template does not exist.
/// - `409 Conflict` if the name is already used for the source's language.
pub async fn process(
    state: web::Data<AppState>,
    template_id: web::Path<String>,
    payload: web::Json<DuplicateRequest>,
) -> Result<HttpResponse, ServiceError> {
    let name = payload.into_inner().name.trim().to_string();
    check_name(&name)?;
    let source = template_id.into_inner();
    let id = {
        let source = source.clone();
        db::run(&state.db_path, move |conn| db::duplicate(conn, &source, &name)).await?
    };
    info!("Duplicated template {} as {}", source, id);
    Ok(HttpResponse::Created().json(CreatedResponse { id }))
}
