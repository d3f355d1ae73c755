//! Template removal, one at a time or in bulk.

use actix_web::{web, HttpResponse};
use log::info;
use template_common::requests::{BulkDeleteRequest, BulkDeleteResponse};

use crate::db;
use crate::error::ServiceError;
use crate::state::AppState;

/// `DELETE /api/templates/{template_id}`: `200 OK`, or `404` for an unknown id.
pub async fn process(
    state: web::Data<AppState>,
    template_id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let id = template_id.into_inner();
    {
        let id = id.clone();
        db::run(&state.db_path, move |conn| db::delete(conn, &id)).await?;
    }
    info!("Deleted template {}", id);
    Ok(HttpResponse::Ok().finish())
}

/// `POST /api/templates/bulk-delete`: deletes all listed ids atomically and
/// reports how many existed.
pub async fn bulk(
    state: web::Data<AppState>,
    payload: web::Json<BulkDeleteRequest>,
) -> Result<HttpResponse, ServiceError> {
    let ids = payload.into_inner().template_ids;
    let requested = ids.len();
    let deleted = db::run(&state.db_path, move |conn| db::delete_many(conn, &ids)).await?;
    info!("Bulk delete removed {} of {} templates", deleted, requested);
    Ok(HttpResponse::Ok().json(BulkDeleteResponse { deleted }))
}
