use actix_web::{web, HttpResponse};

use crate::db;
use crate::error::ServiceError;
use crate::state::AppState;

/// `GET /api/templates/stats`: template counts per review status.
pub async fn process(state: web::Data<AppState>) -> Result<HttpResponse, ServiceError> {
    let stats = db::run(&state.db_path, |conn| db::stats(conn)).await?;
    Ok(HttpResponse::Ok().json(stats))
}
