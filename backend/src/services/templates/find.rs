//! `GET /api/templates/find?search=&category=&status=&order=&page=&size=`
//!
//! Every parameter is optional. `search` matches a case-insensitive substring
//! of the name, `order` (`asc`/`desc`, default `desc`) sorts by creation time,
//! `page` is 1-based.

use actix_web::{web, HttpResponse};
use template_common::model::saved::TemplateFilter;

use crate::db;
use crate::error::ServiceError;
use crate::state::AppState;

/// # Arguments
/// * `state` - Application state holding the database path.
/// * `query` - Filters, sort order and page, parsed from the query string.
///
/// # Returns
/// - `200 OK` with a `Page<SavedTemplate>`. A page past the end is empty.
/// - `400 Bad Request` if a parameter cannot be parsed (e.g. an unknown
///   `status`).
pub async fn process(
    state: web::Data<AppState>,
    query: web::Query<TemplateFilter>,
) -> Result<HttpResponse, ServiceError> {
    let filter = query.into_inner();
    let page = db::run(&state.db_path, move |conn| db::find(conn, &filter)).await?;
    Ok(HttpResponse::Ok().json(page))
}
