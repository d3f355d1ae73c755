//! # Draft Service Module
//!
//! Stateless helpers for the template editor under `/api/drafts`. Nothing here
//! touches the database: each endpoint takes a draft and returns what the
//! editor shows next to it.
//!
//! - `POST /validate` answers `{ok, reason}`; an invalid draft is still a
//!   `200 OK`, the verdict is in the body.
//! - `POST /preview` renders the chat-bubble preview.
//! - `POST /request` returns the exact API request the draft would be
//!   submitted as, or `400` with the validation message.

use actix_web::web::{post, scope, Json};
use actix_web::{HttpResponse, Scope};
use template_common::preview::render_preview;
use template_common::validate::ValidationReport;
use template_common::{submit, validate, TemplateDraft};

use crate::error::ServiceError;

const API_PATH: &str = "/api/drafts";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/validate", post().to(validate_draft))
        .route("/preview", post().to(preview_draft))
        .route("/request", post().to(request_for_draft))
}

async fn validate_draft(draft: Json<TemplateDraft>) -> HttpResponse {
    HttpResponse::Ok().json(ValidationReport::from(validate(&draft)))
}

async fn preview_draft(draft: Json<TemplateDraft>) -> HttpResponse {
    HttpResponse::Ok().json(render_preview(&draft))
}

async fn request_for_draft(draft: Json<TemplateDraft>) -> Result<HttpResponse, ServiceError> {
    let request = submit(&draft)?;
    Ok(HttpResponse::Ok().json(request))
}
