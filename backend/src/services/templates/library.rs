//! `POST /api/templates/library/draft`: turns a template library entry into a
//! draft for the create form. The draft is returned together with the issues
//! found in the entry; issues do not block the conversion.

use actix_web::{web, HttpResponse};
use log::debug;
use std::time::{SystemTime, UNIX_EPOCH};
use template_common::requests::LibraryDraftResponse;
use template_common::transform::{draft_from_library, validate_library_template, LibraryTemplate};

pub async fn process(payload: web::Json<LibraryTemplate>) -> HttpResponse {
    let template = payload.into_inner();
    let issues = validate_library_template(&template);
    if !issues.is_empty() {
        debug!("Library template {} has {} issue(s)", template.name, issues.len());
    }
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let draft = draft_from_library(&template, millis);
    HttpResponse::Ok().json(LibraryDraftResponse { draft, issues })
}
