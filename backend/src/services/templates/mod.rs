//! # Template Service Module
//!
//! HTTP endpoints for stored templates, all under `/api/templates`. Every
//! handler lives in its own sub-module and exposes a `process` function (plus a
//! second entry point where one file serves two related routes):
//!
//! - `create`: validates a draft and stores it as a new `PENDING` template.
//! - `edit`: replaces a stored template with an edited draft.
//! - `get`: returns a stored template, raw or rebuilt as an editable draft.
//! - `find`: filtered, sorted and paginated listing.
//! - `stats`: counts per review status.
//! - `delete`: single and bulk removal.
//! - `duplicate`: copies a template under a new name.
//! - `status`: records a review outcome.
//! - `library`: converts a template library entry into a draft.

mod create;
mod delete;
mod duplicate;
mod edit;
mod find;
mod get;
mod library;
mod stats;
mod status;

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

/// The base path for all template-related API endpoints.
const API_PATH: &str = "/api/templates";

/// Configures and returns the Actix `Scope` for all template routes.
///
/// | method   | path                        | handler              |
/// |----------|-----------------------------|----------------------|
/// | `POST`   | `/create`                   | `create::process`    |
/// | `PUT`    | `/edit/{template_id}`       | `edit::process`      |
/// | `GET`    | `/get/{template_id}`        | `get::process`       |
/// | `GET`    | `/get/{template_id}/draft`  | `get::draft`         |
/// | `GET`    | `/find`                     | `find::process`      |
/// | `GET`    | `/stats`                    | `stats::process`     |
/// | `POST`   | `/bulk-delete`              | `delete::bulk`       |
/// | `POST`   | `/library/draft`            | `library::process`   |
/// | `DELETE` | `/{template_id}`            | `delete::process`    |
/// | `POST`   | `/{template_id}/duplicate`  | `duplicate::process` |
/// | `PUT`    | `/{template_id}/status`     | `status::process`    |
///
/// Fixed paths are registered before the `{template_id}` patterns.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/create", post().to(create::process))
        .route("/edit/{template_id}", put().to(edit::process))
        .route("/get/{template_id}", get().to(get::process))
        .route("/get/{template_id}/draft", get().to(get::draft))
        .route("/find", get().to(find::process))
        .route("/stats", get().to(stats::process))
        .route("/bulk-delete", post().to(delete::bulk))
        .route("/library/draft", post().to(library::process))
        .route("/{template_id}", delete().to(delete::process))
        .route("/{template_id}/duplicate", post().to(duplicate::process))
        .route("/{template_id}/status", put().to(status::process))
}
