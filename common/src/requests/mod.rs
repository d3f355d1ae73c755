use serde::{Deserialize, Serialize};

use crate::model::saved::TemplateStatus;
use crate::model::template::TemplateDraft;
use crate::transform::LibraryIssue;

#[derive(Deserialize, Serialize)]
/// Request payload for the bulk delete endpoint.
pub struct BulkDeleteRequest {
    pub template_ids: Vec<String>,
}

#[derive(Deserialize, Serialize)]
/// Request payload for the duplicate endpoint: the name of the copy.
pub struct DuplicateRequest {
    pub name: String,
}

#[derive(Deserialize, Serialize)]
pub struct StatusRequest {
    pub status: TemplateStatus,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

#[derive(Debug, Deserialize, Serialize)]
/// `changed` is `false` when the edit produced the same components as before.
pub struct EditResponse {
    pub id: String,
    pub changed: bool,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct BulkDeleteResponse {
    pub deleted: usize,
}

#[derive(Debug, Deserialize, Serialize)]
/// A library template turned into a draft, with whatever looked off in it.
pub struct LibraryDraftResponse {
    pub draft: TemplateDraft,
    pub issues: Vec<LibraryIssue>,
}
