pub mod drafts;
pub mod templates;
