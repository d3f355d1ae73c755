use serde::{Deserialize, Serialize};

use crate::model::template::Category;
use crate::wire::Component;

/// Review status of a submitted template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateStatus {
    Approved,
    Pending,
    Rejected,
    Flagged,
    Disabled,
    Paused,
    InAppeal,
    Reinstated,
    PendingDeletion,
}

impl TemplateStatus {
    pub const ALL: [TemplateStatus; 9] = [
        TemplateStatus::Approved,
        TemplateStatus::Pending,
        TemplateStatus::Rejected,
        TemplateStatus::Flagged,
        TemplateStatus::Disabled,
        TemplateStatus::Paused,
        TemplateStatus::InAppeal,
        TemplateStatus::Reinstated,
        TemplateStatus::PendingDeletion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateStatus::Approved => "APPROVED",
            TemplateStatus::Pending => "PENDING",
            TemplateStatus::Rejected => "REJECTED",
            TemplateStatus::Flagged => "FLAGGED",
            TemplateStatus::Disabled => "DISABLED",
            TemplateStatus::Paused => "PAUSED",
            TemplateStatus::InAppeal => "IN_APPEAL",
            TemplateStatus::Reinstated => "REINSTATED",
            TemplateStatus::PendingDeletion => "PENDING_DELETION",
        }
    }

    pub fn parse(value: &str) -> Option<TemplateStatus> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

/// A template as stored by the service and returned by its listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedTemplate {
    pub id: String, // UUID
    pub name: String,
    pub category: Category,
    pub language: String,
    pub status: TemplateStatus,
    pub components: Vec<Component>,
    /// MD5 hex digest of the serialised request the template was stored from.
    pub content_md5: String,
    /// Unix seconds.
    pub created_at: i64,
    pub updated_at: i64,
}

/// Per-status template counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TemplateStats {
    pub total: usize,
    pub approved: usize,
    pub pending: usize,
    pub rejected: usize,
    pub flagged: usize,
    pub disabled: usize,
    pub paused: usize,
    pub in_appeal: usize,
    pub reinstated: usize,
    pub pending_deletion: usize,
}

impl TemplateStats {
    pub fn record(&mut self, status: TemplateStatus) {
        self.add(status, 1);
    }

    /// Adds `count` templates in `status`.
    pub fn add(&mut self, status: TemplateStatus, count: usize) {
        self.total += count;
        let counter = match status {
            TemplateStatus::Approved => &mut self.approved,
            TemplateStatus::Pending => &mut self.pending,
            TemplateStatus::Rejected => &mut self.rejected,
            TemplateStatus::Flagged => &mut self.flagged,
            TemplateStatus::Disabled => &mut self.disabled,
            TemplateStatus::Paused => &mut self.paused,
            TemplateStatus::InAppeal => &mut self.in_appeal,
            TemplateStatus::Reinstated => &mut self.reinstated,
            TemplateStatus::PendingDeletion => &mut self.pending_deletion,
        };
        *counter += count;
    }
}

impl FromIterator<TemplateStatus> for TemplateStats {
    fn from_iter<I: IntoIterator<Item = TemplateStatus>>(iter: I) -> Self {
        let mut stats = TemplateStats::default();
        for status in iter {
            stats.record(status);
        }
        stats
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;
const MAX_OFFSET: usize = i64::MAX as usize;

/// Listing query: filters, sort order and page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TemplateFilter {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub status: Option<TemplateStatus>,
    #[serde(default)]
    pub order: SortOrder,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub size: Option<usize>,
}

impl TemplateFilter {
    /// 1-based page, at least 1.
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    /// Page size within `1..=MAX_PAGE_SIZE`.
    pub fn size(&self) -> usize {
        self.size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    /// Rows to skip. Saturates, and never exceeds what SQLite accepts as an
    /// `OFFSET`, so an absurd page yields an empty page rather than a panic.
    pub fn offset(&self) -> usize {
        (self.page() - 1)
            .saturating_mul(self.size())
            .min(MAX_OFFSET)
    }

    /// Trimmed search text, `None` when blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub size: usize,
}
