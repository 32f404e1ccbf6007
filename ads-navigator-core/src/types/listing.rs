//! Listing state: the rows of the selected account, narrowed by a search
//! term and paged.
//!
//! `filtered` stores positions into `all`, so it is a subset of `all` by
//! construction and always derived from `all` rather than from a previous
//! filter result.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::campaign::CampaignRow;

/// Rows per page.
pub const PAGE_SIZE: usize = 10;

/// Where a listing is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ListingStatus {
    /// No account selected; search and pager are hidden.
    NoSelection,
    /// A fetch for `account_id` is outstanding.
    Loading { account_id: String },
    Ready,
    /// The fetch failed; `message` is shown inline.
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingState {
    account_id: Option<String>,
    all: Arc<Vec<CampaignRow>>,
    filtered: Vec<usize>,
    term: String,
    page: usize,
    status: ListingStatus,
    loaded_at: Option<DateTime<Utc>>,
}

impl ListingState {
    /// Nothing selected.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            account_id: None,
            all: Arc::new(Vec::new()),
            filtered: Vec::new(),
            term: String::new(),
            page: 1,
            status: ListingStatus::NoSelection,
            loaded_at: None,
        }
    }

    /// Placeholder while `account_id` is being fetched.
    #[must_use]
    pub fn loading(account_id: &str) -> Self {
        Self {
            account_id: Some(account_id.to_string()),
            status: ListingStatus::Loading {
                account_id: account_id.to_string(),
            },
            ..Self::empty()
        }
    }

    /// Freshly loaded rows: unfiltered, on page 1.
    #[must_use]
    pub fn ready(account_id: &str, rows: Vec<CampaignRow>) -> Self {
        let filtered = (0..rows.len()).collect();
        Self {
            account_id: Some(account_id.to_string()),
            all: Arc::new(rows),
            filtered,
            term: String::new(),
            page: 1,
            status: ListingStatus::Ready,
            loaded_at: Some(Utc::now()),
        }
    }

    /// A terminal load failure for `account_id`.
    #[must_use]
    pub fn failed(account_id: &str, message: impl Into<String>) -> Self {
        Self {
            account_id: Some(account_id.to_string()),
            status: ListingStatus::Failed {
                message: message.into(),
            },
            loaded_at: Some(Utc::now()),
            ..Self::empty()
        }
    }

    /// Narrows `all` to rows whose name contains `term` (case-insensitive) and
    /// goes back to page 1. An empty term restores every row.
    #[must_use]
    pub fn apply_filter(&self, term: &str) -> Self {
        let needle = term.to_lowercase();
        let filtered = self
            .all
            .iter()
            .enumerate()
            .filter(|(_, row)| row.name_matches(&needle))
            .map(|(i, _)| i)
            .collect();
        Self {
            filtered,
            term: term.to_string(),
            page: 1,
            ..self.clone()
        }
    }

    /// Moves to `page`, clamped into `1..=total_pages()`.
    #[must_use]
    pub fn set_page(&self, page: usize) -> Self {
        Self {
            page: page.clamp(1, self.total_pages()),
            ..self.clone()
        }
    }

    /// `max(1, ceil(filtered / PAGE_SIZE))`
    pub fn total_pages(&self) -> usize {
        self.filtered.len().div_ceil(PAGE_SIZE).max(1)
    }

    /// Rows of the current page, in listing order.
    pub fn current_page_items(&self) -> Vec<&CampaignRow> {
        let start = ((self.page - 1) * PAGE_SIZE).min(self.filtered.len());
        let end = (start + PAGE_SIZE).min(self.filtered.len());
        self.filtered[start..end]
            .iter()
            .map(|&i| &self.all[i])
            .collect()
    }

    pub fn filtered(&self) -> impl Iterator<Item = &CampaignRow> {
        self.filtered.iter().map(|&i| &self.all[i])
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn all(&self) -> &[CampaignRow] {
        &self.all
    }

    /// Row `id`, if it matches the current term.
    pub fn find(&self, id: &str) -> Option<&CampaignRow> {
        self.filtered().find(|row| row.id() == id)
    }

    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn status(&self) -> &ListingStatus {
        &self.status
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }
}

impl Default for ListingState {
    fn default() -> Self {
        Self::empty()
    }
}
