//! Render model produced by the view projection

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything the navigator screen needs, derived from navigation and listing state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderModel {
    pub breadcrumbs: Vec<BreadcrumbItem>,
    /// Rows of the current page only.
    pub rows: Vec<ViewRow>,
    pub pager: PagerState,
    pub search: SearchBox,
    pub signals: ViewSignals,
    /// Row count before filtering.
    pub total_rows: usize,
    /// Row count after filtering.
    pub filtered_rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreadcrumbItem {
    pub index: usize,
    pub id: String,
    pub name: String,
    /// Every frame but the last.
    pub clickable: bool,
    pub current: bool,
}

/// A listing row tagged by what clicking it does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewRow {
    /// Client account: opens its own listing.
    Drillable {
        id: String,
        name: String,
        status: String,
    },
    /// Campaign: display only.
    Terminal {
        id: String,
        name: String,
        status: String,
        clicks: u64,
        impressions: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagerState {
    pub page: usize,
    pub total_pages: usize,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    /// `"Page {page} of {total_pages}"`
    pub label: String,
    /// Hidden when everything fits on one page.
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchBox {
    pub visible: bool,
    pub term: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewSignals {
    pub no_selection: bool,
    pub loading: bool,
    /// Loaded but nothing to show (no rows at all, or none matching the term).
    pub no_results: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
