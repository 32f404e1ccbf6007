//! View projection
//!
//! Pure function from navigation and listing state to the render model.

use crate::types::{
    BreadcrumbItem, CampaignRow, ListingState, ListingStatus, NavigationState, PagerState,
    RenderModel, SearchBox, ViewRow, ViewSignals,
};

/// Shown when a loaded account has no rows at all.
const NO_ROWS_MESSAGE: &str = "No Campaigns Created Yet.";
/// Shown when rows exist but none match the search term.
const NO_MATCH_MESSAGE: &str = "No campaigns found.";

/// Builds what the navigator screen shows for `nav` and `listing`.
#[must_use]
pub fn project(nav: &NavigationState, listing: &ListingState) -> RenderModel {
    let last = nav.depth().saturating_sub(1);
    let breadcrumbs = nav
        .breadcrumbs()
        .iter()
        .enumerate()
        .map(|(index, frame)| BreadcrumbItem {
            index,
            id: frame.id.clone(),
            name: frame.name.clone(),
            clickable: index < last,
            current: index == last,
        })
        .collect();

    let rows = listing
        .current_page_items()
        .into_iter()
        .map(view_row)
        .collect();

    let status = listing.status();
    let ready = matches!(status, ListingStatus::Ready);
    let page = listing.page();
    let total_pages = listing.total_pages();
    let pager = PagerState {
        page,
        total_pages,
        prev_enabled: page > 1,
        next_enabled: page < total_pages,
        label: format!("Page {page} of {total_pages}"),
        visible: ready && total_pages > 1,
    };

    // Revealed once an account has loaded rows to search through.
    let search = SearchBox {
        visible: ready && !listing.all().is_empty(),
        term: listing.term().to_string(),
    };

    let no_results = ready && listing.filtered_len() == 0;
    let signals = ViewSignals {
        no_selection: matches!(status, ListingStatus::NoSelection),
        loading: matches!(status, ListingStatus::Loading { .. }),
        no_results,
        empty_message: no_results.then(|| {
            if listing.all().is_empty() {
                NO_ROWS_MESSAGE.to_string()
            } else {
                NO_MATCH_MESSAGE.to_string()
            }
        }),
        error: match status {
            ListingStatus::Failed { message } => Some(message.clone()),
            _ => None,
        },
    };

    RenderModel {
        breadcrumbs,
        rows,
        pager,
        search,
        signals,
        total_rows: listing.all().len(),
        filtered_rows: listing.filtered_len(),
        loaded_at: listing.loaded_at(),
    }
}

fn view_row(row: &CampaignRow) -> ViewRow {
    match row {
        CampaignRow::ClientAccount(a) => ViewRow::Drillable {
            id: a.id.clone(),
            name: a.name.clone(),
            status: row.status().to_string(),
        },
        CampaignRow::Campaign(c) => ViewRow::Terminal {
            id: c.id.clone(),
            name: c.name.clone(),
            status: c.status.clone(),
            clicks: c.clicks,
            impressions: c.impressions,
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Campaign, ClientAccountRow};

    fn campaign(i: usize, name: &str) -> CampaignRow {
        CampaignRow::Campaign(Campaign {
            id: i.to_string(),
            name: name.to_string(),
            status: "ENABLED".into(),
            clicks: 1,
            impressions: 10,
        })
    }

    fn numbered(n: usize) -> Vec<CampaignRow> {
        (1..=n)
            .map(|i| campaign(i, &format!("Campaign {i:02}")))
            .collect()
    }

    fn names(model: &RenderModel) -> Vec<&str> {
        model
            .rows
            .iter()
            .map(|r| match r {
                ViewRow::Drillable { name, .. } | ViewRow::Terminal { name, .. } => name.as_str(),
            })
            .collect()
    }

    #[test]
    fn nothing_selected() {
        let model = project(&NavigationState::empty(), &ListingState::empty());
        assert!(model.breadcrumbs.is_empty());
        assert!(model.rows.is_empty());
        assert!(model.signals.no_selection);
        assert!(!model.signals.no_results);
        assert!(!model.search.visible);
        assert!(!model.pager.visible);
    }

    #[test]
    fn loading_hides_search_and_pager() {
        let nav = NavigationState::select_root("42", "Leaf");
        let model = project(&nav, &ListingState::loading("42"));
        assert!(model.signals.loading);
        assert!(!model.search.visible);
        assert!(!model.pager.visible);
        assert!(!model.signals.no_results);
    }

    #[test]
    fn paging_through_twenty_three_rows() {
        let nav = NavigationState::select_root("42", "Leaf");
        let listing = ListingState::ready("42", numbered(23));

        let first = project(&nav, &listing);
        assert_eq!(first.rows.len(), 10);
        assert!(first.search.visible);
        assert_eq!(first.pager.label, "Page 1 of 3");
        assert!(first.pager.visible);
        assert!(!first.pager.prev_enabled);
        assert!(first.pager.next_enabled);

        let last = project(&nav, &listing.set_page(3));
        assert_eq!(last.rows.len(), 3);
        assert_eq!(last.pager.label, "Page 3 of 3");
        assert!(last.pager.prev_enabled);
        assert!(!last.pager.next_enabled);
        assert_eq!(names(&last), ["Campaign 21", "Campaign 22", "Campaign 23"]);
    }

    #[test]
    fn search_narrows_and_resets_page() {
        let mut rows = numbered(19);
        for (i, name) in ["Brand Core", "Summer brand", "BRAND exact", "Rebranding"]
            .iter()
            .enumerate()
        {
            rows.push(campaign(100 + i, name));
        }
        let nav = NavigationState::select_root("42", "Leaf");
        let listing = ListingState::ready("42", rows).set_page(3).apply_filter("brand");

        let model = project(&nav, &listing);
        assert_eq!(model.total_rows, 23);
        assert_eq!(model.filtered_rows, 4);
        assert_eq!(model.pager.page, 1);
        assert_eq!(model.pager.total_pages, 1);
        assert!(!model.pager.visible);
        assert_eq!(model.search.term, "brand");
        assert_eq!(
            names(&model),
            ["Brand Core", "Summer brand", "BRAND exact", "Rebranding"]
        );
    }

    #[test]
    fn empty_account_and_unmatched_filter_differ() {
        let nav = NavigationState::select_root("42", "Leaf");

        let empty = project(&nav, &ListingState::ready("42", Vec::new()));
        assert!(empty.signals.no_results);
        assert_eq!(empty.signals.empty_message.as_deref(), Some(NO_ROWS_MESSAGE));
        assert!(!empty.search.visible);

        let unmatched = project(&nav, &ListingState::ready("42", numbered(5)).apply_filter("zzz"));
        assert!(unmatched.signals.no_results);
        assert_eq!(
            unmatched.signals.empty_message.as_deref(),
            Some(NO_MATCH_MESSAGE)
        );
        assert!(unmatched.search.visible);
    }

    #[test]
    fn breadcrumbs_all_clickable_but_last() {
        let nav = NavigationState::select_root("111", "Acme MCC").drill_into("222", "Shop EU");
        let model = project(&nav, &ListingState::loading("222"));
        assert_eq!(model.breadcrumbs.len(), 2);
        assert!(model.breadcrumbs[0].clickable);
        assert!(!model.breadcrumbs[0].current);
        assert!(!model.breadcrumbs[1].clickable);
        assert!(model.breadcrumbs[1].current);
        assert_eq!(model.breadcrumbs[1].index, 1);
    }

    #[test]
    fn client_accounts_are_drillable_rows() {
        let nav = NavigationState::select_root("111", "Acme MCC");
        let listing = ListingState::ready(
            "111",
            vec![CampaignRow::ClientAccount(ClientAccountRow {
                id: "222".into(),
                name: "Shop EU".into(),
            })],
        );
        let model = project(&nav, &listing);
        assert_eq!(
            model.rows,
            vec![ViewRow::Drillable {
                id: "222".into(),
                name: "Shop EU".into(),
                status: "Client Account".into(),
            }]
        );
    }

    #[test]
    fn failure_is_an_error_signal() {
        let nav = NavigationState::select_root("42", "Leaf");
        let model = project(
            &nav,
            &ListingState::failed("42", "Failed to fetch campaigns: denied"),
        );
        assert_eq!(
            model.signals.error.as_deref(),
            Some("Failed to fetch campaigns: denied")
        );
        assert!(!model.signals.no_results);
        assert!(model.rows.is_empty());
        assert!(!model.search.visible);
        assert!(!model.pager.visible);
    }
}
