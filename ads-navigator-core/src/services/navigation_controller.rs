//! Per-session navigation controller
//!
//! Holds the breadcrumb trail, the current listing and a generation counter.
//! Every navigation action bumps the generation and hands out a
//! [`FetchTicket`]; a fetched listing is applied only if its ticket still
//! carries the current generation, so a slow response for an account the user
//! already left never overwrites the newer one.

use std::sync::Arc;

use ads_navigator_provider::AdsCredential;
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::types::{ListingState, NavigationState, RenderModel};

use super::{project, CampaignCache};

/// Claim on the listing fetch started by one navigation action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    account_id: Option<String>,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Account whose rows should be fetched; `None` after a reset.
    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }

    pub fn needs_fetch(&self) -> bool {
        self.account_id.is_some()
    }
}

/// Outcome of handing a fetched listing back to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer navigation action superseded the ticket; the listing was dropped.
    Stale,
}

struct Inner {
    nav: Arc<NavigationState>,
    listing: Arc<ListingState>,
    generation: u64,
}

impl Inner {
    fn begin(&mut self, nav: NavigationState) -> FetchTicket {
        self.generation += 1;
        let account_id = nav.current_account_id().map(str::to_string);
        self.listing = Arc::new(
            account_id
                .as_deref()
                .map_or_else(ListingState::empty, ListingState::loading),
        );
        self.nav = Arc::new(nav);
        FetchTicket {
            generation: self.generation,
            account_id,
        }
    }
}

pub struct NavigationController {
    inner: RwLock<Inner>,
}

impl NavigationController {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                nav: Arc::new(NavigationState::empty()),
                listing: Arc::new(ListingState::empty()),
                generation: 0,
            }),
        }
    }

    /// Starts a new trail at a root account. An empty id clears everything.
    pub async fn select_root(&self, id: &str, name: &str) -> FetchTicket {
        let mut inner = self.inner.write().await;
        inner.begin(NavigationState::select_root(id, name))
    }

    /// Opens a client account listed in the current listing.
    ///
    /// `name` labels the new breadcrumb; the row's own name is used when it
    /// is empty.
    pub async fn drill_into(&self, id: &str, name: &str) -> CoreResult<FetchTicket> {
        let mut inner = self.inner.write().await;
        let row = inner
            .listing
            .find(id)
            .filter(|row| row.is_drillable())
            .ok_or_else(|| CoreError::NotDrillable(id.to_string()))?;
        let label = if name.is_empty() { row.name() } else { name }.to_string();
        let nav = inner.nav.drill_into(id, &label);
        Ok(inner.begin(nav))
    }

    /// Goes back to breadcrumb `index`, refetching that account's listing.
    pub async fn open_breadcrumb(&self, index: usize) -> CoreResult<FetchTicket> {
        let mut inner = self.inner.write().await;
        let nav = inner.nav.truncate_to(index)?;
        Ok(inner.begin(nav))
    }

    /// Stores `listing` if `ticket` is still current.
    pub async fn complete(&self, ticket: &FetchTicket, listing: ListingState) -> Completion {
        let mut inner = self.inner.write().await;
        if ticket.generation != inner.generation {
            log::warn!(
                "Discarding stale listing for {} (generation {}, current {})",
                ticket.account_id().unwrap_or("-"),
                ticket.generation,
                inner.generation
            );
            return Completion::Stale;
        }
        inner.listing = Arc::new(listing);
        Completion::Applied
    }

    /// Loads the listing `ticket` asks for and completes it.
    ///
    /// No lock is held while the fetch is in flight.
    pub async fn fetch(
        &self,
        cache: &CampaignCache,
        credential: &AdsCredential,
        ticket: &FetchTicket,
    ) -> Completion {
        let Some(account_id) = ticket.account_id() else {
            return Completion::Applied;
        };
        let listing = cache.load_for(credential, account_id).await;
        self.complete(ticket, listing).await
    }

    /// Filters the current listing. Does not start a fetch.
    pub async fn search(&self, term: &str) -> RenderModel {
        let mut inner = self.inner.write().await;
        let listing = inner.listing.apply_filter(term);
        inner.listing = Arc::new(listing);
        project(&inner.nav, &inner.listing)
    }

    /// Moves the current listing to `page`, clamped. Does not start a fetch.
    pub async fn set_page(&self, page: usize) -> RenderModel {
        let mut inner = self.inner.write().await;
        let listing = inner.listing.set_page(page);
        inner.listing = Arc::new(listing);
        project(&inner.nav, &inner.listing)
    }

    pub async fn render(&self) -> RenderModel {
        let inner = self.inner.read().await;
        project(&inner.nav, &inner.listing)
    }

    /// Current trail and listing.
    pub async fn snapshot(&self) -> (Arc<NavigationState>, Arc<ListingState>) {
        let inner = self.inner.read().await;
        (inner.nav.clone(), inner.listing.clone())
    }
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new()
    }
}
