//! Type definition module

mod account;
mod campaign;
mod listing;
mod navigation;
mod view;

pub use account::{
    placeholder_name, Account, ResolutionFailureKind, ResolutionWarning, RootAccountListing,
};
pub use campaign::{
    Campaign, CampaignRow, ClientAccountRow, RowKind, CLIENT_ACCOUNT_STATUS, MISSING_METRIC,
};
pub use listing::{ListingState, ListingStatus, PAGE_SIZE};
pub use navigation::{BreadcrumbFrame, NavigationState};
pub use view::{BreadcrumbItem, PagerState, RenderModel, SearchBox, ViewRow, ViewSignals};

// Re-export provider library public types
pub use ads_navigator_provider::{AdsCredential, CustomerResource};
