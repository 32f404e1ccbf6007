//! Breadcrumb trail
//!
//! Every transition returns a new [`NavigationState`]; a previous value is
//! never modified, so a holder of an older snapshot keeps a consistent view.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// One step of the drill-down path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbFrame {
    pub id: String,
    pub name: String,
}

impl BreadcrumbFrame {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Path from the selected root account to the current account.
///
/// Frame `i` is the manager context whose listing produced frame `i + 1`,
/// so every prefix is independently resolvable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    breadcrumbs: Vec<BreadcrumbFrame>,
}

impl NavigationState {
    /// No account chosen.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A single-frame trail, or the empty state when `id` is empty.
    #[must_use]
    pub fn select_root(id: &str, name: &str) -> Self {
        if id.is_empty() {
            return Self::empty();
        }
        Self {
            breadcrumbs: vec![BreadcrumbFrame::new(id, name)],
        }
    }

    /// Appends a frame for a drilled-into client account.
    #[must_use]
    pub fn drill_into(&self, id: &str, name: &str) -> Self {
        let mut breadcrumbs = Vec::with_capacity(self.breadcrumbs.len() + 1);
        breadcrumbs.extend(self.breadcrumbs.iter().cloned());
        breadcrumbs.push(BreadcrumbFrame::new(id, name));
        Self { breadcrumbs }
    }

    /// Keeps frames `0..=index`.
    ///
    /// An index outside the trail is a caller bug and is reported as
    /// [`CoreError::BreadcrumbOutOfRange`], never clamped.
    pub fn truncate_to(&self, index: usize) -> CoreResult<Self> {
        if index >= self.breadcrumbs.len() {
            return Err(CoreError::BreadcrumbOutOfRange {
                index,
                len: self.breadcrumbs.len(),
            });
        }
        Ok(Self {
            breadcrumbs: self.breadcrumbs[..=index].to_vec(),
        })
    }

    /// Id of the last frame, if any.
    pub fn current_account_id(&self) -> Option<&str> {
        self.current().map(|f| f.id.as_str())
    }

    pub fn current(&self) -> Option<&BreadcrumbFrame> {
        self.breadcrumbs.last()
    }

    pub fn root(&self) -> Option<&BreadcrumbFrame> {
        self.breadcrumbs.first()
    }

    pub fn breadcrumbs(&self) -> &[BreadcrumbFrame] {
        &self.breadcrumbs
    }

    pub fn depth(&self) -> usize {
        self.breadcrumbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breadcrumbs.is_empty()
    }
}
