//! Rows of an account listing
//!
//! A listing holds either the campaigns of a leaf account or the client
//! accounts of a manager. On the wire both share one flat shape
//! (`id`, `name`, `status`, `clicks`, `impressions`) plus a `kind` tag;
//! client accounts carry `"Client Account"` as status and `"-"` metrics.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Status text of a client-account row.
pub const CLIENT_ACCOUNT_STATUS: &str = "Client Account";

/// Metric cell shown for rows without metrics.
pub const MISSING_METRIC: &str = "-";

/// One row of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "WireRow", try_from = "WireRow")]
pub enum CampaignRow {
    /// Terminal, display-only.
    Campaign(Campaign),
    /// Drillable: opening it lists that account's own rows.
    ClientAccount(ClientAccountRow),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub status: String,
    pub clicks: u64,
    pub impressions: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientAccountRow {
    pub id: String,
    pub name: String,
}

/// Discriminator of [`CampaignRow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Campaign,
    ClientAccount,
}

impl CampaignRow {
    pub fn id(&self) -> &str {
        match self {
            Self::Campaign(c) => &c.id,
            Self::ClientAccount(a) => &a.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Campaign(c) => &c.name,
            Self::ClientAccount(a) => &a.name,
        }
    }

    pub fn status(&self) -> &str {
        match self {
            Self::Campaign(c) => &c.status,
            Self::ClientAccount(_) => CLIENT_ACCOUNT_STATUS,
        }
    }

    pub fn kind(&self) -> RowKind {
        match self {
            Self::Campaign(_) => RowKind::Campaign,
            Self::ClientAccount(_) => RowKind::ClientAccount,
        }
    }

    pub fn is_drillable(&self) -> bool {
        matches!(self, Self::ClientAccount(_))
    }

    /// Case-insensitive substring match on the name.
    pub fn name_matches(&self, needle_lowercase: &str) -> bool {
        needle_lowercase.is_empty() || self.name().to_lowercase().contains(needle_lowercase)
    }
}

/// Flat wire form of [`CampaignRow`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireRow {
    /// Absent in rows produced by older clients; `status` decides then.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kind: Option<RowKind>,
    id: String,
    name: String,
    status: String,
    #[serde(default, with = "metric_cell")]
    clicks: Option<u64>,
    #[serde(default, with = "metric_cell")]
    impressions: Option<u64>,
}

impl From<CampaignRow> for WireRow {
    fn from(row: CampaignRow) -> Self {
        let kind = Some(row.kind());
        match row {
            CampaignRow::Campaign(c) => Self {
                kind,
                id: c.id,
                name: c.name,
                status: c.status,
                clicks: Some(c.clicks),
                impressions: Some(c.impressions),
            },
            CampaignRow::ClientAccount(a) => Self {
                kind,
                id: a.id,
                name: a.name,
                status: CLIENT_ACCOUNT_STATUS.to_string(),
                clicks: None,
                impressions: None,
            },
        }
    }
}

impl TryFrom<WireRow> for CampaignRow {
    type Error = String;

    fn try_from(wire: WireRow) -> Result<Self, Self::Error> {
        let kind = wire.kind.unwrap_or(if wire.status == CLIENT_ACCOUNT_STATUS {
            RowKind::ClientAccount
        } else {
            RowKind::Campaign
        });
        if wire.id.is_empty() {
            return Err("row id must not be empty".to_string());
        }
        Ok(match kind {
            RowKind::ClientAccount => Self::ClientAccount(ClientAccountRow {
                id: wire.id,
                name: wire.name,
            }),
            RowKind::Campaign => Self::Campaign(Campaign {
                id: wire.id,
                name: wire.name,
                status: wire.status,
                clicks: wire.clicks.unwrap_or(0),
                impressions: wire.impressions.unwrap_or(0),
            }),
        })
    }
}

/// `Option<u64>` as a JSON number, or `"-"` when absent.
mod metric_cell {
    use super::{Deserialize, Deserializer, Serializer, MISSING_METRIC};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Cell {
        Count(u64),
        Text(String),
    }

    #[allow(clippy::ref_option)]
    pub fn serialize<S>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(n) => serializer.serialize_u64(*n),
            None => serializer.serialize_str(MISSING_METRIC),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Cell>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Cell::Count(n)) => Ok(Some(n)),
            Some(Cell::Text(s)) if s.trim() == MISSING_METRIC => Ok(None),
            Some(Cell::Text(s)) => s
                .trim()
                .parse::<u64>()
                .map(Some)
                .map_err(|e| serde::de::Error::custom(format!("invalid metric '{s}': {e}"))),
        }
    }
}
