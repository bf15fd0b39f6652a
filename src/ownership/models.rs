//! Data models for harvested ownership rows.

use serde::{Deserialize, Serialize};

/// One raw row as read from the rendered table. All fields are the cell
/// text exactly as the site displays it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRow {
    /// Trimmed player name; the row's identity within a harvest.
    pub player: String,
    /// Team abbreviation (from the logo alt text).
    pub team: String,
    /// DraftKings salary as displayed (e.g. "$5,200").
    pub dk_price: String,
    /// DraftKings projected ownership as displayed (e.g. "23.4%").
    pub dk_ownership: String,
    /// FanDuel salary as displayed.
    pub fd_price: String,
    /// FanDuel projected ownership as displayed.
    pub fd_ownership: String,
}

impl PlayerRow {
    /// Returns the dedup key for this row.
    pub fn key(&self) -> &str {
        &self.player
    }
}

/// A normalized row: the raw fields plus typed ownership percentages and
/// the derived comparison metrics. Derived values are always recomputed
/// from the two percentages, never stored independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnershipRecord {
    #[serde(flatten)]
    pub row: PlayerRow,
    /// DraftKings ownership in percent (0–100).
    pub dk_ownership_pct: f64,
    /// FanDuel ownership in percent (0–100).
    pub fd_ownership_pct: f64,
    /// Sum of the two platform percentages.
    pub combined_ownership: f64,
    /// The lower of the two platform percentages.
    pub min_ownership: f64,
}

impl OwnershipRecord {
    /// Builds a record from a raw row and its parsed percentages,
    /// deriving the comparison metrics.
    pub fn derive(row: PlayerRow, dk_pct: f64, fd_pct: f64) -> Self {
        Self {
            row,
            dk_ownership_pct: dk_pct,
            fd_ownership_pct: fd_pct,
            combined_ownership: dk_pct + fd_pct,
            min_ownership: dk_pct.min(fd_pct),
        }
    }

    pub fn player(&self) -> &str {
        &self.row.player
    }

    pub fn team(&self) -> &str {
        &self.row.team
    }
}
