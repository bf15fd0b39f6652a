//! Supported sports and their ownership page variants.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default site the ownership pages live on.
pub const DEFAULT_BASE_URL: &str = "https://fantasyteamadvice.com";

/// Sports with a DFS ownership table on the target site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    #[default]
    Mlb,
    Nba,
}

impl Sport {
    /// Returns the URL slug for this sport.
    pub fn slug(&self) -> &'static str {
        match self {
            Sport::Mlb => "mlb",
            Sport::Nba => "nba",
        }
    }

    /// Returns the full ownership page URL for this sport.
    pub fn page_url(&self, base_url: &str) -> String {
        format!("{}/dfs/{}/ownership", base_url.trim_end_matches('/'), self.slug())
    }

    /// Returns the `data-testid` value of this sport's table container.
    pub fn container_testid(&self) -> String {
        format!("ownershipTable{}", self.slug())
    }

    /// Returns the display name used in headings and status messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Sport::Mlb => "MLB",
            Sport::Nba => "NBA",
        }
    }

    /// Returns all supported sports.
    pub fn all() -> &'static [Sport] {
        &[Sport::Mlb, Sport::Nba]
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for Sport {
    type Err = SportParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mlb" | "baseball" => Ok(Sport::Mlb),
            "nba" | "basketball" => Ok(Sport::Nba),
            _ => Err(SportParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SportParseError(String);

impl fmt::Display for SportParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown sport '{}'. Valid sports: mlb, nba", self.0)
    }
}

impl std::error::Error for SportParseError {}
