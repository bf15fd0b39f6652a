//! Ownership-table harvesting: browser driving, DOM contract, snapshot
//! parsing, and the incremental-scroll loop.

pub mod browser;
pub mod harvester;
pub mod models;
pub mod parser;
pub mod selectors;
pub mod session;
pub mod sports;

pub use browser::{ChromeDriver, PageDriver};
pub use harvester::Harvester;
pub use models::{OwnershipRecord, PlayerRow};
pub use parser::{Parser, RowOutcome, SkipReason};
pub use sports::Sport;

use thiserror::Error;

/// Fatal harvest-level failures. Per-row extraction problems are not errors;
/// they surface as [`SkipReason`] values and the harvest continues.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The page never exposed the expected table container; either the
    /// layout changed or the page did not load.
    #[error("ownership table for {sport} did not appear within {timeout_secs}s")]
    ContainerNotFound { sport: Sport, timeout_secs: u64 },

    /// The scroll allowance ran out before the list was exhausted. No partial
    /// result is surfaced.
    #[error("scroll limit of {max_scrolls} reached before the list was exhausted ({collected} players seen)")]
    IterationLimitExceeded { max_scrolls: u32, collected: usize },

    /// Browser plumbing failed: launch, navigation, script evaluation, or
    /// snapshot capture.
    #[error("browser session failed: {0}")]
    Browser(anyhow::Error),
}

impl From<anyhow::Error> for ScrapeError {
    fn from(err: anyhow::Error) -> Self {
        ScrapeError::Browser(err)
    }
}
