//! dfs-crawler - DFS ownership table crawler CLI
//!
//! Harvests the virtualized DraftKings/FanDuel ownership table behind
//! infinite scroll, normalizes it into typed records, and renders the
//! comparison metrics the lineup-building workflow cares about.

pub mod analysis;
pub mod cache;
pub mod commands;
pub mod config;
pub mod format;
pub mod ownership;
pub mod progress;

pub use config::Config;
pub use ownership::models::{OwnershipRecord, PlayerRow};
pub use ownership::{ScrapeError, Sport};
