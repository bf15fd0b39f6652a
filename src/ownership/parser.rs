//! HTML extraction over rendered snapshots of the ownership table.
//!
//! The harvester hands this module the page content after each scroll;
//! parsing is pure and never talks to the browser.

use crate::ownership::models::PlayerRow;
use crate::ownership::selectors;
use crate::ownership::sports::Sport;
use scraper::{ElementRef, Html, Selector};
use std::fmt;
use tracing::trace;

/// Result of reading one rendered row. Rows missing any required field
/// are skipped with a reason instead of aborting the harvest.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Row(PlayerRow),
    Skipped(SkipReason),
}

/// Why a rendered row could not be fully read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The player name cell is absent or empty.
    MissingPlayer,
    /// A required data cell is absent.
    MissingField(&'static str),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingPlayer => write!(f, "missing player name"),
            SkipReason::MissingField(field) => write!(f, "missing {} cell", field),
        }
    }
}

/// Parser for rendered ownership table snapshots.
pub struct Parser {
    container: Selector,
}

impl Parser {
    /// Creates a parser for the given sport's table.
    pub fn new(sport: Sport) -> Self {
        Self { container: selectors::container(sport) }
    }

    /// Returns true if the sport's table container exists in the snapshot.
    pub fn container_present(&self, html: &str) -> bool {
        let document = Html::parse_document(html);
        document.select(&self.container).next().is_some()
    }

    /// Returns how many rows are currently rendered, complete or not.
    /// The stall-recovery logic compares this count across scrolls.
    pub fn row_count(&self, html: &str) -> usize {
        let document = Html::parse_document(html);
        document.select(&selectors::ROW).count()
    }

    /// Reads every currently rendered row into a tagged outcome.
    pub fn parse_rows(&self, html: &str) -> Vec<RowOutcome> {
        let document = Html::parse_document(html);

        document
            .select(&selectors::ROW)
            .map(|row| match Self::parse_row(row) {
                Ok(player_row) => {
                    trace!("Parsed row: {} ({})", player_row.player, player_row.team);
                    RowOutcome::Row(player_row)
                }
                Err(reason) => RowOutcome::Skipped(reason),
            })
            .collect()
    }

    /// Reads one row element; any missing cell yields a skip reason.
    fn parse_row(row: ElementRef) -> Result<PlayerRow, SkipReason> {
        let player = cell_text(row, &selectors::PLAYER).ok_or(SkipReason::MissingPlayer)?;
        if player.is_empty() {
            return Err(SkipReason::MissingPlayer);
        }

        // Team name rides on the logo image's alt text ("NYY logo").
        let team = row
            .select(&selectors::TEAM)
            .next()
            .and_then(|img| img.value().attr("alt"))
            .map(|alt| alt.trim_end_matches(selectors::TEAM_ALT_SUFFIX).trim().to_string())
            .ok_or(SkipReason::MissingField("team"))?;

        let dk_price =
            cell_text(row, &selectors::DK_PRICE).ok_or(SkipReason::MissingField("DK price"))?;
        let dk_ownership = cell_text(row, &selectors::DK_OWNERSHIP)
            .ok_or(SkipReason::MissingField("DK ownership"))?;
        let fd_price =
            cell_text(row, &selectors::FD_PRICE).ok_or(SkipReason::MissingField("FD price"))?;
        let fd_ownership = cell_text(row, &selectors::FD_OWNERSHIP)
            .ok_or(SkipReason::MissingField("FD ownership"))?;

        Ok(PlayerRow { player, team, dk_price, dk_ownership, fd_price, fd_ownership })
    }
}

fn cell_text(row: ElementRef, selector: &Selector) -> Option<String> {
    row.select(selector).next().map(|cell| cell.text().collect::<String>().trim().to_string())
}
