//! Transient per-harvest state.
//!
//! One `HarvestSession` exists per scrape and dies with it; nothing here is
//! shared or persisted. The processed-key set grows monotonically and is the
//! sole dedup authority for the harvest.

use crate::ownership::models::PlayerRow;
use crate::ownership::parser::RowOutcome;
use std::collections::HashSet;

/// Bookkeeping for one harvest run: scroll offset, seen players, collected
/// rows in first-seen order, stall counter, and the progress watermark.
#[derive(Debug, Default)]
pub struct HarvestSession {
    scroll_position: i64,
    processed: HashSet<String>,
    rows: Vec<PlayerRow>,
    stall_count: u32,
    skipped: usize,
    last_progress: u8,
}

impl HarvestSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the scroll offset by `increment` pixels and returns the new
    /// offset. The offset never moves backwards within a session.
    pub fn advance_scroll(&mut self, increment: i64) -> i64 {
        self.scroll_position += increment.max(0);
        self.scroll_position
    }

    pub fn scroll_position(&self) -> i64 {
        self.scroll_position
    }

    /// Folds one snapshot's row outcomes into the session. Rows whose player
    /// key was already seen are dropped silently; skips are only counted.
    /// Returns how many players were new.
    pub fn absorb(&mut self, outcomes: &[RowOutcome]) -> usize {
        let mut new_players = 0;

        for outcome in outcomes {
            match outcome {
                RowOutcome::Row(row) => {
                    if self.processed.insert(row.key().to_string()) {
                        self.rows.push(row.clone());
                        new_players += 1;
                    }
                }
                RowOutcome::Skipped(_) => self.skipped += 1,
            }
        }

        new_players
    }

    /// Records the outcome of one scroll iteration: zero new players bumps
    /// the stall counter, anything else clears it.
    pub fn note_iteration(&mut self, new_players: usize) {
        if new_players == 0 {
            self.stall_count += 1;
        } else {
            self.stall_count = 0;
        }
    }

    pub fn stall_count(&self) -> u32 {
        self.stall_count
    }

    pub fn reset_stall(&mut self) {
        self.stall_count = 0;
    }

    pub fn player_count(&self) -> usize {
        self.rows.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped
    }

    /// Clamps a progress percentage against the watermark so emitted values
    /// never decrease, and advances the watermark.
    pub fn clamp_progress(&mut self, pct: u8) -> u8 {
        self.last_progress = self.last_progress.max(pct.min(100));
        self.last_progress
    }

    /// Consumes the session, yielding collected rows in first-seen order.
    pub fn into_rows(self) -> Vec<PlayerRow> {
        self.rows
    }
}
