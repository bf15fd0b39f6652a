//! Incremental-scroll harvesting of the virtualized ownership list.
//!
//! The list only materializes visible rows and appends more as its viewport
//! scrolls, with no completion signal. The loop scrolls in fixed increments,
//! waits a settle interval, snapshots the DOM, and dedupes rows by player
//! key until a stall-recovery sequence (catch-up scroll, then bottom jump)
//! confirms exhaustion.

use crate::config::{Config, HarvestConfig};
use crate::ownership::browser::{ChromeDriver, PageDriver};
use crate::ownership::models::PlayerRow;
use crate::ownership::parser::{Parser, RowOutcome};
use crate::ownership::session::HarvestSession;
use crate::ownership::{selectors, ScrapeError, Sport};
use crate::progress::ProgressSink;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Drives one full harvest of a sport's ownership table.
pub struct Harvester {
    sport: Sport,
    base_url: String,
    tuning: HarvestConfig,
}

impl Harvester {
    pub fn new(config: &Config, sport: Sport) -> Self {
        Self { sport, base_url: config.base_url.clone(), tuning: config.harvest.clone() }
    }

    /// Launches a browser, harvests until exhaustion, and returns the
    /// deduplicated rows in first-seen order. The browser is released on
    /// every exit path.
    pub fn harvest(&self, sink: &mut dyn ProgressSink) -> Result<Vec<PlayerRow>, ScrapeError> {
        let mut driver = ChromeDriver::launch()?;
        self.harvest_with_driver(&mut driver, sink)
    }

    /// Harvests through an existing driver (the testing seam).
    pub fn harvest_with_driver(
        &self,
        driver: &mut impl PageDriver,
        sink: &mut dyn ProgressSink,
    ) -> Result<Vec<PlayerRow>, ScrapeError> {
        let result = self.run(driver, sink);
        if let Err(err) = &result {
            sink.fail(&err.to_string());
        }
        result
    }

    fn run(
        &self,
        driver: &mut impl PageDriver,
        sink: &mut dyn ProgressSink,
    ) -> Result<Vec<PlayerRow>, ScrapeError> {
        let tuning = &self.tuning;
        let parser = Parser::new(self.sport);
        let css = selectors::container_css(self.sport);
        let url = self.sport.page_url(&self.base_url);
        let settle = Duration::from_millis(tuning.settle_ms);
        let recovery_settle = Duration::from_millis(tuning.catchup_settle_ms);

        let mut session = HarvestSession::new();

        sink.update(session.clamp_progress(10), "Opening the ownership page...");
        driver.open(&url)?;

        sink.update(session.clamp_progress(20), "Waiting for the ownership table...");
        if let Err(err) = driver
            .wait_for_container(&css, Duration::from_secs(tuning.container_timeout_secs))
        {
            debug!("Container wait failed: {err}");
            return Err(ScrapeError::ContainerNotFound {
                sport: self.sport,
                timeout_secs: tuning.container_timeout_secs,
            });
        }
        sink.update(session.clamp_progress(30), "Ownership table found, extracting...");

        let mut scrolls: u32 = 0;
        while scrolls < tuning.max_scrolls {
            let offset = session.advance_scroll(tuning.scroll_increment_px);
            driver.set_scroll(&css, offset)?;
            driver.settle(settle);

            let outcomes = parser.parse_rows(&driver.content()?);
            let rendered_count = outcomes.len();
            log_skips(&outcomes);
            let new_players = session.absorb(&outcomes);
            scrolls += 1;

            sink.update(
                session.clamp_progress(loop_progress(scrolls)),
                &format!("Scroll #{}: {} players found", scrolls, session.player_count()),
            );

            session.note_iteration(new_players);
            if session.stall_count() < tuning.stall_threshold {
                continue;
            }

            // Stalled: one large catch-up scroll. Growth in the rendered row
            // count means the list was just lagging behind the viewport.
            debug!(
                "No new players for {} scrolls, trying a catch-up scroll",
                session.stall_count()
            );
            let offset = session.advance_scroll(tuning.catchup_scroll_px);
            driver.set_scroll(&css, offset)?;
            driver.settle(recovery_settle);

            let outcomes = parser.parse_rows(&driver.content()?);
            let count_after = outcomes.len();
            log_skips(&outcomes);
            let catchup_new = session.absorb(&outcomes);

            // Count growth or fresh players both mean the list was lagging,
            // not exhausted; a recycled list can serve new rows at the same
            // rendered count.
            if count_after > rendered_count || catchup_new > 0 {
                session.reset_stall();
                continue;
            }

            // Last resort: jump to the very bottom and re-read.
            debug!("Catch-up scroll found nothing, jumping to the bottom");
            driver.scroll_to_bottom(&css)?;
            driver.settle(recovery_settle);

            let outcomes = parser.parse_rows(&driver.content()?);
            log_skips(&outcomes);
            let final_new = session.absorb(&outcomes);

            if final_new == 0 {
                // Exhaustion: nothing new even at the bottom of the list.
                info!(
                    "List exhausted after {} scrolls: {} players ({} skipped reads)",
                    scrolls,
                    session.player_count(),
                    session.skipped_count()
                );
                sink.update(
                    session.clamp_progress(100),
                    &format!("Done: {} players extracted", session.player_count()),
                );
                return Ok(session.into_rows());
            }
            session.reset_stall();
        }

        Err(ScrapeError::IterationLimitExceeded {
            max_scrolls: tuning.max_scrolls,
            collected: session.player_count(),
        })
    }
}

/// Progress estimate while scrolling, capped below 100 until exhaustion is
/// confirmed.
fn loop_progress(scrolls: u32) -> u8 {
    (30 + scrolls.saturating_mul(2)).min(90) as u8
}

fn log_skips(outcomes: &[RowOutcome]) {
    for outcome in outcomes {
        if let RowOutcome::Skipped(reason) = outcome {
            warn!("Skipping partially rendered row: {}", reason);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ownership::browser::testkit::MockPage;
    use crate::progress::testkit::RecordingSink;

    fn test_config() -> Config {
        let mut config = Config::default();
        config.harvest.settle_ms = 0;
        config.harvest.catchup_settle_ms = 0;
        config.harvest.stall_threshold = 2;
        config.harvest.max_scrolls = 40;
        config
    }

    fn harvester(config: &Config) -> Harvester {
        Harvester::new(config, Sport::Mlb)
    }

    #[test]
    fn test_harvest_collects_all_players_in_first_seen_order() {
        let config = test_config();
        let mut page = MockPage::with_players(12);
        let mut sink = RecordingSink::default();

        let rows = harvester(&config).harvest_with_driver(&mut page, &mut sink).unwrap();

        let players: Vec<_> = rows.iter().map(|r| r.player.as_str()).collect();
        let expected: Vec<String> = (1..=12).map(|i| format!("Player {i}")).collect();
        assert_eq!(players, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn test_harvest_output_has_no_duplicate_keys() {
        let config = test_config();
        // Every snapshot re-renders all rows up to the scroll offset, so the
        // same players are read many times over
        let mut page = MockPage::with_players(9);
        let mut sink = RecordingSink::default();

        let rows = harvester(&config).harvest_with_driver(&mut page, &mut sink).unwrap();

        let mut keys: Vec<_> = rows.iter().map(|r| r.key().to_string()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), rows.len());
    }

    #[test]
    fn test_stall_then_fruitless_recovery_terminates_successfully() {
        let config = test_config();
        // 3 players all render immediately; every later scroll is a stall
        let mut page = MockPage::with_players(3);
        let mut sink = RecordingSink::default();

        let rows = harvester(&config).harvest_with_driver(&mut page, &mut sink).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(sink.failures.is_empty());
    }

    #[test]
    fn test_catchup_scroll_recovers_a_lagging_list() {
        let config = test_config();
        let mut page = MockPage::with_players(10);
        // Rows past the third stay unrendered until the offset passes 1500px,
        // which only the 1000px catch-up scroll reaches quickly
        page.gate = Some((1500, 3));
        let mut sink = RecordingSink::default();

        let rows = harvester(&config).harvest_with_driver(&mut page, &mut sink).unwrap();
        assert_eq!(rows.len(), 10);
    }

    #[test]
    fn test_bottom_jump_rescues_tail_rows() {
        let config = test_config();
        let mut page = MockPage::with_players(5);
        page.bottom_extras = vec!["Tail One".to_string(), "Tail Two".to_string()];
        let mut sink = RecordingSink::default();

        let rows = harvester(&config).harvest_with_driver(&mut page, &mut sink).unwrap();

        assert_eq!(rows.len(), 7);
        assert!(rows.iter().any(|r| r.player == "Tail One"));
        assert!(rows.iter().any(|r| r.player == "Tail Two"));
    }

    #[test]
    fn test_iteration_limit_is_an_error_not_a_partial_result() {
        let mut config = test_config();
        config.harvest.max_scrolls = 6;
        // A list that always has one more player never exhausts
        let mut page = MockPage::with_players(4);
        page.endless = true;
        let mut sink = RecordingSink::default();

        let err = harvester(&config).harvest_with_driver(&mut page, &mut sink).unwrap_err();
        match err {
            ScrapeError::IterationLimitExceeded { max_scrolls, .. } => {
                assert_eq!(max_scrolls, 6);
            }
            other => panic!("expected IterationLimitExceeded, got {other:?}"),
        }
        assert_eq!(sink.failures.len(), 1);
    }

    #[test]
    fn test_missing_container_is_fatal() {
        let config = test_config();
        let mut page = MockPage::with_players(3);
        page.container_missing = true;
        let mut sink = RecordingSink::default();

        let err = harvester(&config).harvest_with_driver(&mut page, &mut sink).unwrap_err();
        match err {
            ScrapeError::ContainerNotFound { sport, timeout_secs } => {
                assert_eq!(sport, Sport::Mlb);
                assert_eq!(timeout_secs, config.harvest.container_timeout_secs);
            }
            other => panic!("expected ContainerNotFound, got {other:?}"),
        }
        assert_eq!(sink.failures.len(), 1);
    }

    #[test]
    fn test_incomplete_rows_are_skipped_not_fatal() {
        let config = test_config();
        let mut page = MockPage::with_players(4);
        page.broken_row = true;
        let mut sink = RecordingSink::default();

        let rows = harvester(&config).harvest_with_driver(&mut page, &mut sink).unwrap();
        // The broken row never makes it into the output
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| !r.player.is_empty()));
    }

    #[test]
    fn test_progress_is_monotonic_and_completes() {
        let config = test_config();
        let mut page = MockPage::with_players(8);
        let mut sink = RecordingSink::default();

        harvester(&config).harvest_with_driver(&mut page, &mut sink).unwrap();

        let percents: Vec<u8> = sink.updates.iter().map(|(p, _)| *p).collect();
        assert!(percents.windows(2).all(|w| w[0] <= w[1]), "non-monotonic: {percents:?}");
        assert_eq!(*percents.first().unwrap(), 10);
        assert_eq!(*percents.last().unwrap(), 100);
    }

    #[test]
    fn test_loop_progress_is_capped() {
        assert_eq!(loop_progress(1), 32);
        assert_eq!(loop_progress(30), 90);
        assert_eq!(loop_progress(100), 90);
    }
}
