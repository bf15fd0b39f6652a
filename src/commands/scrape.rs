//! Scrape command: cache check, harvest, normalize, artifact, render.

use crate::analysis::{self, top_n};
use crate::cache::ResultCache;
use crate::config::{Config, OutputFormat};
use crate::format::{write_csv_artifact, Formatter};
use crate::ownership::browser::PageDriver;
use crate::ownership::models::{OwnershipRecord, PlayerRow};
use crate::ownership::{Harvester, Sport};
use crate::progress::LogSink;
use anyhow::{Context, Result};
use tracing::info;

/// Executes an ownership scrape end to end.
pub struct ScrapeCommand {
    config: Config,
}

impl ScrapeCommand {
    /// Creates a new scrape command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the scrape with a real browser and returns formatted output.
    pub fn execute(
        &self,
        sport: Sport,
        cache: &ResultCache,
        write_artifact: bool,
    ) -> Result<String> {
        if let Some(records) = cache.get(sport) {
            info!("Using cached {} ownership data ({} players)", sport, records.len());
            return self.render(&records);
        }

        let harvester = Harvester::new(&self.config, sport);
        let mut sink = LogSink;
        let rows = harvester.harvest(&mut sink).context("Harvest failed")?;

        self.finish(sport, cache, rows, write_artifact)
    }

    /// Runs the scrape through a provided driver (for testing). Cache-hit
    /// requests never touch the driver.
    pub fn execute_with_driver(
        &self,
        sport: Sport,
        driver: &mut impl PageDriver,
        cache: &ResultCache,
        write_artifact: bool,
    ) -> Result<String> {
        if let Some(records) = cache.get(sport) {
            info!("Using cached {} ownership data ({} players)", sport, records.len());
            return self.render(&records);
        }

        let harvester = Harvester::new(&self.config, sport);
        let mut sink = LogSink;
        let rows = harvester.harvest_with_driver(driver, &mut sink).context("Harvest failed")?;

        self.finish(sport, cache, rows, write_artifact)
    }

    fn finish(
        &self,
        sport: Sport,
        cache: &ResultCache,
        rows: Vec<PlayerRow>,
        write_artifact: bool,
    ) -> Result<String> {
        info!("Harvested {} players for {}", rows.len(), sport.display_name());

        let records = analysis::normalize(&rows).context("Normalization failed")?;

        if write_artifact {
            let path = write_csv_artifact(&self.config.artifact_dir, sport, &rows)?;
            info!("Artifact written: {}", path.display());
        }

        let records = cache.store(sport, records);
        self.render(&records)
    }

    fn render(&self, records: &[OwnershipRecord]) -> Result<String> {
        let formatter = Formatter::new(self.config.format);

        // Structured formats carry the full record set only; the summary
        // blocks are for humans reading a terminal.
        if self.config.format != OutputFormat::Table {
            return Ok(formatter.format_records(records));
        }

        let mut sections = vec![formatter.format_records(records)];

        if let Some(leaders) = analysis::highest_in_each_category(records) {
            sections.push(formatter.format_leaders(&leaders));
            sections.push(self.top_block(records)?);
        }

        Ok(sections.join("\n\n"))
    }

    fn top_block(&self, records: &[OwnershipRecord]) -> Result<String> {
        let top = top_n(records, self.config.top_n, self.config.metric)
            .context("Invalid top-n request")?;

        let mut lines = vec![format!(
            "Top {} by {}",
            top.len(),
            self.config.metric.label()
        )];
        for (rank, record) in top.iter().enumerate() {
            lines.push(format!(
                "  {:>2}. {} ({}) {:.2}%",
                rank + 1,
                record.player(),
                record.team(),
                self.config.metric.value(record),
            ));
        }

        Ok(lines.join("\n"))
    }
}
