//! Output formatting for ownership records (table, JSON, markdown, CSV).

pub mod artifact;

pub use artifact::write_csv_artifact;

use crate::analysis::CategoryLeaders;
use crate::config::OutputFormat;
use crate::ownership::models::OwnershipRecord;

/// Formats records for terminal output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the full record set.
    pub fn format_records(&self, records: &[OwnershipRecord]) -> String {
        if records.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => csv_header(),
                _ => "No players found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_records(records),
            OutputFormat::Table => self.table_records(records),
            OutputFormat::Markdown => self.markdown_records(records),
            OutputFormat::Csv => self.csv_records(records),
        }
    }

    /// Formats the four category leaders as a summary block. Only meaningful
    /// for the human-readable formats; the structured ones carry the full
    /// record set instead.
    pub fn format_leaders(&self, leaders: &CategoryLeaders) -> String {
        let mut lines = Vec::new();

        lines.push("Highest ownership per category".to_string());
        lines.push(leader_line("DraftKings", &leaders.by_dk, leaders.by_dk.dk_ownership_pct));
        lines.push(leader_line("FanDuel", &leaders.by_fd, leaders.by_fd.fd_ownership_pct));
        lines.push(leader_line(
            "Combined",
            &leaders.by_combined,
            leaders.by_combined.combined_ownership,
        ));
        lines.push(leader_line("Both", &leaders.by_min, leaders.by_min.min_ownership));

        lines.join("\n")
    }

    // JSON formatting

    fn json_records(&self, records: &[OwnershipRecord]) -> String {
        serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_records(&self, records: &[OwnershipRecord]) -> String {
        let player_width = 24;
        let team_width = 5;
        let price_width = 9;
        let pct_width = 8;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<player_width$}  {:<team_width$}  {:<price_width$}  {:>pct_width$}  {:<price_width$}  {:>pct_width$}  {:>pct_width$}  {:>pct_width$}",
            "Player", "Team", "DK Price", "DK Own%", "FD Price", "FD Own%", "Comb%", "Min%"
        ));
        lines.push(format!(
            "{:-<player_width$}  {:-<team_width$}  {:-<price_width$}  {:-<pct_width$}  {:-<price_width$}  {:-<pct_width$}  {:-<pct_width$}  {:-<pct_width$}",
            "", "", "", "", "", "", "", ""
        ));

        for record in records {
            let player = truncate(record.player(), player_width);
            lines.push(format!(
                "{:<player_width$}  {:<team_width$}  {:<price_width$}  {:>pct_width$.2}  {:<price_width$}  {:>pct_width$.2}  {:>pct_width$.2}  {:>pct_width$.2}",
                player,
                record.team(),
                record.row.dk_price,
                record.dk_ownership_pct,
                record.row.fd_price,
                record.fd_ownership_pct,
                record.combined_ownership,
                record.min_ownership,
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} players", records.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_records(&self, records: &[OwnershipRecord]) -> String {
        let mut lines = Vec::new();

        lines.push(
            "| Player | Team | DK Price | DK Own% | FD Price | FD Own% | Comb% | Min% |"
                .to_string(),
        );
        lines.push("|--------|------|----------|---------|----------|---------|-------|------|".to_string());

        for record in records {
            lines.push(format!(
                "| {} | {} | {} | {:.2} | {} | {:.2} | {:.2} | {:.2} |",
                record.player(),
                record.team(),
                record.row.dk_price,
                record.dk_ownership_pct,
                record.row.fd_price,
                record.fd_ownership_pct,
                record.combined_ownership,
                record.min_ownership,
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} players*", records.len()));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_records(&self, records: &[OwnershipRecord]) -> String {
        let mut lines = Vec::new();
        lines.push(csv_header());

        for record in records {
            lines.push(format!(
                "{},{},{},{},{},{},{},{}",
                csv_escape(record.team()),
                csv_escape(record.player()),
                csv_escape(&record.row.dk_price),
                record.dk_ownership_pct,
                csv_escape(&record.row.fd_price),
                record.fd_ownership_pct,
                record.combined_ownership,
                record.min_ownership,
            ));
        }

        lines.join("\n")
    }
}

fn csv_header() -> String {
    "Team,Player,DK Price,DK Ownership,FD Price,FD Ownership,Combined Ownership,Min Ownership"
        .to_string()
}

fn leader_line(category: &str, record: &OwnershipRecord, value: f64) -> String {
    format!(
        "  {:<11} {} ({}) at {:.2}%  [DK {:.2}% / FD {:.2}%]",
        category,
        record.player(),
        record.team(),
        value,
        record.dk_ownership_pct,
        record.fd_ownership_pct,
    )
}

fn truncate(text: &str, width: usize) -> String {
    if text.len() > width {
        format!("{}...", &text[..width - 3])
    } else {
        text.to_string()
    }
}

pub(crate) fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
