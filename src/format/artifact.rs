//! CSV artifact written once per successful harvest.
//!
//! The artifact carries the raw cell text (not the derived metrics) so it
//! re-exports exactly what the site displayed.

use crate::format::csv_escape;
use crate::ownership::models::PlayerRow;
use crate::ownership::Sport;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing::info;

/// Artifact filename: `{sport}_ownership_{YYYYmmdd_HHMMSS}.csv`.
pub fn artifact_filename(sport: Sport, timestamp: &DateTime<Local>) -> String {
    format!("{}_ownership_{}.csv", sport, timestamp.format("%Y%m%d_%H%M%S"))
}

/// Renders the artifact body: one header plus one line per row, in harvest
/// order.
pub fn render_csv(rows: &[PlayerRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push("Team,Player,DK Price,DK Ownership,FD Price,FD Ownership".to_string());

    for row in rows {
        lines.push(format!(
            "{},{},{},{},{},{}",
            csv_escape(&row.team),
            csv_escape(&row.player),
            csv_escape(&row.dk_price),
            csv_escape(&row.dk_ownership),
            csv_escape(&row.fd_price),
            csv_escape(&row.fd_ownership),
        ));
    }

    let mut body = lines.join("\n");
    body.push('\n');
    body
}

/// Writes the timestamped CSV artifact into `dir`, creating the directory if
/// needed. Returns the written path.
pub fn write_csv_artifact(dir: &Path, sport: Sport, rows: &[PlayerRow]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create artifact directory: {}", dir.display()))?;

    let path = dir.join(artifact_filename(sport, &Local::now()));
    std::fs::write(&path, render_csv(rows))
        .with_context(|| format!("Failed to write artifact: {}", path.display()))?;

    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(path)
}
