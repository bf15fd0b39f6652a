//! Conversion of raw ownership rows into typed records.

use crate::ownership::models::{OwnershipRecord, PlayerRow};
use thiserror::Error;

/// Failure to turn a raw row into a typed record. Malformed values are a
/// hard failure: they indicate an upstream extraction bug worth surfacing,
/// not something to coerce over.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("malformed ownership value {value:?} for player {player:?}")]
    MalformedOwnership { player: String, value: String },
}

/// Converts raw rows into typed records with derived combined/min metrics.
/// Pure and order-preserving: output index i corresponds to input index i.
pub fn normalize(rows: &[PlayerRow]) -> Result<Vec<OwnershipRecord>, NormalizeError> {
    rows.iter()
        .map(|row| {
            let dk = parse_percent(&row.dk_ownership).map_err(|value| {
                NormalizeError::MalformedOwnership { player: row.player.clone(), value }
            })?;
            let fd = parse_percent(&row.fd_ownership).map_err(|value| {
                NormalizeError::MalformedOwnership { player: row.player.clone(), value }
            })?;
            Ok(OwnershipRecord::derive(row.clone(), dk, fd))
        })
        .collect()
}

/// Parses "23.4%" (or bare "23.4") into 23.4. Returns the offending text on
/// failure so the error can quote it.
fn parse_percent(text: &str) -> Result<f64, String> {
    let trimmed = text.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    number.parse::<f64>().map_err(|_| text.to_string())
}
