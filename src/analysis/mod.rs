//! Pure queries over normalized ownership records.
//!
//! Everything here is deterministic and order-stable: ties are always broken
//! by first occurrence in the input, which is harvest (first-seen) order.

pub mod normalize;

pub use normalize::{normalize, NormalizeError};

use crate::ownership::models::OwnershipRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Ranking metrics over a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// DraftKings ownership percentage.
    Dk,
    /// FanDuel ownership percentage.
    Fd,
    /// Sum of both platforms.
    #[default]
    Combined,
    /// The lower of the two platforms ("high on both").
    Min,
}

impl Metric {
    /// Returns the record's value under this metric.
    pub fn value(&self, record: &OwnershipRecord) -> f64 {
        match self {
            Metric::Dk => record.dk_ownership_pct,
            Metric::Fd => record.fd_ownership_pct,
            Metric::Combined => record.combined_ownership,
            Metric::Min => record.min_ownership,
        }
    }

    /// Heading text for rendered output.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Dk => "DraftKings ownership",
            Metric::Fd => "FanDuel ownership",
            Metric::Combined => "combined ownership",
            Metric::Min => "ownership on both platforms",
        }
    }

    pub fn all() -> &'static [Metric] {
        &[Metric::Dk, Metric::Fd, Metric::Combined, Metric::Min]
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Metric::Dk => "dk",
            Metric::Fd => "fd",
            Metric::Combined => "combined",
            Metric::Min => "min",
        };
        write!(f, "{}", code)
    }
}

impl FromStr for Metric {
    type Err = MetricParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dk" | "draftkings" => Ok(Metric::Dk),
            "fd" | "fanduel" => Ok(Metric::Fd),
            "combined" | "total" => Ok(Metric::Combined),
            "min" | "both" => Ok(Metric::Min),
            _ => Err(MetricParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetricParseError(String);

impl fmt::Display for MetricParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown metric '{}'. Valid metrics: dk, fd, combined, min", self.0)
    }
}

impl std::error::Error for MetricParseError {}

/// Caller misuse of a query helper.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("top-n requires n > 0")]
    InvalidN,
}

/// The single highest row under each metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryLeaders {
    pub by_dk: OwnershipRecord,
    pub by_fd: OwnershipRecord,
    pub by_combined: OwnershipRecord,
    pub by_min: OwnershipRecord,
}

/// Returns the top row under each of the four metrics, ties broken by first
/// occurrence. `None` for an empty input.
pub fn highest_in_each_category(records: &[OwnershipRecord]) -> Option<CategoryLeaders> {
    if records.is_empty() {
        return None;
    }

    Some(CategoryLeaders {
        by_dk: stable_argmax(records, Metric::Dk).clone(),
        by_fd: stable_argmax(records, Metric::Fd).clone(),
        by_combined: stable_argmax(records, Metric::Combined).clone(),
        by_min: stable_argmax(records, Metric::Min).clone(),
    })
}

/// First record attaining the maximum metric value. Strictly-greater
/// comparison keeps the earliest row on ties.
fn stable_argmax(records: &[OwnershipRecord], metric: Metric) -> &OwnershipRecord {
    let mut best = &records[0];
    for record in &records[1..] {
        if metric.value(record) > metric.value(best) {
            best = record;
        }
    }
    best
}

/// Returns up to `n` records with the greatest metric value, sorted
/// descending; ties keep input order. Asking for more rows than exist
/// returns everything, sorted.
pub fn top_n(
    records: &[OwnershipRecord],
    n: usize,
    metric: Metric,
) -> Result<Vec<OwnershipRecord>, AnalysisError> {
    if n == 0 {
        return Err(AnalysisError::InvalidN);
    }

    let mut sorted = records.to_vec();
    // Stable sort: equal keys stay in first-seen order
    sorted.sort_by(|a, b| {
        metric.value(b).partial_cmp(&metric.value(a)).unwrap_or(Ordering::Equal)
    });
    sorted.truncate(n);
    Ok(sorted)
}
