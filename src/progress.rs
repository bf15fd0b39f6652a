//! Progress reporting for long-running harvests.
//!
//! The harvester is handed a sink explicitly; there is no ambient progress
//! state. Percentages are monotonically non-decreasing and purely advisory:
//! a sink never blocks the harvest or affects its result.

use tracing::{error, info};

/// Receiver for harvest progress updates.
pub trait ProgressSink {
    /// Reports progress as a 0–100 percentage plus human-readable status.
    fn update(&mut self, percent: u8, message: &str);

    /// Explicit error signal emitted before a fatal harvest error surfaces.
    fn fail(&mut self, message: &str) {
        let _ = message;
    }
}

/// Sink that reports through the tracing pipeline.
#[derive(Debug, Default)]
pub struct LogSink;

impl ProgressSink for LogSink {
    fn update(&mut self, percent: u8, message: &str) {
        info!("[{percent:>3}%] {message}");
    }

    fn fail(&mut self, message: &str) {
        error!("Harvest failed: {message}");
    }
}

/// Sink that discards everything, for callers without a progress surface.
#[derive(Debug, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn update(&mut self, _percent: u8, _message: &str) {}
}


#[cfg(test)]
mod tests {
    use super::testkit::RecordingSink;
    use super::*;

    #[test]
    fn test_recording_sink_captures_updates() {
        let mut sink = RecordingSink::default();
        sink.update(10, "starting");
        sink.update(50, "halfway");
        sink.fail("boom");

        assert_eq!(sink.updates, vec![(10, "starting".to_string()), (50, "halfway".to_string())]);
        assert_eq!(sink.failures, vec!["boom".to_string()]);
    }

    #[test]
    fn test_null_sink_ignores_everything() {
        let mut sink = NullSink;
        sink.update(42, "ignored");
        sink.fail("also ignored");
    }
}
