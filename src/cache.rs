//! Duration-bound cache in front of the harvester.
//!
//! A harvest costs a browser launch and a minute of scrolling; repeat
//! requests for the same sport within the TTL window get the previously
//! normalized records instead. Stored results are immutable and shared
//! read-only.

use crate::ownership::models::OwnershipRecord;
use crate::ownership::Sport;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

struct CacheEntry {
    stored_at: Instant,
    records: Arc<Vec<OwnershipRecord>>,
}

/// In-memory TTL cache keyed by sport.
pub struct ResultCache {
    ttl: Duration,
    entries: Mutex<HashMap<Sport, CacheEntry>>,
}

impl ResultCache {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entries: Mutex::new(HashMap::new()) }
    }

    /// Returns the cached records for a sport if they are still fresh.
    pub fn get(&self, sport: Sport) -> Option<Arc<Vec<OwnershipRecord>>> {
        let entries = self.entries.lock().unwrap();
        entries
            .get(&sport)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.records.clone())
    }

    /// Stores a freshly harvested result and returns the shared handle.
    pub fn store(
        &self,
        sport: Sport,
        records: Vec<OwnershipRecord>,
    ) -> Arc<Vec<OwnershipRecord>> {
        let records = Arc::new(records);
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            sport,
            CacheEntry { stored_at: Instant::now(), records: records.clone() },
        );
        records
    }
}
