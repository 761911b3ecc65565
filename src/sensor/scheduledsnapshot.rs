use std::sync::Arc;

use chrono::{
    DateTime,
    FixedOffset,
    NaiveDate
};
use tracing::debug;

use crate::sensor::dateclassifier::DateClassifier;
use crate::sensor::host::HostHandle;
use crate::sensor::snapshot::{SensorState, Snapshot};
use crate::time::utility::{start_of_next_local_day, target_date};

/// Holds the latest classification for a fixed day offset (0 = today,
/// 1 = tomorrow) and rearms itself for the next local midnight on every
/// timer fire.
///
/// `last_computed_date` is the memoization key: within one local day the
/// holiday source is queried at most once per instance, no matter how
/// often `refresh` is called. The key advances even when classification
/// carried an error, so the next day's fire is the implicit retry.
pub struct ScheduledSnapshot {
    name: String,
    offset_days: u64,
    classifier: DateClassifier,
    host: Arc<dyn HostHandle>,
    last_computed_date: Option<NaiveDate>,
    current: Snapshot
}

impl ScheduledSnapshot {
    /// Builds the sensor and computes its initial snapshot immediately.
    pub fn new(
        name: String,
        offset_days: u64,
        classifier: DateClassifier,
        host: Arc<dyn HostHandle>,
        now: DateTime<FixedOffset>
    ) -> ScheduledSnapshot {
        let target = target_date(now, offset_days);
        let current = classifier.classify(target, now, None);
        ScheduledSnapshot {
            name,
            offset_days,
            classifier,
            host,
            last_computed_date: Some(target),
            current
        }
    }

    pub fn name(&self) -> &String {
        &self.name
    }

    pub fn offset_days(&self) -> u64 {
        self.offset_days
    }

    pub fn state(&self) -> SensorState {
        self.current.state()
    }

    pub fn attributes(&self) -> &Snapshot {
        &self.current
    }

    pub fn last_computed_date(&self) -> Option<NaiveDate> {
        self.last_computed_date
    }

    /// Recomputes the snapshot when the represented date rolled over.
    /// Returns whether a recompute happened.
    pub fn refresh(&mut self, now: DateTime<FixedOffset>) -> bool {
        let target = target_date(now, self.offset_days);
        if Some(target) == self.last_computed_date {
            debug!(sensor = %self.name, date = %target, "date unchanged, skipping update");
            return false;
        }
        self.current = self.classifier.classify(target, now, Some(&self.current));
        self.last_computed_date = Some(target);
        true
    }

    /// Next wake-up boundary. Both offsets rearm at the same wall-clock
    /// instant, since tomorrow's date rolls over exactly when today's does.
    pub fn next_fire_time(&self, now: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        start_of_next_local_day(now)
    }

    /// Timer callback body: refresh, push state to the host, rearm.
    pub fn on_timer_fire(&mut self, now: DateTime<FixedOffset>) {
        self.refresh(now);
        self.host.write_state(&self.name, self.state(), &self.current);
        self.host
            .track_point_in_time(&self.name, self.next_fire_time(now));
    }
}
