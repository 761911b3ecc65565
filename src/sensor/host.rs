use chrono::{DateTime, FixedOffset};

use crate::sensor::snapshot::{SensorState, Snapshot};

/// Seam toward the embedding host. The host owns the event loop; this
/// crate only tells it when to wake a sensor up and when a state changed.
pub trait HostHandle: Send + Sync {
    /// Arm a one-shot wake-up for `sensor` at `at`. Tracking stops when the
    /// host tears down; the sensor itself never cancels.
    fn track_point_in_time(&self, sensor: &str, at: DateTime<FixedOffset>);

    /// State-changed signal with the full attribute set for display and
    /// automation rules.
    fn write_state(&self, sensor: &str, state: SensorState, attributes: &Snapshot);
}
