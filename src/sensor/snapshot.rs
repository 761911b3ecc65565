use std::fmt;

use chrono::{
    DateTime,
    FixedOffset,
    NaiveDate
};
use serde::Serialize;

/// Sensor state string shown by the host, derived from `is_workday`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorState {
    Workday,
    Holiday
}

impl fmt::Display for SensorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorState::Workday => write!(f, "workday"),
            SensorState::Holiday => write!(f, "holiday")
        }
    }
}

/// Classification result for a single calendar date. Immutable once
/// produced; a recompute replaces the whole value, never single fields.
///
/// `error` is omitted from the serialized attributes when absent.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    is_workday: bool,
    is_holiday: bool,
    holiday_name: String,
    is_in_lieu: bool,
    last_updated: DateTime<FixedOffset>,
    date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>
}

impl Snapshot {
    pub fn classified(
        date: NaiveDate,
        last_updated: DateTime<FixedOffset>,
        is_workday: bool,
        is_holiday: bool,
        holiday_name: String,
        is_in_lieu: bool
    ) -> Snapshot {
        Snapshot {
            is_workday,
            is_holiday,
            holiday_name,
            is_in_lieu,
            last_updated,
            date,
            error: None
        }
    }

    /// Default-valued snapshot used when classification fails with no
    /// previous successful result to fall back on.
    pub fn empty(date: NaiveDate, last_updated: DateTime<FixedOffset>) -> Snapshot {
        Snapshot {
            is_workday: false,
            is_holiday: false,
            holiday_name: String::new(),
            is_in_lieu: false,
            last_updated,
            date,
            error: None
        }
    }

    /// Copy of this snapshot with only `error` replaced. Non-error fields
    /// keep their last-known-good values, even across repeated failures.
    pub fn with_error(&self, message: String) -> Snapshot {
        let mut annotated = self.clone();
        annotated.error = Some(message);
        annotated
    }

    pub fn state(&self) -> SensorState {
        if self.is_workday {
            SensorState::Workday
        } else {
            SensorState::Holiday
        }
    }

    pub fn is_workday(&self) -> bool {
        self.is_workday
    }

    pub fn is_holiday(&self) -> bool {
        self.is_holiday
    }

    pub fn holiday_name(&self) -> &String {
        &self.holiday_name
    }

    pub fn is_in_lieu(&self) -> bool {
        self.is_in_lieu
    }

    pub fn last_updated(&self) -> DateTime<FixedOffset> {
        self.last_updated
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
