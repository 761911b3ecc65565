use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

use crate::calendar::chinaholidaysource::{ChinaHolidaySource, SourceDataError};
use crate::calendar::holidaysource::HolidaySource;
use crate::sensor::dateclassifier::DateClassifier;
use crate::sensor::host::HostHandle;
use crate::sensor::scheduledsnapshot::ScheduledSnapshot;
use crate::time::clock::Clock;

pub const TODAY_SENSOR_NAME: &str = "Chinese Calendar";
pub const TOMORROW_SENSOR_NAME: &str = "Tomorrow Chinese Calendar";

/// Setup failure. Reported once to the host, which may decline to
/// register the sensors; everything after setup degrades instead.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("holiday data source unavailable: {0}")]
    SourceUnavailable(#[from] SourceDataError)
}

/// Loads the holiday data source from a JSON file.
pub fn load_source(file_path: &str) -> Result<Arc<dyn HolidaySource>, SetupError> {
    let source = ChinaHolidaySource::from_reader(file_path).map_err(|source_error| {
        error!(path = file_path, error = %source_error, "error loading holiday data");
        source_error
    })?;
    Ok(Arc::new(source))
}

/// Builds the today/tomorrow sensor pair, computes each initial snapshot
/// and arms each initial one-shot timer. The returned sensors are handed
/// to the host for registration.
pub fn register_sensors(
    source: Arc<dyn HolidaySource>,
    clock: &dyn Clock,
    host: Arc<dyn HostHandle>
) -> Vec<ScheduledSnapshot> {
    let now = clock.now();
    let mut sensors = Vec::with_capacity(2);
    for (name, offset_days) in [(TODAY_SENSOR_NAME, 0u64), (TOMORROW_SENSOR_NAME, 1u64)] {
        let classifier = DateClassifier::new(Arc::clone(&source));
        let sensor = ScheduledSnapshot::new(
            name.to_owned(),
            offset_days,
            classifier,
            Arc::clone(&host),
            now
        );
        host.track_point_in_time(sensor.name(), sensor.next_fire_time(now));
        info!(
            sensor = name,
            offset_days,
            state = %sensor.state(),
            "sensor registered"
        );
        sensors.push(sensor);
    }
    sensors
}

/// Platform entry point: data file → source → sensor pair.
pub fn setup_platform(
    data_path: &str,
    clock: &dyn Clock,
    host: Arc<dyn HostHandle>
) -> Result<Vec<ScheduledSnapshot>, SetupError> {
    let source = load_source(data_path)?;
    Ok(register_sensors(source, clock, host))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::{DateTime, FixedOffset, TimeZone};

    use super::*;
    use crate::sensor::snapshot::{SensorState, Snapshot};
    use crate::time::clock::FixedClock;

    #[derive(Default)]
    struct RecordingHost {
        armed: Mutex<Vec<(String, DateTime<FixedOffset>)>>
    }

    impl HostHandle for RecordingHost {
        fn track_point_in_time(&self, sensor: &str, at: DateTime<FixedOffset>) {
            self.armed.lock().unwrap().push((sensor.to_owned(), at));
        }

        fn write_state(&self, _sensor: &str, _state: SensorState, _attributes: &Snapshot) {}
    }

    fn cst() -> FixedOffset {
        FixedOffset::east_opt(8 * 3600).unwrap()
    }

    #[test]
    fn missing_data_file_aborts_setup() {
        let clock = FixedClock::new(cst().with_ymd_and_hms(2024, 2, 12, 9, 0, 0).unwrap());
        let host = Arc::new(RecordingHost::default());
        let result = setup_platform("/nonexistent/china_holidays.json", &clock, host);
        assert!(matches!(result, Err(SetupError::SourceUnavailable(_))));
    }

    #[test]
    fn registers_today_and_tomorrow_with_initial_snapshots() {
        let source = Arc::new(ChinaHolidaySource::bundled().unwrap());
        // 2024-02-17 is the last Spring Festival day; 02-18 the swapped
        // Sunday shift.
        let now = cst().with_ymd_and_hms(2024, 2, 17, 10, 0, 0).unwrap();
        let clock = FixedClock::new(now);
        let host = Arc::new(RecordingHost::default());
        let sensors = register_sensors(source, &clock, Arc::clone(&host) as Arc<dyn HostHandle>);

        assert_eq!(sensors.len(), 2);
        let today = &sensors[0];
        let tomorrow = &sensors[1];
        assert_eq!(today.name(), TODAY_SENSOR_NAME);
        assert_eq!(tomorrow.name(), TOMORROW_SENSOR_NAME);
        assert_eq!(today.state(), SensorState::Holiday);
        assert_eq!(today.attributes().holiday_name(), "春节");
        // End-to-end: the make-up workday is working and in lieu, but not
        // a holiday.
        assert_eq!(tomorrow.state(), SensorState::Workday);
        assert!(!tomorrow.attributes().is_holiday());
        assert!(tomorrow.attributes().is_in_lieu());
        assert_eq!(tomorrow.attributes().holiday_name(), "春节");

        // Both initial timers armed for the same midnight boundary.
        let armed = host.armed.lock().unwrap();
        assert_eq!(armed.len(), 2);
        let midnight = cst().with_ymd_and_hms(2024, 2, 18, 0, 0, 0).unwrap();
        assert!(armed.iter().all(|(_, at)| *at == midnight));
    }
}
