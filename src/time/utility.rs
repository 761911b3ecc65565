use chrono::{
    DateTime,
    Days,
    FixedOffset,
    NaiveDate
};

const ONE_DAY: Days = Days::new(1);

#[inline]
pub fn local_calendar_date(ts: DateTime<FixedOffset>) -> NaiveDate {
    ts.date_naive()
}

/// Calendar date represented by a sensor with the given day offset.
#[inline]
pub fn target_date(ts: DateTime<FixedOffset>, offset_days: u64) -> NaiveDate {
    local_calendar_date(ts) + Days::new(offset_days)
}

/// Local midnight of the day after `ts`, in the same UTC offset.
/// Strictly greater than `ts` for any input.
pub fn start_of_next_local_day(ts: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    (local_calendar_date(ts) + ONE_DAY)
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_local_timezone(ts.timezone())
        .unwrap()
}
