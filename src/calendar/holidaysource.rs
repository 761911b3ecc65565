use chrono::NaiveDate;
use thiserror::Error;

/// Failure reported by a holiday data source. Lookups are recoverable: the
/// caller records the message into the snapshot instead of propagating.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("no holiday data covers year {0}")]
    YearNotCovered(i32),

    #[error("holiday lookup failed: {0}")]
    Source(String),
}

/// Data source answering the three calendar questions for a single date.
///
/// `Send + Sync` supertrait so `dyn HolidaySource` can be shared through
/// `Arc` between the today/tomorrow classifiers.
pub trait HolidaySource: Send + Sync {
    /// Whether `d` is a working day (weekday that is not a statutory
    /// holiday, or a weekend swapped to working by official notice).
    fn is_workday(&self, d: NaiveDate) -> Result<bool, LookupError>;

    /// `(on_holiday, holiday_name)` — the name stays populated on make-up
    /// workdays that fall inside a named festival period.
    fn holiday_detail(&self, d: NaiveDate) -> Result<(bool, String), LookupError>;

    /// Whether `d` is an official in-lieu day (調休).
    fn is_in_lieu(&self, d: NaiveDate) -> Result<bool, LookupError>;
}
