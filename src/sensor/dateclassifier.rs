use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate};
use tracing::error;

use crate::calendar::holidaysource::{HolidaySource, LookupError};
use crate::sensor::snapshot::Snapshot;

/// Classifies a single calendar date against the injected holiday source.
///
/// Lookup failures never escape: they are logged and recorded into the
/// returned snapshot's `error` field, preserving the prior snapshot's
/// values when one exists. The next day's scheduled recompute is the
/// implicit retry.
pub struct DateClassifier {
    source: Arc<dyn HolidaySource>
}

impl DateClassifier {
    pub fn new(source: Arc<dyn HolidaySource>) -> DateClassifier {
        DateClassifier { source }
    }

    pub fn classify(
        &self,
        target: NaiveDate,
        now: DateTime<FixedOffset>,
        prior: Option<&Snapshot>
    ) -> Snapshot {
        match self.try_classify(target, now) {
            Ok(snapshot) => snapshot,
            Err(lookup_error) => {
                error!(date = %target, error = %lookup_error, "error updating Chinese calendar");
                let last_known_good = prior
                    .cloned()
                    .unwrap_or_else(|| Snapshot::empty(target, now));
                last_known_good.with_error(lookup_error.to_string())
            }
        }
    }

    fn try_classify(
        &self,
        target: NaiveDate,
        now: DateTime<FixedOffset>
    ) -> Result<Snapshot, LookupError> {
        let (on_holiday, holiday_name) = self.source.holiday_detail(target)?;
        let is_workday = self.source.is_workday(target)?;
        let is_in_lieu = self.source.is_in_lieu(target)?;
        Ok(Snapshot::classified(
            target,
            now,
            is_workday,
            on_holiday,
            holiday_name,
            is_in_lieu
        ))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    /// Source that succeeds for covered dates and fails outside them.
    struct PartialSource;

    impl HolidaySource for PartialSource {
        fn is_workday(&self, d: NaiveDate) -> Result<bool, LookupError> {
            self.holiday_detail(d).map(|(on_holiday, _)| !on_holiday)
        }

        fn holiday_detail(&self, d: NaiveDate) -> Result<(bool, String), LookupError> {
            if d == NaiveDate::from_ymd_opt(2024, 2, 12).unwrap() {
                Ok((true, "春节".to_owned()))
            } else {
                Err(LookupError::YearNotCovered(2099))
            }
        }

        fn is_in_lieu(&self, _d: NaiveDate) -> Result<bool, LookupError> {
            Ok(false)
        }
    }

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(8 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 2, 12, 8, 30, 0)
            .unwrap()
    }

    #[test]
    fn success_populates_all_fields_without_error() {
        let classifier = DateClassifier::new(Arc::new(PartialSource));
        let snapshot = classifier.classify(NaiveDate::from_ymd_opt(2024, 2, 12).unwrap(), now(), None);
        assert!(!snapshot.is_workday());
        assert!(snapshot.is_holiday());
        assert_eq!(snapshot.holiday_name(), "春节");
        assert_eq!(snapshot.last_updated(), now());
        assert!(snapshot.error().is_none());
    }

    #[test]
    fn failure_with_prior_keeps_last_known_good() {
        let classifier = DateClassifier::new(Arc::new(PartialSource));
        let good_date = NaiveDate::from_ymd_opt(2024, 2, 12).unwrap();
        let good = classifier.classify(good_date, now(), None);

        let bad_date = NaiveDate::from_ymd_opt(2099, 1, 1).unwrap();
        let degraded = classifier.classify(bad_date, now(), Some(&good));
        assert!(degraded.error().is_some());
        // Stale but preserved values, date included.
        assert_eq!(degraded.date(), good_date);
        assert_eq!(degraded.holiday_name(), "春节");
        assert!(degraded.is_holiday());
    }

    #[test]
    fn failure_without_prior_yields_defaults_plus_error() {
        let classifier = DateClassifier::new(Arc::new(PartialSource));
        let bad_date = NaiveDate::from_ymd_opt(2099, 1, 1).unwrap();
        let snapshot = classifier.classify(bad_date, now(), None);
        assert!(snapshot.error().is_some());
        assert_eq!(snapshot.date(), bad_date);
        assert!(!snapshot.is_workday());
        assert!(!snapshot.is_holiday());
        assert!(snapshot.holiday_name().is_empty());
    }

    #[test]
    fn second_consecutive_failure_overwrites_error_only() {
        let classifier = DateClassifier::new(Arc::new(PartialSource));
        let good = classifier.classify(NaiveDate::from_ymd_opt(2024, 2, 12).unwrap(), now(), None);
        let first_bad = classifier.classify(NaiveDate::from_ymd_opt(2099, 1, 1).unwrap(), now(), Some(&good));
        let second_bad = classifier.classify(NaiveDate::from_ymd_opt(2099, 1, 2).unwrap(), now(), Some(&first_bad));
        // Stale data persists indefinitely; only the annotation refreshes.
        assert_eq!(second_bad.holiday_name(), "春节");
        assert!(second_bad.error().is_some());
    }
}
