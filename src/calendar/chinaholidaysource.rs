use std::collections::{
    HashMap,
    HashSet
};
use std::fs::File;
use std::io::BufReader;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Deserialize;
use thiserror::Error;

use crate::calendar::holidaysource::{HolidaySource, LookupError};

/// Error raised while constructing a [`ChinaHolidaySource`] from data.
/// Unlike [`LookupError`] this aborts setup instead of degrading.
#[derive(Debug, Error)]
pub enum SourceDataError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    JsonParse(#[from] serde_json::Error),

    #[error("holiday data set is empty")]
    EmptyData,

    #[error("invalid year range {0}..={1}")]
    InvalidYearRange(i32, i32),
}

#[derive(Deserialize)]
struct NamedDateJsonProp {
    date: NaiveDate,
    name: String
}

#[derive(Deserialize)]
struct ChinaHolidayJsonProp {
    start_year: i32,
    end_year: i32,
    holidays: Vec<NamedDateJsonProp>,
    workdays: Vec<NamedDateJsonProp>,
    in_lieu_days: Vec<NaiveDate>
}

/// 中國法定節假日資料來源。
///
/// 對應官方的節假日安排通知（國務院辦公廳）：
/// - `holidays`：放假日 → 節日名稱（含被調休借走的週末補假日）。
/// - `workdays`：調休上班的週末日 → 所屬節日名稱。
/// - `in_lieu_days`：所有參與調休交換的日期，借來的休息日與補上班的
///   週末都算，因此 workday 與 in-lieu 可以同時成立。
///
/// Dates outside `[start_year, end_year]` are not covered by the data and
/// return [`LookupError::YearNotCovered`].
pub struct ChinaHolidaySource {
    start_year: i32,
    end_year: i32,
    holidays: HashMap<NaiveDate, String>,
    workdays: HashMap<NaiveDate, String>,
    in_lieu_days: HashSet<NaiveDate>
}

impl ChinaHolidaySource {
    pub fn new(
        start_year: i32,
        end_year: i32,
        holidays: HashMap<NaiveDate, String>,
        workdays: HashMap<NaiveDate, String>,
        in_lieu_days: HashSet<NaiveDate>
    ) -> Result<ChinaHolidaySource, SourceDataError> {
        if end_year < start_year {
            return Err(SourceDataError::InvalidYearRange(start_year, end_year));
        }
        if holidays.is_empty() {
            return Err(SourceDataError::EmptyData);
        }
        Ok(ChinaHolidaySource {
            start_year,
            end_year,
            holidays,
            workdays,
            in_lieu_days
        })
    }

    pub fn from_json_str(json_str: &str) -> Result<ChinaHolidaySource, SourceDataError> {
        let json_prop: ChinaHolidayJsonProp = serde_json::from_str(json_str)?;
        Self::from_json_prop(json_prop)
    }

    pub fn from_reader(file_path: &str) -> Result<ChinaHolidaySource, SourceDataError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_prop: ChinaHolidayJsonProp = serde_json::from_reader(reader)?;
        Self::from_json_prop(json_prop)
    }

    /// Source backed by the data file shipped with the crate (2024–2025).
    pub fn bundled() -> Result<ChinaHolidaySource, SourceDataError> {
        const BUNDLED_JSON: &str = include_str!("../../data/china_holidays.json");
        Self::from_json_str(BUNDLED_JSON)
    }

    fn from_json_prop(json_prop: ChinaHolidayJsonProp) -> Result<ChinaHolidaySource, SourceDataError> {
        let holidays = json_prop.holidays
            .into_iter()
            .map(|prop| (prop.date, prop.name))
            .collect();
        let workdays = json_prop.workdays
            .into_iter()
            .map(|prop| (prop.date, prop.name))
            .collect();
        Self::new(
            json_prop.start_year,
            json_prop.end_year,
            holidays,
            workdays,
            json_prop.in_lieu_days.into_iter().collect()
        )
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    pub fn end_year(&self) -> i32 {
        self.end_year
    }

    #[inline]
    pub fn in_covered_range(&self, year: i32) -> bool {
        year >= self.start_year && year <= self.end_year
    }

    fn check_covered(&self, d: NaiveDate) -> Result<(), LookupError> {
        if self.in_covered_range(d.year()) {
            Ok(())
        } else {
            Err(LookupError::YearNotCovered(d.year()))
        }
    }

    #[inline]
    fn is_weekend(d: NaiveDate) -> bool {
        matches!(d.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

impl HolidaySource for ChinaHolidaySource {
    fn is_workday(&self, d: NaiveDate) -> Result<bool, LookupError> {
        self.check_covered(d)?;
        // Check in order of precedence: an official swap beats the
        // statutory holiday list, which beats the plain weekday rule.
        if self.workdays.contains_key(&d) {
            return Ok(true);
        }
        if self.holidays.contains_key(&d) {
            return Ok(false);
        }
        Ok(!Self::is_weekend(d))
    }

    fn holiday_detail(&self, d: NaiveDate) -> Result<(bool, String), LookupError> {
        let on_holiday = !self.is_workday(d)?;
        let holiday_name = self.holidays
            .get(&d)
            .or_else(|| self.workdays.get(&d))
            .cloned()
            .unwrap_or_default();
        Ok((on_holiday, holiday_name))
    }

    fn is_in_lieu(&self, d: NaiveDate) -> Result<bool, LookupError> {
        self.check_covered(d)?;
        Ok(self.in_lieu_days.contains(&d))
    }
}
