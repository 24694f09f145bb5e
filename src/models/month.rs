//! Calendar month keys and month ranges
//!
//! Budgets are keyed by [`YearMonth`]; repeating and installment entries
//! span a [`MonthRange`]. Day-of-month never matters for either.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::{LedgerError, LedgerResult};

/// A calendar month, e.g. "2024-06"
///
/// Field order gives the derived ordering: year first, then month.
/// Serialized as the "YYYY-MM" string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Create a month, rejecting months outside 1-12
    pub fn new(year: i32, month: u32) -> LedgerResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(LedgerError::Validation(format!("Invalid month: {}", month)));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(LedgerError::Validation(format!("Invalid year: {}", year)));
        }
        Ok(Self { year, month })
    }

    /// The month containing a date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        // Year and month are validated on construction.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the month (inclusive)
    ///
    /// Found within the month itself, so December of the latest year chrono
    /// supports has a last day even though its `next()` has none.
    pub fn last_day(&self) -> NaiveDate {
        (28..=31)
            .rev()
            .find_map(|day| NaiveDate::from_ymd_opt(self.year, self.month, day))
            .unwrap_or_else(|| self.first_day())
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Number of months from `self` to `later`; negative if `later` is earlier
    pub fn months_until(&self, later: &YearMonth) -> i32 {
        (later.year - self.year) * 12 + (later.month as i32 - self.month as i32)
    }

    /// Parse "YYYY-MM"
    pub fn parse(s: &str) -> LedgerResult<Self> {
        let s = s.trim();
        let invalid = || LedgerError::Validation(format!("Invalid month format: {}", s));

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        YearMonth::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// An inclusive span of months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMonthRange")]
pub struct MonthRange {
    start: YearMonth,
    end: YearMonth,
}

impl MonthRange {
    /// Create a range; the start may not come after the end
    pub fn new(start: YearMonth, end: YearMonth) -> LedgerResult<Self> {
        if start > end {
            return Err(LedgerError::Validation(format!(
                "Start month {} can't be after end month {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// A range covering a single month
    pub fn single(month: YearMonth) -> Self {
        Self {
            start: month,
            end: month,
        }
    }

    pub fn start(&self) -> YearMonth {
        self.start
    }

    pub fn end(&self) -> YearMonth {
        self.end
    }

    /// Inclusive on both ends
    pub fn contains(&self, month: YearMonth) -> bool {
        self.start <= month && month <= self.end
    }

    /// Month distance between start and end (zero for a single month)
    pub fn months_spanned(&self) -> u32 {
        self.start.months_until(&self.end).unsigned_abs()
    }

    /// Parse "YYYY-MM..YYYY-MM"
    pub fn parse(s: &str) -> LedgerResult<Self> {
        let (start, end) = s.trim().split_once("..").ok_or_else(|| {
            LedgerError::Validation(format!("Invalid month range (expected START..END): {}", s))
        })?;
        Self::new(YearMonth::parse(start)?, YearMonth::parse(end)?)
    }
}

#[derive(Deserialize)]
struct RawMonthRange {
    start: YearMonth,
    end: YearMonth,
}

impl TryFrom<RawMonthRange> for MonthRange {
    type Error = LedgerError;

    fn try_from(raw: RawMonthRange) -> LedgerResult<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl fmt::Display for MonthRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn test_month_bounds() {
        let feb = ym(2024, 2);
        assert_eq!(feb.first_day(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(feb.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let dec = ym(2024, 12);
        assert_eq!(dec.last_day(), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn test_bounds_at_the_calendar_limits() {
        let latest = YearMonth::from_date(NaiveDate::MAX);
        assert_eq!(latest.last_day(), NaiveDate::MAX);
        assert!(latest.contains(latest.first_day()));

        let parsed = YearMonth::parse(&latest.to_string()).unwrap();
        assert_eq!(parsed, latest);

        let earliest = YearMonth::from_date(NaiveDate::MIN);
        assert_eq!(earliest.first_day().month(), NaiveDate::MIN.month());
        assert!(earliest.last_day() >= NaiveDate::MIN);
    }

    #[test]
    fn test_invalid_month() {
        assert!(YearMonth::new(2024, 0).is_err());
        assert!(YearMonth::new(2024, 13).is_err());
    }

    #[test]
    fn test_navigation() {
        assert_eq!(ym(2024, 12).next(), ym(2025, 1));
        assert_eq!(ym(2025, 1).prev(), ym(2024, 12));
        assert_eq!(ym(2024, 6).next(), ym(2024, 7));
    }

    #[test]
    fn test_ordering_is_year_then_month() {
        assert!(ym(2023, 12) < ym(2024, 1));
        assert!(ym(2024, 2) > ym(2024, 1));
    }

    #[test]
    fn test_months_until() {
        assert_eq!(ym(2024, 1).months_until(&ym(2024, 3)), 2);
        assert_eq!(ym(2023, 11).months_until(&ym(2024, 2)), 3);
        assert_eq!(ym(2024, 3).months_until(&ym(2024, 1)), -2);
    }

    #[test]
    fn test_contains_date() {
        let jun = ym(2024, 6);
        assert!(jun.contains(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()));
        assert!(!jun.contains(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()));
        assert!(!jun.contains(NaiveDate::from_ymd_opt(2023, 6, 15).unwrap()));
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(YearMonth::parse("2024-06").unwrap(), ym(2024, 6));
        assert_eq!(ym(2024, 6).to_string(), "2024-06");
        assert!(YearMonth::parse("2024").is_err());
        assert!(YearMonth::parse("2024-13").is_err());
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&ym(2024, 6)).unwrap();
        assert_eq!(json, "\"2024-06\"");
        let back: YearMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ym(2024, 6));
        assert!(serde_json::from_str::<YearMonth>("\"2024-13\"").is_err());
    }

    #[test]
    fn test_range_inclusive_bounds() {
        let range = MonthRange::new(ym(2024, 1), ym(2024, 3)).unwrap();
        assert!(range.contains(ym(2024, 1)));
        assert!(range.contains(ym(2024, 2)));
        assert!(range.contains(ym(2024, 3)));
        assert!(!range.contains(ym(2023, 12)));
        assert!(!range.contains(ym(2024, 4)));
        assert_eq!(range.months_spanned(), 2);
    }

    #[test]
    fn test_range_rejects_reversed() {
        let err = MonthRange::new(ym(2024, 3), ym(2024, 1)).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_range_deserialize_validates() {
        let range: MonthRange =
            serde_json::from_str(r#"{"start":"2024-01","end":"2024-03"}"#).unwrap();
        assert_eq!(range.months_spanned(), 2);
        assert!(serde_json::from_str::<MonthRange>(r#"{"start":"2024-03","end":"2024-01"}"#).is_err());
    }

    #[test]
    fn test_range_parse() {
        let range = MonthRange::parse("2024-01..2024-03").unwrap();
        assert_eq!(range.start(), ym(2024, 1));
        assert_eq!(range.end(), ym(2024, 3));
        assert_eq!(range.to_string(), "2024-01..2024-03");
        assert!(MonthRange::parse("2024-01").is_err());
    }
}
