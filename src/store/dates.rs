//! ISO calendar dates and query windows
//!
//! Measurement dates are stored as `YYYY-MM-DD` text and filtered with plain
//! string comparison in SQL. That only agrees with calendar order when every
//! date is in canonical zero-padded form, so request dates go through
//! [`IsoDate`] before they reach a query.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use thiserror::Error;

/// Storage and wire format for measurement dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the lookback window used by the "last year" endpoints
pub const LAST_YEAR_DAYS: u64 = 365;

/// Date parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("'{0}' is not a YYYY-MM-DD date")]
    Malformed(String),
}

/// A calendar date in canonical `YYYY-MM-DD` form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDate(NaiveDate);

impl IsoDate {
    /// The date `days` calendar days earlier, if representable.
    pub fn days_before(&self, days: u64) -> Option<IsoDate> {
        self.0.checked_sub_days(Days::new(days)).map(IsoDate)
    }

    /// Start of the trailing one-year window ending at this date.
    pub fn year_earlier(&self) -> Option<IsoDate> {
        self.days_before(LAST_YEAR_DAYS)
    }
}

impl FromStr for IsoDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map_err(|_| DateError::Malformed(s.to_string()))?;

        // chrono accepts unpadded fields; those would break lexical ordering
        if date.format(DATE_FORMAT).to_string() != s {
            return Err(DateError::Malformed(s.to_string()));
        }

        Ok(Self(date))
    }
}

impl fmt::Display for IsoDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

/// Inclusive date window for temperature aggregates
///
/// An open window (`end == None`) covers every date from `start` onwards.
/// A window whose end precedes its start is valid and simply selects no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: IsoDate,
    end: Option<IsoDate>,
}

impl DateRange {
    /// All dates on or after `start`
    pub fn starting(start: IsoDate) -> Self {
        Self { start, end: None }
    }

    /// All dates in `start..=end`
    pub fn between(start: IsoDate, end: IsoDate) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// Parse raw path segments into a window
    pub fn parse(start: &str, end: Option<&str>) -> Result<Self, DateError> {
        let start: IsoDate = start.parse()?;
        match end {
            Some(end) => Ok(Self::between(start, end.parse()?)),
            None => Ok(Self::starting(start)),
        }
    }

    pub fn start(&self) -> IsoDate {
        self.start
    }

    pub fn end(&self) -> Option<IsoDate> {
        self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> IsoDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_canonical() {
        assert_eq!(date("2017-08-23").to_string(), "2017-08-23");
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in ["", "2017", "2017-8-23", "2017-08-32", "23-08-2017", "2017/08/23", "yesterday"] {
            assert_eq!(
                bad.parse::<IsoDate>(),
                Err(DateError::Malformed(bad.to_string())),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_year_earlier() {
        assert_eq!(date("2017-08-23").year_earlier(), Some(date("2016-08-23")));
        // 2016 is a leap year, so 365 days back from March lands a day later
        assert_eq!(date("2016-03-01").year_earlier(), Some(date("2015-03-02")));
    }

    #[test]
    fn test_lexical_order_matches_calendar_order() {
        let a = date("2016-08-22");
        let b = date("2016-08-23");
        assert!(a < b);
        assert!(a.to_string() < b.to_string());
    }

    #[test]
    fn test_range_parse() {
        let open = DateRange::parse("2010-01-01", None).unwrap();
        assert_eq!(open.start(), date("2010-01-01"));
        assert_eq!(open.end(), None);

        let closed = DateRange::parse("2010-01-01", Some("2010-12-31")).unwrap();
        assert_eq!(closed.start(), date("2010-01-01"));
        assert_eq!(closed.end(), Some(date("2010-12-31")));
    }

    #[test]
    fn test_single_day_range() {
        let range = DateRange::parse("2012-02-29", Some("2012-02-29")).unwrap();
        assert_eq!(range.end(), Some(range.start()));
    }

    #[test]
    fn test_inverted_range() {
        let range = DateRange::parse("2011-01-01", Some("2010-01-01")).unwrap();
        assert_eq!(range, DateRange::between(date("2011-01-01"), date("2010-01-01")));
        assert!(range.end().unwrap() < range.start());
    }

    #[test]
    fn test_malformed_end() {
        let err = DateRange::parse("2010-01-01", Some("soon")).unwrap_err();
        assert_eq!(err, DateError::Malformed("soon".to_string()));
    }
}
