//! Calendar normalization: canonical day-keys and weekday derivation.
//!
//! The whole system uses a single fixed day-boundary convention: a timestamp
//! belongs to the UTC calendar date it falls on. A [`DayKey`] is that date,
//! and is the unique identity of a calendar day everywhere — habit creation
//! stamps, day records, and summary aggregation.
//!
//! Weekday indices are 0=Sunday..6=Saturday, the numbering of
//! `NaiveDate::weekday().num_days_from_sunday()`. Storage backends deriving a
//! weekday from a stored day-key (e.g. SQLite `strftime('%w', ..)`) must use
//! the same numbering, or applicability computed at write time and at summary
//! time would silently disagree.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike as _, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A timestamp truncated to its UTC calendar date.
///
/// Serializes as `YYYY-MM-DD`. Ordering is chronological.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DayKey(NaiveDate);

impl DayKey {
  /// Truncate `at` to the start of its UTC calendar day.
  pub fn from_datetime(at: DateTime<Utc>) -> Self { DayKey(at.date_naive()) }

  /// The day-key for the current moment.
  pub fn today() -> Self { Self::from_datetime(Utc::now()) }

  pub fn from_date(date: NaiveDate) -> Self { DayKey(date) }

  pub fn date(&self) -> NaiveDate { self.0 }

  /// Weekday index, 0=Sunday..6=Saturday.
  pub fn weekday(&self) -> u8 { self.0.weekday().num_days_from_sunday() as u8 }
}

impl fmt::Display for DayKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.format("%Y-%m-%d"))
  }
}

impl FromStr for DayKey {
  type Err = chrono::ParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map(DayKey)
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone as _;

  use super::*;

  #[test]
  fn truncates_to_utc_date() {
    let late = Utc.with_ymd_and_hms(2024, 1, 3, 23, 59, 59).unwrap();
    let early = Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap();
    assert_eq!(DayKey::from_datetime(late), DayKey::from_datetime(early));
  }

  #[test]
  fn weekday_is_zero_for_sunday() {
    // 2024-01-07 was a Sunday.
    let sunday: DayKey = "2024-01-07".parse().unwrap();
    assert_eq!(sunday.weekday(), 0);
  }

  #[test]
  fn weekday_matches_known_dates() {
    // 2024-01-01 was a Monday, 2024-01-03 a Wednesday, 2024-01-06 a Saturday.
    assert_eq!("2024-01-01".parse::<DayKey>().unwrap().weekday(), 1);
    assert_eq!("2024-01-03".parse::<DayKey>().unwrap().weekday(), 3);
    assert_eq!("2024-01-06".parse::<DayKey>().unwrap().weekday(), 6);
  }

  #[test]
  fn display_round_trips() {
    let key: DayKey = "2024-02-29".parse().unwrap();
    assert_eq!(key.to_string(), "2024-02-29");
    assert_eq!(key.to_string().parse::<DayKey>().unwrap(), key);
  }

  #[test]
  fn ordering_is_chronological() {
    let a: DayKey = "2023-12-31".parse().unwrap();
    let b: DayKey = "2024-01-01".parse().unwrap();
    assert!(a < b);
  }
}
