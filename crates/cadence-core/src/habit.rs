//! Habit — a recurring task defined by a weekly recurrence pattern.
//!
//! A habit is created once and never mutated. It is *applicable* on a day D
//! iff D's weekday is in its recurrence set and D is on or after the day the
//! habit was created (day-key comparison, not timestamp comparison).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, calendar::DayKey};

// ─── WeekdaySet ──────────────────────────────────────────────────────────────

/// A non-empty set of weekday indices in `0..=6` (0=Sunday..6=Saturday).
///
/// Duplicates collapse; construction rejects empty input and out-of-range
/// indices. Serializes as a sorted JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct WeekdaySet(BTreeSet<u8>);

impl WeekdaySet {
  pub fn new(days: impl IntoIterator<Item = u8>) -> Result<Self> {
    let mut set = BTreeSet::new();
    for day in days {
      if day > 6 {
        return Err(Error::InvalidWeekday(day));
      }
      set.insert(day);
    }
    if set.is_empty() {
      return Err(Error::EmptyWeekdaySet);
    }
    Ok(WeekdaySet(set))
  }

  pub fn contains(&self, weekday: u8) -> bool { self.0.contains(&weekday) }

  pub fn iter(&self) -> impl Iterator<Item = u8> + '_ { self.0.iter().copied() }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl TryFrom<Vec<u8>> for WeekdaySet {
  type Error = Error;

  fn try_from(days: Vec<u8>) -> Result<Self> { WeekdaySet::new(days) }
}

impl From<WeekdaySet> for Vec<u8> {
  fn from(set: WeekdaySet) -> Self { set.0.into_iter().collect() }
}

// ─── Habit ───────────────────────────────────────────────────────────────────

/// A recurring habit. Immutable once created; deletion is out of scope.
///
/// Serializes with the wire field names (`id`, `createdAt`, `weekDays`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
  #[serde(rename = "id")]
  pub habit_id:   Uuid,
  pub title:      String,
  /// First day this habit is eligible for completion.
  pub created_at: DayKey,
  pub week_days:  WeekdaySet,
}

impl Habit {
  /// Whether this habit can be completed on `day`.
  pub fn applicable_on(&self, day: DayKey) -> bool {
    self.week_days.contains(day.weekday()) && self.created_at <= day
  }
}

/// Unvalidated habit-creation input, as received from a client.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHabit {
  pub title:     String,
  pub week_days: Vec<u8>,
}

impl NewHabit {
  /// Validate the input, producing the title and recurrence set.
  pub fn validate(self) -> Result<(String, WeekdaySet)> {
    if self.title.trim().is_empty() {
      return Err(Error::EmptyTitle);
    }
    let week_days = WeekdaySet::new(self.week_days)?;
    Ok((self.title, week_days))
  }
}
