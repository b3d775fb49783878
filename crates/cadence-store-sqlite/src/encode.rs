//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Day-keys are stored as `YYYY-MM-DD` strings. UUIDs are stored as
//! hyphenated lowercase strings. A habit's weekday set lives in its own
//! table and is read back as a `GROUP_CONCAT` string (e.g. `"1,3,5"`).

use cadence_core::{
  calendar::DayKey,
  day::{Day, DaySummary},
  habit::{Habit, WeekdaySet},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DayKey ───────────────────────────────────────────────────────────────────

pub fn encode_day(key: DayKey) -> String { key.to_string() }

pub fn decode_day(s: &str) -> Result<DayKey> {
  s.parse::<DayKey>()
    .map_err(|e| Error::Decode(format!("bad day key {s:?}: {e}")))
}

// ─── WeekdaySet ───────────────────────────────────────────────────────────────

/// Decode a `GROUP_CONCAT` weekday list. `None` (no rows) is a defect: every
/// habit is created with at least one weekday row.
pub fn decode_week_days(concat: Option<&str>) -> Result<WeekdaySet> {
  let concat =
    concat.ok_or_else(|| Error::Decode("habit has no weekday rows".into()))?;

  let days = concat
    .split(',')
    .map(|part| part.trim().parse::<u8>())
    .collect::<std::result::Result<Vec<u8>, _>>()
    .map_err(|e| Error::Decode(format!("bad weekday list {concat:?}: {e}")))?;

  Ok(WeekdaySet::new(days)?)
}

// ─── Raw row types ────────────────────────────────────────────────────────────

/// A `habits` row joined with its concatenated weekday set, as read from
/// SQLite before decoding.
pub struct RawHabit {
  pub habit_id:   String,
  pub title:      String,
  pub created_at: String,
  pub week_days:  Option<String>,
}

impl RawHabit {
  pub fn into_habit(self) -> Result<Habit> {
    Ok(Habit {
      habit_id:   decode_uuid(&self.habit_id)?,
      title:      self.title,
      created_at: decode_day(&self.created_at)?,
      week_days:  decode_week_days(self.week_days.as_deref())?,
    })
  }
}

pub struct RawDay {
  pub day_id: String,
  pub date:   String,
}

impl RawDay {
  pub fn into_day(self) -> Result<Day> {
    Ok(Day {
      day_id: decode_uuid(&self.day_id)?,
      date:   decode_day(&self.date)?,
    })
  }
}

pub struct RawSummaryRow {
  pub day_id:    String,
  pub date:      String,
  pub completed: f64,
  pub amount:    f64,
}

impl RawSummaryRow {
  pub fn into_summary(self) -> Result<DaySummary> {
    Ok(DaySummary {
      day_id:    decode_uuid(&self.day_id)?,
      date:      decode_day(&self.date)?,
      completed: self.completed,
      amount:    self.amount,
    })
  }
}
