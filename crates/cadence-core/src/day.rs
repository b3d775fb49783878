//! Day records and the read models derived from them.
//!
//! A [`Day`] exists only once something was toggled on that date — viewing a
//! day must never create one. Completion is the existence of a ledger mark
//! tying a day to a habit; there is no boolean flag anywhere.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{calendar::DayKey, habit::Habit};

/// A calendar day with at least one toggle interaction. At most one record
/// exists per date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
  pub day_id: Uuid,
  pub date:   DayKey,
}

/// Reconciled view of a single day: which habits were possible, which were
/// marked complete.
#[derive(Debug, Clone, Serialize)]
pub struct DayView {
  #[serde(rename = "possibleHabits")]
  pub possible_habits:     Vec<Habit>,
  #[serde(rename = "completedHabits")]
  pub completed_habit_ids: Vec<Uuid>,
}

/// One row of the historical summary.
///
/// `completed` and `amount` are floats on the wire; they carry whole counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
  #[serde(rename = "id")]
  pub day_id:    Uuid,
  pub date:      DayKey,
  /// Habits actually marked complete on this day.
  pub completed: f64,
  /// Habits that were applicable on this day: recurrence weekday matches the
  /// date's weekday and the habit already existed.
  pub amount:    f64,
}
