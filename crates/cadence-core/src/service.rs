//! The `Tracker` service — day reconciliation and summary orchestration.
//!
//! Composes the habit repository side and the completion-ledger side of a
//! [`HabitStore`] into the operations the HTTP layer exposes. The store
//! handle is injected at construction; there is no global client.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
  Error, Result,
  calendar::DayKey,
  day::{DaySummary, DayView},
  habit::{Habit, NewHabit},
  store::HabitStore,
};

/// Application service over an injected [`HabitStore`].
///
/// Cloning is cheap — the store handle is reference-counted.
#[derive(Clone)]
pub struct Tracker<S> {
  store: Arc<S>,
}

impl<S: HabitStore> Tracker<S> {
  pub fn new(store: Arc<S>) -> Self { Tracker { store } }

  /// Validate and persist a new habit. `created_at` is the normalized
  /// day-key of "now", so the habit is applicable from today onwards.
  pub async fn create_habit(&self, input: NewHabit) -> Result<Habit> {
    let (title, week_days) = input.validate()?;
    self
      .store
      .add_habit(title, week_days, DayKey::today())
      .await
      .map_err(Error::store)
  }

  /// Reconcile a single day: habits possible on it versus habits marked
  /// complete.
  ///
  /// The day lookup is non-creating — viewing a day must not fabricate
  /// persistent state. An absent day record simply means nothing was ever
  /// completed on that date.
  pub async fn day_view(&self, date: DayKey) -> Result<DayView> {
    let possible_habits = self
      .store
      .find_applicable(date, date.weekday())
      .await
      .map_err(Error::store)?;

    let completed_habit_ids = match self.store.find_day(date).await.map_err(Error::store)? {
      Some(day) => self
        .store
        .list_completions(day.day_id)
        .await
        .map_err(Error::store)?,
      None => Vec::new(),
    };

    Ok(DayView { possible_habits, completed_habit_ids })
  }

  /// Flip today's completion state for `habit_id`.
  ///
  /// The habit must exist — a completion mark never references an unknown
  /// habit. The day record for today is created on first toggle.
  pub async fn toggle_habit(&self, habit_id: Uuid) -> Result<bool> {
    self
      .store
      .get_habit(habit_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::HabitNotFound(habit_id))?;

    let today = self
      .store
      .get_or_create_day(DayKey::today())
      .await
      .map_err(Error::store)?;

    self
      .store
      .toggle(today.day_id, habit_id)
      .await
      .map_err(Error::store)
  }

  /// Per-day (applicable, completed) counts across all days with toggle
  /// history.
  pub async fn summary(&self) -> Result<Vec<DaySummary>> {
    self.store.summary().await.map_err(Error::store)
  }
}
