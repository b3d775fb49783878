//! The `HabitStore` trait — the persistence collaborator.
//!
//! The trait is implemented by storage backends (e.g. `cadence-store-sqlite`).
//! Higher layers (`cadence-api`, the [`Tracker`](crate::service::Tracker)
//! service) depend on this abstraction, not on any concrete backend.
//!
//! Backends must enforce natural uniqueness constraints — one `Day` per date,
//! one completion mark per `(day, habit)` pair — so that concurrent creators
//! of the same key cannot corrupt state. `get_or_create_day` and `toggle` are
//! each required to be atomic per key.

use std::future::Future;

use uuid::Uuid;

use crate::{
  calendar::DayKey,
  day::{Day, DaySummary},
  habit::{Habit, WeekdaySet},
};

/// Abstraction over a cadence storage backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait HabitStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Habits ────────────────────────────────────────────────────────────

  /// Persist a new habit (with its nested weekday rows) and return it.
  /// The store assigns the UUID.
  fn add_habit(
    &self,
    title: String,
    week_days: WeekdaySet,
    created_at: DayKey,
  ) -> impl Future<Output = Result<Habit, Self::Error>> + Send + '_;

  /// Retrieve a habit by UUID. Returns `None` if not found.
  fn get_habit(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Habit>, Self::Error>> + Send + '_;

  /// List all habits in creation order.
  fn list_habits(
    &self,
  ) -> impl Future<Output = Result<Vec<Habit>, Self::Error>> + Send + '_;

  /// All habits applicable on `on`: `created_at <= on` and `weekday` in the
  /// recurrence set. Creation order, for deterministic results.
  fn find_applicable(
    &self,
    on: DayKey,
    weekday: u8,
  ) -> impl Future<Output = Result<Vec<Habit>, Self::Error>> + Send + '_;

  // ── Days ──────────────────────────────────────────────────────────────

  /// Return the `Day` for `date`, creating it if absent. Concurrent calls
  /// for the same date must converge on a single record (upsert keyed on
  /// the unique date column, never find-then-create).
  fn get_or_create_day(
    &self,
    date: DayKey,
  ) -> impl Future<Output = Result<Day, Self::Error>> + Send + '_;

  /// Non-creating lookup, for read-only queries.
  fn find_day(
    &self,
    date: DayKey,
  ) -> impl Future<Output = Result<Option<Day>, Self::Error>> + Send + '_;

  // ── Completion ledger ─────────────────────────────────────────────────

  /// Habit ids marked complete on the given day.
  fn list_completions(
    &self,
    day_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Uuid>, Self::Error>> + Send + '_;

  /// Idempotent completion flip for `(day_id, habit_id)`: delete the mark if
  /// present (returns `false`), create it if absent (returns `true`).
  /// Atomic per pair.
  fn toggle(
    &self,
    day_id: Uuid,
    habit_id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Aggregation ───────────────────────────────────────────────────────

  /// Per existing `Day`, the (completed, applicable) counts, in one round
  /// trip. Ordered by date ascending. Days with no toggle history do not
  /// appear.
  fn summary(
    &self,
  ) -> impl Future<Output = Result<Vec<DaySummary>, Self::Error>> + Send + '_;
}
