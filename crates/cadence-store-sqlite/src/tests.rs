//! Integration tests for `SqliteStore` against an in-memory database.

use std::sync::Arc;

use cadence_core::{
  Error as CoreError,
  calendar::DayKey,
  habit::{NewHabit, WeekdaySet},
  service::Tracker,
  store::HabitStore,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn day(s: &str) -> DayKey { s.parse().expect("day key") }

fn week_days(days: &[u8]) -> WeekdaySet {
  WeekdaySet::new(days.iter().copied()).expect("weekday set")
}

// ─── Habits ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_habit() {
  let s = store().await;

  let habit = s
    .add_habit("Exercise".into(), week_days(&[1, 3, 5]), day("2024-01-01"))
    .await
    .unwrap();

  let fetched = s.get_habit(habit.habit_id).await.unwrap().unwrap();
  assert_eq!(fetched, habit);
}

#[tokio::test]
async fn get_habit_missing_returns_none() {
  let s = store().await;
  let result = s.get_habit(Uuid::new_v4()).await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn list_habits_in_creation_order() {
  let s = store().await;
  let a = s
    .add_habit("A".into(), week_days(&[0]), day("2024-01-01"))
    .await
    .unwrap();
  let b = s
    .add_habit("B".into(), week_days(&[1]), day("2024-01-02"))
    .await
    .unwrap();
  let c = s
    .add_habit("C".into(), week_days(&[2]), day("2024-01-03"))
    .await
    .unwrap();

  let all = s.list_habits().await.unwrap();
  let ids: Vec<Uuid> = all.iter().map(|h| h.habit_id).collect();
  assert_eq!(ids, vec![a.habit_id, b.habit_id, c.habit_id]);
}

// ─── Applicability ───────────────────────────────────────────────────────────

#[tokio::test]
async fn find_applicable_filters_on_weekday() {
  let s = store().await;
  let mwf = s
    .add_habit("MWF".into(), week_days(&[1, 3, 5]), day("2024-01-01"))
    .await
    .unwrap();
  s.add_habit("Sundays".into(), week_days(&[0]), day("2024-01-01"))
    .await
    .unwrap();

  // 2024-01-03 is a Wednesday (weekday 3).
  let wednesday = day("2024-01-03");
  let found = s.find_applicable(wednesday, wednesday.weekday()).await.unwrap();
  assert_eq!(found.len(), 1);
  assert_eq!(found[0].habit_id, mwf.habit_id);
}

#[tokio::test]
async fn find_applicable_excludes_habits_created_later() {
  let s = store().await;
  // Created on a Wednesday, recurring on Wednesdays.
  s.add_habit("Read".into(), week_days(&[3]), day("2024-01-10"))
    .await
    .unwrap();

  // 2024-01-03 is an earlier Wednesday: the weekday matches but the habit
  // did not exist yet.
  let earlier_wednesday = day("2024-01-03");
  let found = s
    .find_applicable(earlier_wednesday, earlier_wednesday.weekday())
    .await
    .unwrap();
  assert!(found.is_empty());

  // The creation day itself qualifies.
  let creation_day = day("2024-01-10");
  let found = s
    .find_applicable(creation_day, creation_day.weekday())
    .await
    .unwrap();
  assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn find_applicable_is_creation_ordered() {
  let s = store().await;
  let first = s
    .add_habit("First".into(), week_days(&[3]), day("2024-01-01"))
    .await
    .unwrap();
  let second = s
    .add_habit("Second".into(), week_days(&[3]), day("2024-01-01"))
    .await
    .unwrap();

  let wednesday = day("2024-01-03");
  let found = s.find_applicable(wednesday, wednesday.weekday()).await.unwrap();
  let ids: Vec<Uuid> = found.iter().map(|h| h.habit_id).collect();
  assert_eq!(ids, vec![first.habit_id, second.habit_id]);
}

// ─── Days ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_or_create_day_is_idempotent() {
  let s = store().await;
  let d1 = s.get_or_create_day(day("2024-01-03")).await.unwrap();
  let d2 = s.get_or_create_day(day("2024-01-03")).await.unwrap();
  assert_eq!(d1.day_id, d2.day_id);
  assert_eq!(d1.date, day("2024-01-03"));
}

#[tokio::test]
async fn distinct_dates_get_distinct_days() {
  let s = store().await;
  let d1 = s.get_or_create_day(day("2024-01-03")).await.unwrap();
  let d2 = s.get_or_create_day(day("2024-01-04")).await.unwrap();
  assert_ne!(d1.day_id, d2.day_id);
}

#[tokio::test]
async fn find_day_does_not_create() {
  let s = store().await;
  assert!(s.find_day(day("2024-01-03")).await.unwrap().is_none());
  // Still absent after the lookup.
  assert!(s.find_day(day("2024-01-03")).await.unwrap().is_none());
  assert!(s.summary().await.unwrap().is_empty());
}

// ─── Toggle ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn toggle_flips_and_is_its_own_inverse() {
  let s = store().await;
  let habit = s
    .add_habit("Exercise".into(), week_days(&[3]), day("2024-01-01"))
    .await
    .unwrap();
  let d = s.get_or_create_day(day("2024-01-03")).await.unwrap();

  assert!(s.toggle(d.day_id, habit.habit_id).await.unwrap());
  assert_eq!(s.list_completions(d.day_id).await.unwrap(), vec![habit.habit_id]);

  assert!(!s.toggle(d.day_id, habit.habit_id).await.unwrap());
  assert!(s.list_completions(d.day_id).await.unwrap().is_empty());

  // Back where we started: a third toggle completes again.
  assert!(s.toggle(d.day_id, habit.habit_id).await.unwrap());
}

#[tokio::test]
async fn toggle_is_scoped_to_its_day() {
  let s = store().await;
  let habit = s
    .add_habit("Exercise".into(), week_days(&[3]), day("2024-01-01"))
    .await
    .unwrap();
  let wed1 = s.get_or_create_day(day("2024-01-03")).await.unwrap();
  let wed2 = s.get_or_create_day(day("2024-01-10")).await.unwrap();

  s.toggle(wed1.day_id, habit.habit_id).await.unwrap();
  assert!(s.list_completions(wed2.day_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn list_completions_holds_multiple_habits() {
  let s = store().await;
  let a = s
    .add_habit("A".into(), week_days(&[3]), day("2024-01-01"))
    .await
    .unwrap();
  let b = s
    .add_habit("B".into(), week_days(&[3]), day("2024-01-01"))
    .await
    .unwrap();
  let d = s.get_or_create_day(day("2024-01-03")).await.unwrap();

  s.toggle(d.day_id, a.habit_id).await.unwrap();
  s.toggle(d.day_id, b.habit_id).await.unwrap();

  let completed = s.list_completions(d.day_id).await.unwrap();
  assert_eq!(completed, vec![a.habit_id, b.habit_id]);
}

// ─── Summary ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn summary_empty_without_any_toggle_history() {
  let s = store().await;
  s.add_habit("Exercise".into(), week_days(&[1, 3, 5]), day("2024-01-01"))
    .await
    .unwrap();
  assert!(s.summary().await.unwrap().is_empty());
}

#[tokio::test]
async fn summary_counts_applicable_and_completed_per_day() {
  let s = store().await;
  let exercise = s
    .add_habit("Exercise".into(), week_days(&[1, 3, 5]), day("2024-01-01"))
    .await
    .unwrap();
  let read = s
    .add_habit("Read".into(), week_days(&[3]), day("2024-01-10"))
    .await
    .unwrap();

  // 2024-01-03, Wednesday: only Exercise exists yet.
  let wed1 = s.get_or_create_day(day("2024-01-03")).await.unwrap();
  s.toggle(wed1.day_id, exercise.habit_id).await.unwrap();

  // 2024-01-10, Wednesday: both habits apply; both completed.
  let wed2 = s.get_or_create_day(day("2024-01-10")).await.unwrap();
  s.toggle(wed2.day_id, exercise.habit_id).await.unwrap();
  s.toggle(wed2.day_id, read.habit_id).await.unwrap();

  let rows = s.summary().await.unwrap();
  assert_eq!(rows.len(), 2);

  assert_eq!(rows[0].date, day("2024-01-03"));
  assert_eq!(rows[0].completed, 1.0);
  assert_eq!(rows[0].amount, 1.0);

  assert_eq!(rows[1].date, day("2024-01-10"));
  assert_eq!(rows[1].completed, 2.0);
  assert_eq!(rows[1].amount, 2.0);
}

#[tokio::test]
async fn summary_amount_is_independent_of_completed() {
  let s = store().await;
  s.add_habit("Exercise".into(), week_days(&[1, 3, 5]), day("2024-01-01"))
    .await
    .unwrap();
  let habit = s
    .add_habit("Stretch".into(), week_days(&[5]), day("2024-01-01"))
    .await
    .unwrap();

  // 2024-01-05 is a Friday: double-toggle leaves the day with zero marks,
  // but the day record persists and both Friday habits count as applicable.
  let friday = s.get_or_create_day(day("2024-01-05")).await.unwrap();
  s.toggle(friday.day_id, habit.habit_id).await.unwrap();
  s.toggle(friday.day_id, habit.habit_id).await.unwrap();

  let rows = s.summary().await.unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].completed, 0.0);
  assert_eq!(rows[0].amount, 2.0);
}

#[tokio::test]
async fn summary_weekday_matches_write_path() {
  let s = store().await;
  // Sunday-only habit; 2024-01-07 is a Sunday (weekday 0 on both paths).
  let habit = s
    .add_habit("Rest".into(), week_days(&[0]), day("2024-01-01"))
    .await
    .unwrap();

  let sunday = day("2024-01-07");
  assert_eq!(sunday.weekday(), 0);
  let found = s.find_applicable(sunday, sunday.weekday()).await.unwrap();
  assert_eq!(found.len(), 1);

  let d = s.get_or_create_day(sunday).await.unwrap();
  s.toggle(d.day_id, habit.habit_id).await.unwrap();

  let rows = s.summary().await.unwrap();
  assert_eq!(rows[0].amount, 1.0, "strftime weekday must agree with DayKey");
  assert_eq!(rows[0].completed, 1.0);
}

// ─── Tracker service over the real store ─────────────────────────────────────

fn tracker(s: SqliteStore) -> Tracker<SqliteStore> { Tracker::new(Arc::new(s)) }

#[tokio::test]
async fn create_habit_stamps_today() {
  let t = tracker(store().await);
  let habit = t
    .create_habit(NewHabit { title: "Exercise".into(), week_days: vec![1, 3, 3, 5] })
    .await
    .unwrap();

  assert_eq!(habit.created_at, DayKey::today());
  assert_eq!(Vec::<u8>::from(habit.week_days), vec![1, 3, 5]);
}

#[tokio::test]
async fn create_habit_rejects_invalid_input() {
  let t = tracker(store().await);

  let err = t
    .create_habit(NewHabit { title: "".into(), week_days: vec![1] })
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::EmptyTitle));

  let err = t
    .create_habit(NewHabit { title: "X".into(), week_days: vec![9] })
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::InvalidWeekday(9)));

  let err = t
    .create_habit(NewHabit { title: "X".into(), week_days: vec![] })
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::EmptyWeekdaySet));
}

#[tokio::test]
async fn day_view_reconciles_possible_and_completed() {
  let s = store().await;
  let habit = s
    .add_habit("Exercise".into(), week_days(&[1, 3, 5]), day("2024-01-01"))
    .await
    .unwrap();
  let d = s.get_or_create_day(day("2024-01-03")).await.unwrap();
  s.toggle(d.day_id, habit.habit_id).await.unwrap();

  let t = tracker(s);
  let view = t.day_view(day("2024-01-03")).await.unwrap();
  assert_eq!(view.possible_habits.len(), 1);
  assert_eq!(view.completed_habit_ids, vec![habit.habit_id]);

  // Same weekday, earlier than creation: not possible, nothing completed.
  let view = t.day_view(day("2023-12-27")).await.unwrap();
  assert!(view.possible_habits.is_empty());
  assert!(view.completed_habit_ids.is_empty());
}

#[tokio::test]
async fn day_view_never_creates_a_day() {
  let s = store().await;
  let t = tracker(s.clone());

  t.day_view(day("2024-01-03")).await.unwrap();
  assert!(s.find_day(day("2024-01-03")).await.unwrap().is_none());
  assert!(s.summary().await.unwrap().is_empty());
}

#[tokio::test]
async fn toggle_habit_requires_existing_habit() {
  let t = tracker(store().await);
  let unknown = Uuid::new_v4();
  let err = t.toggle_habit(unknown).await.unwrap_err();
  assert!(matches!(err, CoreError::HabitNotFound(id) if id == unknown));
}

#[tokio::test]
async fn toggle_habit_creates_today_lazily_and_flips() {
  let s = store().await;
  let t = tracker(s.clone());
  let habit = t
    .create_habit(NewHabit { title: "Exercise".into(), week_days: vec![0, 1, 2, 3, 4, 5, 6] })
    .await
    .unwrap();

  assert!(s.find_day(DayKey::today()).await.unwrap().is_none());

  assert!(t.toggle_habit(habit.habit_id).await.unwrap());
  let today = s.find_day(DayKey::today()).await.unwrap().unwrap();
  assert_eq!(s.list_completions(today.day_id).await.unwrap(), vec![habit.habit_id]);

  assert!(!t.toggle_habit(habit.habit_id).await.unwrap());
  assert!(s.list_completions(today.day_id).await.unwrap().is_empty());
}
