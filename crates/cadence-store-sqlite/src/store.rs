//! [`SqliteStore`] — the SQLite implementation of [`HabitStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use cadence_core::{
  calendar::DayKey,
  day::{Day, DaySummary},
  habit::{Habit, WeekdaySet},
  store::HabitStore,
};

use crate::{
  Error, Result,
  encode::{RawDay, RawHabit, RawSummaryRow, decode_uuid, encode_day, encode_uuid},
  schema::SCHEMA,
};

/// Columns of the habit read queries: the `habits` row plus the habit's
/// weekday set, concatenated so one statement returns complete habits.
const HABIT_COLUMNS: &str = "h.habit_id, h.title, h.created_at, \
   (SELECT GROUP_CONCAT(w.week_day) \
      FROM habit_week_days w \
     WHERE w.habit_id = h.habit_id)";

fn habit_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawHabit> {
  Ok(RawHabit {
    habit_id:   row.get(0)?,
    title:      row.get(1)?,
    created_at: row.get(2)?,
    week_days:  row.get(3)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A cadence habit store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── HabitStore impl ─────────────────────────────────────────────────────────

impl HabitStore for SqliteStore {
  type Error = Error;

  // ── Habits ────────────────────────────────────────────────────────────────

  async fn add_habit(
    &self,
    title: String,
    week_days: WeekdaySet,
    created_at: DayKey,
  ) -> Result<Habit> {
    let habit = Habit {
      habit_id: Uuid::new_v4(),
      title,
      created_at,
      week_days,
    };

    let id_str      = encode_uuid(habit.habit_id);
    let title_owned = habit.title.clone();
    let created_str = encode_day(habit.created_at);
    let days: Vec<u8> = habit.week_days.iter().collect();

    // Habit row and weekday rows land in one transaction: a habit is never
    // visible with a partial recurrence set.
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO habits (habit_id, title, created_at) VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, title_owned, created_str],
        )?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO habit_week_days (habit_id, week_day) VALUES (?1, ?2)",
          )?;
          for day in &days {
            stmt.execute(rusqlite::params![id_str, *day as i64])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    Ok(habit)
  }

  async fn get_habit(&self, id: Uuid) -> Result<Option<Habit>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawHabit> = self
      .conn
      .call(move |conn| {
        let sql =
          format!("SELECT {HABIT_COLUMNS} FROM habits h WHERE h.habit_id = ?1");
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id_str], habit_from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawHabit::into_habit).transpose()
  }

  async fn list_habits(&self) -> Result<Vec<Habit>> {
    let raws: Vec<RawHabit> = self
      .conn
      .call(|conn| {
        let sql =
          format!("SELECT {HABIT_COLUMNS} FROM habits h ORDER BY h.rowid");
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], habit_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawHabit::into_habit).collect()
  }

  async fn find_applicable(&self, on: DayKey, weekday: u8) -> Result<Vec<Habit>> {
    let on_str = encode_day(on);

    let raws: Vec<RawHabit> = self
      .conn
      .call(move |conn| {
        // 'YYYY-MM-DD' text compares lexically as chronologically.
        let sql = format!(
          "SELECT {HABIT_COLUMNS}
             FROM habits h
            WHERE h.created_at <= ?1
              AND EXISTS (SELECT 1
                            FROM habit_week_days w2
                           WHERE w2.habit_id = h.habit_id
                             AND w2.week_day = ?2)
            ORDER BY h.rowid"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![on_str, weekday as i64], habit_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawHabit::into_habit).collect()
  }

  // ── Days ──────────────────────────────────────────────────────────────────

  async fn get_or_create_day(&self, date: DayKey) -> Result<Day> {
    let candidate_id = encode_uuid(Uuid::new_v4());
    let date_str     = encode_day(date);

    // Upsert keyed on the unique date column. A losing concurrent creator's
    // insert becomes a no-op and the follow-up select returns the winner.
    let raw: RawDay = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO days (day_id, date) VALUES (?1, ?2)
           ON CONFLICT(date) DO NOTHING",
          rusqlite::params![candidate_id, date_str],
        )?;
        let raw = conn.query_row(
          "SELECT day_id, date FROM days WHERE date = ?1",
          rusqlite::params![date_str],
          |row| Ok(RawDay { day_id: row.get(0)?, date: row.get(1)? }),
        )?;
        Ok(raw)
      })
      .await?;

    raw.into_day()
  }

  async fn find_day(&self, date: DayKey) -> Result<Option<Day>> {
    let date_str = encode_day(date);

    let raw: Option<RawDay> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT day_id, date FROM days WHERE date = ?1",
              rusqlite::params![date_str],
              |row| Ok(RawDay { day_id: row.get(0)?, date: row.get(1)? }),
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawDay::into_day).transpose()
  }

  // ── Completion ledger ─────────────────────────────────────────────────────

  async fn list_completions(&self, day_id: Uuid) -> Result<Vec<Uuid>> {
    let day_str = encode_uuid(day_id);

    let ids: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT habit_id FROM day_habits WHERE day_id = ?1 ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![day_str], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    ids.iter().map(|s| decode_uuid(s)).collect()
  }

  async fn toggle(&self, day_id: Uuid, habit_id: Uuid) -> Result<bool> {
    let day_str   = encode_uuid(day_id);
    let habit_str = encode_uuid(habit_id);
    let mark_id   = encode_uuid(Uuid::new_v4());

    // Delete-then-insert inside one transaction: the flip observes and
    // mutates the pair's state atomically.
    let completed: bool = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let deleted = tx.execute(
          "DELETE FROM day_habits WHERE day_id = ?1 AND habit_id = ?2",
          rusqlite::params![day_str, habit_str],
        )?;
        let completed = if deleted == 0 {
          tx.execute(
            "INSERT INTO day_habits (day_habit_id, day_id, habit_id)
             VALUES (?1, ?2, ?3)",
            rusqlite::params![mark_id, day_str, habit_str],
          )?;
          true
        } else {
          false
        };
        tx.commit()?;
        Ok(completed)
      })
      .await?;

    Ok(completed)
  }

  // ── Aggregation ───────────────────────────────────────────────────────────

  async fn summary(&self) -> Result<Vec<DaySummary>> {
    // One round trip for the whole history. strftime('%w', ..) numbers
    // weekdays 0=Sunday..6=Saturday, matching DayKey::weekday, so the
    // applicability computed here agrees with the write path.
    let raws: Vec<RawSummaryRow> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT
             d.day_id,
             d.date,
             (SELECT CAST(COUNT(*) AS REAL)
                FROM day_habits dh
               WHERE dh.day_id = d.day_id) AS completed,
             (SELECT CAST(COUNT(*) AS REAL)
                FROM habit_week_days hwd
                JOIN habits h ON h.habit_id = hwd.habit_id
               WHERE hwd.week_day = CAST(strftime('%w', d.date) AS INTEGER)
                 AND h.created_at <= d.date) AS amount
           FROM days d
           ORDER BY d.date",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawSummaryRow {
              day_id:    row.get(0)?,
              date:      row.get(1)?,
              completed: row.get(2)?,
              amount:    row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSummaryRow::into_summary).collect()
  }
}
