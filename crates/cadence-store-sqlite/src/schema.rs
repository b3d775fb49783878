//! SQL schema for the cadence SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.
//!
//! Day-keys are stored as `YYYY-MM-DD` TEXT: lexical comparison is
//! chronological, and `strftime('%w', date)` yields 0=Sunday..6=Saturday —
//! the same numbering `cadence_core::calendar::DayKey::weekday` uses. The
//! summary query depends on that agreement.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Habits are immutable once created.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS habits (
    habit_id   TEXT PRIMARY KEY,
    title      TEXT NOT NULL,
    created_at TEXT NOT NULL    -- day key, 'YYYY-MM-DD'
);

-- One row per weekday the habit recurs on.
CREATE TABLE IF NOT EXISTS habit_week_days (
    habit_id TEXT    NOT NULL REFERENCES habits(habit_id),
    week_day INTEGER NOT NULL CHECK (week_day BETWEEN 0 AND 6),
    UNIQUE (habit_id, week_day)
);

-- A day row exists only once something was toggled on that date.
CREATE TABLE IF NOT EXISTS days (
    day_id TEXT PRIMARY KEY,
    date   TEXT NOT NULL,       -- day key, 'YYYY-MM-DD'
    UNIQUE (date)
);

-- Existence of a row means 'completed'. Toggle deletes or inserts; the
-- unique pair keeps concurrent creators from duplicating a mark.
CREATE TABLE IF NOT EXISTS day_habits (
    day_habit_id TEXT PRIMARY KEY,
    day_id       TEXT NOT NULL REFERENCES days(day_id),
    habit_id     TEXT NOT NULL REFERENCES habits(habit_id),
    UNIQUE (day_id, habit_id)
);

CREATE INDEX IF NOT EXISTS habit_week_days_habit_idx ON habit_week_days(habit_id);
CREATE INDEX IF NOT EXISTS day_habits_day_idx        ON day_habits(day_id);

PRAGMA user_version = 1;
";
