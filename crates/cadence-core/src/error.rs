//! Error types for `cadence-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("habit title must not be empty")]
  EmptyTitle,

  #[error("weekday index out of range: {0} (expected 0..=6)")]
  InvalidWeekday(u8),

  #[error("a habit must recur on at least one weekday")]
  EmptyWeekdaySet,

  #[error("habit not found: {0}")]
  HabitNotFound(Uuid),

  /// A failure reported by the persistence backend.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error without losing its source chain.
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Error::Store(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
