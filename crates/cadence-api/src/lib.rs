//! JSON REST API for the cadence habit tracker.
//!
//! Exposes an axum [`Router`] backed by any [`cadence_core::store::HabitStore`].
//! The layer is thin: parse and validate input, delegate to the
//! [`Tracker`](cadence_core::service::Tracker) service, map errors to HTTP
//! statuses. TLS and transport concerns are the caller's responsibility.
//!
//! | Method  | Path                 | Response |
//! |---------|----------------------|----------|
//! | `POST`  | `/habits`            | 200 empty |
//! | `GET`   | `/day?date=..`       | `{"possibleHabits","completedHabits"}` |
//! | `PATCH` | `/habits/:id/toggle` | `{"completed": bool}` |
//! | `GET`   | `/summary`           | `[{"id","date","completed","amount"}]` |

pub mod day;
pub mod error;
pub mod habits;
pub mod summary;

use axum::{
  Router,
  routing::{get, patch, post},
};
use cadence_core::{service::Tracker, store::HabitStore};

pub use error::ApiError;

/// Build a fully-materialised API router over `tracker`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(tracker: Tracker<S>) -> Router<()>
where
  S: HabitStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/habits", post(habits::create::<S>))
    .route("/habits/{id}/toggle", patch(habits::toggle::<S>))
    .route("/day", get(day::view::<S>))
    .route("/summary", get(summary::handler::<S>))
    .with_state(tracker)
}

// ─── Integration tests ────────────────────────────────────────────────────────
