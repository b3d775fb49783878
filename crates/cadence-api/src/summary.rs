//! Handler for `GET /summary` — per-day completion history.

use axum::{Json, extract::State};
use cadence_core::{day::DaySummary, service::Tracker, store::HabitStore};

use crate::error::ApiError;

/// `GET /summary` — one row per day with toggle history, date ascending.
/// Days nobody ever interacted with are absent, even if habits were
/// applicable on them.
pub async fn handler<S>(
  State(tracker): State<Tracker<S>>,
) -> Result<Json<Vec<DaySummary>>, ApiError>
where
  S: HabitStore,
{
  Ok(Json(tracker.summary().await?))
}
