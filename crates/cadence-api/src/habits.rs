//! Handlers for `/habits` endpoints.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `POST`  | `/habits` | Body: `{"title","weekDays":[0..6]}`; 200 empty |
//! | `PATCH` | `/habits/:id/toggle` | Flips today's completion for the habit |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
};
use cadence_core::{habit::NewHabit, service::Tracker, store::HabitStore};
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /habits` — body: `{"title":"Exercise","weekDays":[1,3,5]}`
///
/// The body is re-parsed from a raw JSON value so every shape violation
/// surfaces as a 400, matching the endpoint contract.
pub async fn create<S>(
  State(tracker): State<Tracker<S>>,
  Json(body): Json<serde_json::Value>,
) -> Result<StatusCode, ApiError>
where
  S: HabitStore,
{
  let input: NewHabit = serde_json::from_value(body)
    .map_err(|e| ApiError::BadRequest(format!("invalid habit body: {e}")))?;

  tracker.create_habit(input).await?;
  Ok(StatusCode::OK)
}

// ─── Toggle ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
  pub completed: bool,
}

/// `PATCH /habits/:id/toggle` — flips the habit's completion mark for today.
///
/// 404 if the habit does not exist; a completion mark never references an
/// unknown habit.
pub async fn toggle<S>(
  State(tracker): State<Tracker<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<ToggleResponse>, ApiError>
where
  S: HabitStore,
{
  let completed = tracker.toggle_habit(id).await?;
  Ok(Json(ToggleResponse { completed }))
}
