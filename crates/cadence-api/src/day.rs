//! Handler for `GET /day` — the reconciled view of a single date.

use axum::{
  Json,
  extract::{Query, State},
};
use cadence_core::{
  calendar::DayKey, day::DayView, service::Tracker, store::HabitStore,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct DayParams {
  /// A `YYYY-MM-DD` date or an RFC 3339 datetime; either is normalized to
  /// the UTC day-key.
  pub date: String,
}

/// `GET /day?date=<iso date or datetime>`
pub async fn view<S>(
  State(tracker): State<Tracker<S>>,
  Query(params): Query<DayParams>,
) -> Result<Json<DayView>, ApiError>
where
  S: HabitStore,
{
  let date = parse_date(&params.date)?;
  Ok(Json(tracker.day_view(date).await?))
}

fn parse_date(raw: &str) -> Result<DayKey, ApiError> {
  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return Ok(DayKey::from_datetime(dt.with_timezone(&Utc)));
  }
  raw
    .parse::<DayKey>()
    .map_err(|_| ApiError::BadRequest(format!("cannot parse date: {raw:?}")))
}
