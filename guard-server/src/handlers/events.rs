//! Event history

use axum::{extract::{Query, State}, Json};
use guard_core::GuardEvent;

use crate::models::EventsQuery;
use crate::AppState;

const DEFAULT_LIMIT: usize = 50;
const MAX_LIMIT: usize = 500;

/// Newest first
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Json<Vec<GuardEvent>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    Json(state.guard.read(|g| g.events(limit)))
}
