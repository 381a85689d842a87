//! Health check handler

use axum::{extract::State, Json};
use guard_core::{GatePolicy, CountingMode};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    core_version: &'static str,
    timestamp: i64,
    gate_policy: GatePolicy,
    counting_mode: CountingMode,
    last_event: u64,
    journal_write_failures: u64,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (gate_policy, counting_mode, last_event, journal_write_failures) = state.guard.read(|g| {
        (
            g.gate_policy(),
            g.config().counting_mode,
            g.last_event_sequence(),
            g.journal_write_failures(),
        )
    });

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        core_version: guard_core::constants::CORE_VERSION,
        timestamp: chrono::Utc::now().timestamp(),
        gate_policy,
        counting_mode,
        last_event,
        journal_write_failures,
    })
}
