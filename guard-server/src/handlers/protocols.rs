//! Protocol registry handlers

use axum::{extract::{Path, Query, State}, Json};
use guard_core::{ProtocolEntry, ProtocolKind, RegistryStats};
use validator::Validate;

use crate::middleware::auth::CallerContext;
use crate::models::{
    DeactivateProtocolResponse, ProtocolListQuery, RegisterProtocolRequest,
    RegisterProtocolResponse,
};
use crate::{AppError, AppResult, AppState};

use super::parse_address;

pub async fn register(
    State(state): State<AppState>,
    caller: CallerContext,
    Json(req): Json<RegisterProtocolRequest>,
) -> AppResult<Json<RegisterProtocolResponse>> {
    req.validate()?;
    let address = parse_address(&req.address)?;
    let kind = match req.kind.as_deref() {
        Some(kind) => kind.parse::<ProtocolKind>()?,
        None => ProtocolKind::Other,
    };

    let (protocol, outcome) = state
        .guard
        .write(|g| g.register_protocol(caller.address, address, &req.name, kind))?;
    Ok(Json(RegisterProtocolResponse { protocol, outcome }))
}

pub async fn deactivate(
    State(state): State<AppState>,
    caller: CallerContext,
    Path(address): Path<String>,
) -> AppResult<Json<DeactivateProtocolResponse>> {
    let address = parse_address(&address)?;
    let deactivated = state
        .guard
        .write(|g| g.deactivate_protocol(caller.address, address))?;
    Ok(Json(DeactivateProtocolResponse { address, deactivated }))
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ProtocolListQuery>,
) -> Json<Vec<ProtocolEntry>> {
    let active_only = query.active_only.unwrap_or(false);
    Json(state.guard.read(|g| g.protocols(active_only)))
}

pub async fn stats(State(state): State<AppState>) -> Json<RegistryStats> {
    Json(state.guard.read(|g| g.protocol_stats()))
}

pub async fn get(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> AppResult<Json<ProtocolEntry>> {
    let address = parse_address(&address)?;
    state
        .guard
        .read(|g| g.protocol(&address))
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Protocol not found".to_string()))
}
