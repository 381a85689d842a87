//! Role grants

use axum::{extract::State, Json};
use validator::Validate;

use crate::middleware::auth::CallerContext;
use crate::models::{RoleRequest, RoleResponse};
use crate::{AppResult, AppState};

use super::parse_address;

pub async fn grant(
    State(state): State<AppState>,
    caller: CallerContext,
    Json(req): Json<RoleRequest>,
) -> AppResult<Json<RoleResponse>> {
    req.validate()?;
    let address = parse_address(&req.address)?;
    let (changed, roles) = state.guard.write(|g| {
        let changed = g.grant_role(caller.address, address, req.role)?;
        Ok::<_, guard_core::GuardError>((changed, g.roles_of(&address)))
    })?;
    Ok(Json(RoleResponse { address, role: req.role, changed, roles }))
}

pub async fn revoke(
    State(state): State<AppState>,
    caller: CallerContext,
    Json(req): Json<RoleRequest>,
) -> AppResult<Json<RoleResponse>> {
    req.validate()?;
    let address = parse_address(&req.address)?;
    let (changed, roles) = state.guard.write(|g| {
        let changed = g.revoke_role(caller.address, address, req.role)?;
        Ok::<_, guard_core::GuardError>((changed, g.roles_of(&address)))
    })?;
    Ok(Json(RoleResponse { address, role: req.role, changed, roles }))
}
