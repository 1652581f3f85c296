//! Axum route handlers for browsing the role catalog.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::catalog::RoleDefinition;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleListResponse {
    pub roles: Vec<String>,
    /// Role used when a requested name is not in the catalog.
    pub default_role: String,
}

/// GET /api/v1/roles
pub async fn handle_list_roles(State(state): State<AppState>) -> Json<RoleListResponse> {
    let roles = &state.catalog.roles;
    Json(RoleListResponse {
        roles: roles.role_names().into_iter().map(str::to_string).collect(),
        default_role: roles.default_role.name.clone(),
    })
}

/// GET /api/v1/roles/:name
///
/// Exact, case-sensitive lookup. No fallback here: browsing an unknown role is a 404.
pub async fn handle_get_role(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<RoleDefinition>, AppError> {
    state
        .catalog
        .roles
        .get(&name)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Role '{name}' not found")))
}
