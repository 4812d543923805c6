use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::User;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct AttachRoleRequest {
    pub role: String,
}

pub async fn list_users(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<User>>, AppError> {
    auth.require_roles(&state, &["superadmin", "admin"]).await?;
    let users = db::users::list_all(&state.pool).await?;
    Ok(Json(users))
}

pub async fn get_user(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    auth.require_roles(&state, &["superadmin", "admin"]).await?;

    let user = db::users::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

    Ok(Json(user))
}

/// Attach a named role to a user. Unlike route guards, an unknown role name
/// here is the caller's mistake and fails loudly.
pub async fn attach_role(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AttachRoleRequest>,
) -> Result<Json<User>, AppError> {
    auth.require_superadmin(&state).await?;

    let role = db::roles::find_by_name(&state.pool, &req.role)
        .await?
        .ok_or_else(|| AppError::NotFound("role not found".to_string()))?;

    db::users::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

    db::users::add_role(&state.pool, id, role.id).await?;

    let user = db::users::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

    Ok(Json(user))
}

pub async fn delete_user(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_superadmin(&state).await?;

    db::users::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

    db::users::delete(&state.pool, id).await?;

    Ok(Json(serde_json::json!({ "message": "deleted" })))
}
