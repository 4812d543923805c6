use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::Role;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateRoleRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

pub async fn list_roles(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Role>>, AppError> {
    auth.require_roles(&state, &["superadmin", "admin"]).await?;
    let roles = db::roles::list_all(&state.pool).await?;
    Ok(Json(roles))
}

pub async fn create_role(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<CreateRoleRequest>,
) -> Result<Json<Role>, AppError> {
    auth.require_superadmin(&state).await?;

    if req.name.is_empty() {
        return Err(AppError::BadRequest("role name is required".to_string()));
    }

    let role = db::roles::create(&state.pool, &req.name, &req.description)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("a role with this name already exists".to_string())
            }
            _ => AppError::Database(e),
        })?;

    Ok(Json(role))
}
