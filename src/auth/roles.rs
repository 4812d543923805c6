use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::error::AppError;

/// True iff any authorized role id appears in the user's role-id set.
/// Membership is a logical OR: holding one of the required roles suffices.
pub fn role_ids_intersect(authorized: &[Uuid], user_roles: &[Uuid]) -> bool {
    authorized.iter().any(|id| user_roles.contains(id))
}

/// Resolve role names to ids and test membership against the user's set.
///
/// A required name that resolves to no stored role contributes no matching
/// id and the check leans toward "not authorized". That is almost always a
/// misconfigured guard, so it is logged rather than silently swallowed.
pub async fn authorize(
    pool: &PgPool,
    required: &[&str],
    user_role_ids: &[Uuid],
) -> Result<bool, AppError> {
    let roles = db::roles::find_by_names(pool, required).await?;

    for name in required {
        if !roles.iter().any(|r| r.name == *name) {
            tracing::warn!("Route guard references unknown role '{name}'");
        }
    }

    let authorized: Vec<Uuid> = roles.iter().map(|r| r.id).collect();
    Ok(role_ids_intersect(&authorized, user_role_ids))
}
