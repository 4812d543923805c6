use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::User;

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    email: &str,
    password_hash: &str,
    first_name: &str,
    last_name: &str,
    role_ids: &[Uuid],
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (email, password_hash, first_name, last_name, role_ids)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(email)
    .bind(password_hash)
    .bind(first_name)
    .bind(last_name)
    .bind(role_ids)
    .fetch_one(executor)
    .await
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Lookup used during token verification: both the subject id and the email
/// claim must match the stored record.
pub async fn find_by_id_and_email(
    pool: &PgPool,
    id: Uuid,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 AND email = $2")
        .bind(id)
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn update_password(
    pool: &PgPool,
    id: Uuid,
    password_hash: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;
    Ok(())
}

/// Store a new reset-token hash, overwriting (and thereby invalidating) any
/// previously issued token.
pub async fn set_reset_token(
    pool: &PgPool,
    id: Uuid,
    token_hash: &str,
    expires_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET reset_token_hash = $2, reset_expires_at = $3 WHERE id = $1")
        .bind(id)
        .bind(token_hash)
        .bind(expires_at)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn find_by_reset_hash(
    pool: &PgPool,
    token_hash: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT * FROM users WHERE reset_token_hash = $1 AND reset_expires_at > now()",
    )
    .bind(token_hash)
    .fetch_optional(pool)
    .await
}

pub async fn clear_reset_token(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET reset_token_hash = NULL, reset_expires_at = NULL WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn set_activation_token(
    pool: &PgPool,
    id: Uuid,
    token_hash: &str,
    expires_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE users SET activation_token_hash = $2, activation_expires_at = $3 WHERE id = $1",
    )
    .bind(id)
    .bind(token_hash)
    .bind(expires_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find_by_activation_hash(
    pool: &PgPool,
    token_hash: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT * FROM users WHERE activation_token_hash = $1 AND activation_expires_at > now()",
    )
    .bind(token_hash)
    .fetch_optional(pool)
    .await
}

/// Consume an activation token: flip the account live and drop the token.
pub async fn mark_activated(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE users SET is_activated = true, is_active = true,
         activation_token_hash = NULL, activation_expires_at = NULL WHERE id = $1",
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn set_email_code(
    pool: &PgPool,
    id: Uuid,
    code: &str,
    expires_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET email_code = $2, email_code_expires_at = $3 WHERE id = $1")
        .bind(id)
        .bind(code)
        .bind(expires_at)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn clear_email_code(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET email_code = NULL, email_code_expires_at = NULL WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Record a failed login: bump the counter and, past the threshold, flip the
/// locked flag in the same write.
pub async fn record_login_failure(
    pool: &PgPool,
    id: Uuid,
    login_limit: i32,
    is_locked: bool,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET login_limit = $2, is_locked = $3 WHERE id = $1")
        .bind(id)
        .bind(login_limit)
        .bind(is_locked)
        .execute(pool)
        .await?;
    Ok(())
}

/// Successful login or password reset: counter back to zero, lock cleared.
pub async fn reset_login_limit(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET login_limit = 0, is_locked = false WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Unlock every locked account. Returns how many were unlocked.
pub async fn unlock_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE users SET is_locked = false, login_limit = 0 WHERE is_locked = true",
    )
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// Attach a role id to the user's set if not already present.
pub async fn add_role(pool: &PgPool, id: Uuid, role_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE users SET role_ids = array_append(role_ids, $2)
         WHERE id = $1 AND NOT (role_ids @> ARRAY[$2])",
    )
    .bind(id)
    .bind(role_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
