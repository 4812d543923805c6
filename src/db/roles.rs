use sqlx::PgPool;

use crate::models::Role;

pub async fn create(pool: &PgPool, name: &str, description: &str) -> Result<Role, sqlx::Error> {
    sqlx::query_as::<_, Role>(
        "INSERT INTO roles (name, description) VALUES ($1, $2) RETURNING *",
    )
    .bind(name)
    .bind(description)
    .fetch_one(pool)
    .await
}

pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Role>, sqlx::Error> {
    sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await
}

/// Resolve a set of role names in one query. Names with no stored role are
/// simply absent from the result.
pub async fn find_by_names(pool: &PgPool, names: &[&str]) -> Result<Vec<Role>, sqlx::Error> {
    let names: Vec<String> = names.iter().map(|s| s.to_string()).collect();
    sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE name = ANY($1)")
        .bind(&names)
        .fetch_all(pool)
        .await
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<Role>, sqlx::Error> {
    sqlx::query_as::<_, Role>("SELECT * FROM roles ORDER BY name")
        .fetch_all(pool)
        .await
}
