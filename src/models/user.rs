use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub username: Option<String>,
    pub role_ids: Vec<Uuid>,
    pub is_super: bool,
    pub is_admin: bool,
    pub is_user: bool,
    pub is_active: bool,
    pub is_activated: bool,
    pub is_locked: bool,
    pub login_limit: i32,
    #[serde(skip_serializing)]
    pub activation_token_hash: Option<String>,
    #[serde(skip_serializing)]
    pub activation_expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub reset_token_hash: Option<String>,
    #[serde(skip_serializing)]
    pub reset_expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub email_code: Option<String>,
    #[serde(skip_serializing)]
    pub email_code_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
