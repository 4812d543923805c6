use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::jwt::Jwt;
use crate::config::Config;
use crate::email::SystemMailer;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub jwt: Jwt,
    pub mailer: Option<Arc<SystemMailer>>,
}
