pub mod auth;
pub mod roles;
pub mod users;

use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/api/v1", get(index))
        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/activate", post(auth::activate))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/forgot-password", post(auth::forgot_password))
        .route("/api/v1/auth/reset-password", post(auth::reset_password))
        .route("/api/v1/auth/change-password", post(auth::change_password))
        .route("/api/v1/auth/send-email-code", post(auth::send_email_code))
        .route("/api/v1/auth/verify-email-code", post(auth::verify_email_code))
        .route("/api/v1/auth/me", get(auth::me))
        // Users (role-gated)
        .route("/api/v1/users", get(users::list_users))
        .route(
            "/api/v1/users/{id}",
            get(users::get_user).delete(users::delete_user),
        )
        .route("/api/v1/users/{id}/roles", post(users::attach_role))
        // Roles (role-gated)
        .route(
            "/api/v1/roles",
            get(roles::list_roles).post(roles::create_role),
        )
}

async fn index() -> Json<serde_json::Value> {
    Json(json!({
        "error": false,
        "errors": [],
        "message": "successful",
        "data": {
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
        },
        "status": 200,
    }))
}
