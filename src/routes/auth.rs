use std::sync::LazyLock;

use axum::Json;
use axum::extract::State;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::Utc;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::auth::extractor::AuthUser;
use crate::auth::{lockout, password, token};
use crate::db;
use crate::error::AppError;
use crate::models::User;
use crate::state::SharedState;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\w+([\.-]?\w+)*@\w+([\.-]?\w+)*(\.\w{2,3})+$").expect("email regex")
});

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ActivateRequest {
    pub token: String,
}

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Deserialize)]
pub struct VerifyEmailCodeRequest {
    pub code: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn auth_cookie(token_value: &str, expiry_minutes: i64) -> CookieJar {
    let cookie = Cookie::build(("token", token_value.to_string()))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::minutes(expiry_minutes))
        .build();
    CookieJar::new().add(cookie)
}

fn clear_auth_cookie() -> CookieJar {
    let cookie = Cookie::build(("token", ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .build();
    CookieJar::new().add(cookie)
}

fn validate_password(password: &str) -> Result<(), AppError> {
    if password.len() < 8 {
        return Err(AppError::BadRequest(
            "password cannot be less than 8 characters".to_string(),
        ));
    }
    Ok(())
}

pub async fn register(
    State(state): State<SharedState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    if req.email.is_empty() || req.first_name.is_empty() || req.last_name.is_empty() {
        return Err(AppError::BadRequest("all fields are required".to_string()));
    }
    if !EMAIL_RE.is_match(&req.email) {
        return Err(AppError::BadRequest("a valid email is required".to_string()));
    }
    validate_password(&req.password)?;

    let pw_hash = password::hash(&req.password).map_err(AppError::Internal)?;

    // Default role membership. A missing default role is a deployment
    // problem, not the caller's; the account is still created.
    let role_ids = match db::roles::find_by_name(&state.pool, "user").await? {
        Some(role) => vec![role.id],
        None => {
            tracing::warn!("Default 'user' role is missing; registering without roles");
            vec![]
        }
    };

    let user = db::users::create(
        &state.pool,
        &req.email,
        &pw_hash,
        &req.first_name,
        &req.last_name,
        &role_ids,
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("email already exist".to_string())
        }
        _ => AppError::Database(e),
    })?;

    let activation = token::issue();
    db::users::set_activation_token(&state.pool, user.id, &activation.hash, activation.expires_at)
        .await?;

    deliver_activation(&state, &user, &activation.plaintext).await;

    Ok(Json(MessageResponse {
        message: "account created, check your email to activate it".to_string(),
    }))
}

async fn deliver_activation(state: &SharedState, user: &User, plaintext: &str) {
    if let Some(ref mailer) = state.mailer {
        let url = format!("{}/auth/activate?token={plaintext}", state.config.base_url);
        if let Err(e) = mailer.send_activation(&user.email, &user.first_name, &url).await {
            tracing::error!("Failed to send activation email: {e}");
        }
    } else {
        tracing::warn!("System SMTP not configured. Activation token: {plaintext}");
    }
}

pub async fn activate(
    State(state): State<SharedState>,
    Json(req): Json<ActivateRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let token_hash = token::hash(&req.token);

    let user = db::users::find_by_activation_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::BadRequest("invalid or expired activation token".to_string())
        })?;

    db::users::mark_activated(&state.pool, user.id).await?;

    Ok(Json(MessageResponse {
        message: "account activated".to_string(),
    }))
}

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let user = db::users::find_by_email(&state.pool, &req.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("invalid credentials".to_string()))?;

    if lockout::check_locked_status(&user) {
        return Err(AppError::Forbidden(
            "account is locked, try again later".to_string(),
        ));
    }

    if !user.is_activated {
        return Err(AppError::Forbidden("account is not activated".to_string()));
    }

    let valid = password::verify(&req.password, &user.password_hash).map_err(AppError::Internal)?;

    if !valid {
        let attempts = lockout::increase_login_limit(user.login_limit);
        let locked = lockout::locks_account(attempts);
        db::users::record_login_failure(&state.pool, user.id, attempts, locked).await?;
        if locked {
            tracing::warn!("Account {} locked after {attempts} failed logins", user.id);
        }
        return Err(AppError::Unauthorized("invalid credentials".to_string()));
    }

    if user.login_limit > 0 || user.is_locked {
        db::users::reset_login_limit(&state.pool, user.id).await?;
    }

    let token = state.jwt.issue(&user).map_err(AppError::Internal)?;

    let jar = auth_cookie(&token, state.config.jwt_expiry_minutes);
    Ok((jar, Json(AuthResponse { token })))
}

pub async fn logout(
    _auth: AuthUser,
) -> Result<(CookieJar, Json<MessageResponse>), AppError> {
    Ok((
        clear_auth_cookie(),
        Json(MessageResponse {
            message: "logged out successfully".to_string(),
        }),
    ))
}

pub async fn forgot_password(
    State(state): State<SharedState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    // Always 200 so callers can't probe which emails are registered
    let response = Json(MessageResponse {
        message: "if that email is registered, a reset link has been sent".to_string(),
    });

    let pool = state.pool.clone();
    let mailer = state.mailer.clone();
    let base_url = state.config.base_url.clone();

    tokio::spawn(async move {
        if let Ok(Some(user)) = db::users::find_by_email(&pool, &req.email).await {
            let reset = token::issue();

            if db::users::set_reset_token(&pool, user.id, &reset.hash, reset.expires_at)
                .await
                .is_ok()
            {
                if let Some(mailer) = mailer {
                    let reset_url =
                        format!("{base_url}/auth/reset-password?token={}", reset.plaintext);
                    if let Err(e) = mailer.send_password_reset(&user.email, &reset_url).await {
                        tracing::error!("Failed to send password reset email: {e}");
                    }
                } else {
                    tracing::warn!(
                        "System SMTP not configured. Password reset token: {}",
                        reset.plaintext
                    );
                }
            }
        }
    });

    Ok(response)
}

pub async fn reset_password(
    State(state): State<SharedState>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    validate_password(&req.password)?;

    let token_hash = token::hash(&req.token);

    let user = db::users::find_by_reset_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| AppError::BadRequest("invalid or expired reset token".to_string()))?;

    let pw_hash = password::hash(&req.password).map_err(AppError::Internal)?;
    db::users::update_password(&state.pool, user.id, &pw_hash).await?;
    db::users::clear_reset_token(&state.pool, user.id).await?;

    // Proving mailbox control also clears any lockout
    db::users::reset_login_limit(&state.pool, user.id).await?;

    Ok(Json(MessageResponse {
        message: "password reset successfully".to_string(),
    }))
}

pub async fn change_password(
    State(state): State<SharedState>,
    auth: AuthUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    validate_password(&req.new_password)?;

    let valid = password::verify(&req.current_password, &auth.user.password_hash)
        .map_err(AppError::Internal)?;

    if !valid {
        return Err(AppError::Unauthorized(
            "current password is incorrect".to_string(),
        ));
    }

    let pw_hash = password::hash(&req.new_password).map_err(AppError::Internal)?;
    db::users::update_password(&state.pool, auth.user.id, &pw_hash).await?;

    Ok(Json(MessageResponse {
        message: "password changed successfully".to_string(),
    }))
}

pub async fn send_email_code(
    State(state): State<SharedState>,
    auth: AuthUser,
) -> Result<Json<MessageResponse>, AppError> {
    let code = token::email_code();
    let expires_at = Utc::now() + chrono::Duration::minutes(token::TOKEN_TTL_MINUTES);

    db::users::set_email_code(&state.pool, auth.user.id, &code, expires_at).await?;

    if let Some(ref mailer) = state.mailer {
        if let Err(e) = mailer.send_email_code(&auth.user.email, &code).await {
            tracing::error!("Failed to send email code: {e}");
        }
    } else {
        tracing::warn!("System SMTP not configured. Email code: {code}");
    }

    Ok(Json(MessageResponse {
        message: "verification code sent".to_string(),
    }))
}

pub async fn verify_email_code(
    State(state): State<SharedState>,
    auth: AuthUser,
    Json(req): Json<VerifyEmailCodeRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let matches = match (&auth.user.email_code, auth.user.email_code_expires_at) {
        (Some(code), Some(expires_at)) => *code == req.code && expires_at > Utc::now(),
        _ => false,
    };

    if !matches {
        return Err(AppError::BadRequest(
            "invalid or expired verification code".to_string(),
        ));
    }

    db::users::clear_email_code(&state.pool, auth.user.id).await?;

    Ok(Json(MessageResponse {
        message: "email verified".to_string(),
    }))
}

pub async fn me(auth: AuthUser) -> Json<User> {
    Json(auth.user)
}
