use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use crate::auth::roles;
use crate::db;
use crate::error::AppError;
use crate::models::User;
use crate::state::SharedState;

// Missing token, bad token and unknown subject all collapse to this one
// message so a caller cannot probe which check failed.
const UNAUTHORIZED: &str = "user not authorized to access this route";

/// The authenticated user behind a request. Extraction verifies the bearer
/// token and loads the live user record, so `user` reflects current flags
/// and role membership rather than whatever the token was signed with.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
}

impl AuthUser {
    /// Guard a handler behind a set of role names (logical OR).
    pub async fn require_roles(
        &self,
        state: &SharedState,
        names: &[&str],
    ) -> Result<(), AppError> {
        let allowed = roles::authorize(&state.pool, names, &self.user.role_ids).await?;
        if allowed {
            Ok(())
        } else {
            Err(AppError::Unauthorized(UNAUTHORIZED.to_string()))
        }
    }

    pub async fn require_superadmin(&self, state: &SharedState) -> Result<(), AppError> {
        self.require_roles(state, &["superadmin"]).await
    }
}

impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        // Bearer token from the Authorization header, falling back to the
        // `token` cookie.
        let mut token: Option<String> = None;

        if let Some(auth_header) = parts.headers.get("authorization") {
            let auth_str = auth_header
                .to_str()
                .map_err(|_| AppError::Unauthorized(UNAUTHORIZED.to_string()))?;
            if let Some(bearer) = auth_str.strip_prefix("Bearer ") {
                token = Some(bearer.to_string());
            }
        }

        if token.is_none() {
            let jar = CookieJar::from_headers(&parts.headers);
            token = jar.get("token").map(|c| c.value().to_string());
        }

        let token = token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Unauthorized(UNAUTHORIZED.to_string()))?;

        let claims = state
            .jwt
            .verify(&token)
            .map_err(|_| AppError::Unauthorized(UNAUTHORIZED.to_string()))?;

        // Persistence failures surface as 500s; only a genuinely absent
        // user is folded into the generic 401.
        let user = db::users::find_by_id_and_email(&state.pool, claims.sub, &claims.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized(UNAUTHORIZED.to_string()))?;

        Ok(AuthUser { user })
    }
}
