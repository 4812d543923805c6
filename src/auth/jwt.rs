use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::User;

/// Current claims layout. Bumped whenever the claim set changes shape;
/// tokens carrying any other version are rejected on decode.
pub const CLAIMS_VERSION: u8 = 1;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub v: u8,
    pub sub: Uuid,
    pub email: String,
    pub roles: Vec<Uuid>,
    pub exp: i64,
}

/// Token issuer/verifier. Holds the signing secret and expiry so handlers
/// never reach into the environment themselves.
pub struct Jwt {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry: Duration,
}

impl Jwt {
    pub fn new(secret: &str, expiry_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry: Duration::minutes(expiry_minutes),
        }
    }

    /// Sign a token carrying the user's identity and role-id set.
    pub fn issue(&self, user: &User) -> Result<String, String> {
        let claims = Claims {
            v: CLAIMS_VERSION,
            sub: user.id,
            email: user.email.clone(),
            roles: user.role_ids.clone(),
            exp: (Utc::now() + self.expiry).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| format!("JWT encode failed: {e}"))
    }

    /// Validate signature, expiry and claims version.
    pub fn verify(&self, token: &str) -> Result<Claims, String> {
        let claims = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| format!("JWT decode failed: {e}"))?;

        if claims.v != CLAIMS_VERSION {
            return Err(format!("Unsupported claims version: {}", claims.v));
        }

        Ok(claims)
    }
}
