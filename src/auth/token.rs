use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};

/// Reset/activation tokens and email codes share a fixed 10 minute window.
pub const TOKEN_TTL_MINUTES: i64 = 10;

/// An opaque single-use token. The plaintext goes to the user (by email)
/// exactly once; only the hash and expiry are persisted.
pub struct IssuedToken {
    pub plaintext: String,
    pub hash: String,
    pub expires_at: DateTime<Utc>,
}

/// Generate a random opaque token plus the hash to store.
pub fn issue() -> IssuedToken {
    let bytes: [u8; 20] = rand::random();
    let plaintext = hex::encode(bytes);
    let hash = hash(&plaintext);
    IssuedToken {
        plaintext,
        hash,
        expires_at: Utc::now() + Duration::minutes(TOKEN_TTL_MINUTES),
    }
}

/// SHA-256 hex digest. Lookup of a client-supplied token re-hashes it and
/// matches against the stored column.
pub fn hash(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Six digit verification code sent to a user's email address.
pub fn email_code() -> String {
    let n: u32 = rand::random_range(0..1_000_000);
    format!("{n:06}")
}
