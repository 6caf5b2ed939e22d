use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Config;

const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 86400;

/// The administrator a token was issued to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetails {
    pub id: i64,
    pub username: String,
}

/// JWT claims structure containing user information and token metadata.
///
/// The `sub` (subject) field contains the user ID, while `exp` (expiration)
/// and `iat` (issued at) provide standard JWT timing claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - the user ID
    pub sub: String,
    pub username: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// The user the token belongs to, or `None` if the subject is not a user id.
    #[must_use]
    pub fn user(&self) -> Option<UserDetails> {
        Some(UserDetails {
            id: self.sub.parse().ok()?,
            username: self.username.clone(),
        })
    }
}

/// Generate a JWT token for the specified user.
///
/// The token is signed with HS256 using the secret from the configuration and
/// expires after `jwt.expiration_days`.
///
/// # Errors
/// Returns `jsonwebtoken::errors::Error` if token encoding fails
pub fn generate_token(
    config: &Config,
    user: &UserDetails,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp();
    let expiration_days = i64::try_from(config.jwt.expiration_days).unwrap_or(i64::MAX);

    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        exp: now.saturating_add(expiration_days.saturating_mul(SECONDS_PER_DAY)),
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt.secret.as_bytes()),
    )
}

/// Verify and decode a JWT token.
///
/// # Errors
/// Returns `jsonwebtoken::errors::Error` if token is invalid, expired, or malformed
pub fn verify_token(config: &Config, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt.secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Issues a fresh token when `claims` expire within `jwt.renew_within_hours`.
///
/// Returns `None` while the current token still has enough time left.
///
/// # Errors
/// Returns `jsonwebtoken::errors::Error` if the subject is not a user id or
/// encoding fails
pub fn renew_token(
    config: &Config,
    claims: &Claims,
) -> Result<Option<String>, jsonwebtoken::errors::Error> {
    let renew_within = i64::try_from(config.jwt.renew_within_hours)
        .unwrap_or(i64::MAX)
        .saturating_mul(SECONDS_PER_HOUR);

    if claims.exp.saturating_sub(Utc::now().timestamp()) > renew_within {
        return Ok(None);
    }

    let user = claims
        .user()
        .ok_or(jsonwebtoken::errors::ErrorKind::InvalidSubject)?;

    generate_token(config, &user).map(Some)
}
