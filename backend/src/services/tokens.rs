use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::services::auth::AuthError;
use shared::TokenPair;

/// Which of the two signing keys a token belongs to. Access and refresh
/// tokens are never interchangeable: each kind only verifies against its own
/// secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

fn secret<'a>(config: &'a Config, kind: TokenKind) -> &'a str {
    match kind {
        TokenKind::Access => &config.jwt_access_secret,
        TokenKind::Refresh => &config.jwt_refresh_secret,
    }
}

fn ttl(config: &Config, kind: TokenKind) -> Duration {
    match kind {
        TokenKind::Access => Duration::minutes(config.access_token_ttl_minutes),
        TokenKind::Refresh => Duration::days(config.refresh_token_ttl_days),
    }
}

pub fn sign_token(
    secret: &str,
    user_id: i64,
    email: &str,
    ttl: Duration,
) -> Result<String, AuthError> {
    let now = Utc::now();

    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

pub fn create_token(
    config: &Config,
    kind: TokenKind,
    user_id: i64,
    email: &str,
) -> Result<String, AuthError> {
    sign_token(secret(config, kind), user_id, email, ttl(config, kind))
}

/// Verify signature and expiry. Both failure modes surface as the same
/// error so callers cannot tell a forged token from a stale one.
pub fn verify_token(config: &Config, kind: TokenKind, token: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret(config, kind).as_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

pub fn issue_token_pair(config: &Config, user_id: i64, email: &str) -> Result<TokenPair, AuthError> {
    Ok(TokenPair {
        access_token: create_token(config, TokenKind::Access, user_id, email)?,
        refresh_token: create_token(config, TokenKind::Refresh, user_id, email)?,
    })
}
