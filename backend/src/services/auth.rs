use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use rand_core::OsRng;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::config::Config;
use crate::models::UserRow;
use crate::services::tokens::TokenKind;
use crate::services::{oauth, refresh_tokens, tokens, users};
use shared::{LoginRequest, OAuthCallbackRequest, RegisterRequest, Role, TokenPair, User};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email is already in use")]
    EmailTaken,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Refresh token is invalid")]
    RefreshMismatch,
    #[error("User not found")]
    UserNotFound,
    #[error("Password hashing error")]
    HashingError,
    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AuthError::HashingError)?;

    Ok(hash.to_string())
}

/// Check an email/password pair against the stored hash. Unknown email,
/// missing hash (provider-linked account) and wrong password all collapse
/// into the same error so the caller cannot probe which emails exist.
pub async fn validate_user(
    pool: &SqlitePool,
    email: &str,
    password: &str,
) -> Result<UserRow, AuthError> {
    let user = users::find_by_email(pool, email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let password_hash = user
        .password_hash
        .as_deref()
        .filter(|h| !h.is_empty())
        .ok_or(AuthError::InvalidCredentials)?;

    let parsed_hash =
        PasswordHash::new(password_hash).map_err(|_| AuthError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)?;

    Ok(user)
}

pub async fn register_user(
    pool: &SqlitePool,
    request: &RegisterRequest,
) -> Result<User, AuthError> {
    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = ?")
        .bind(&request.email)
        .fetch_one(pool)
        .await?;

    if existing > 0 {
        return Err(AuthError::EmailTaken);
    }

    let password_hash = hash_password(&request.password)?;

    let user = users::create_user(
        pool,
        &request.name,
        &request.email,
        Some(&password_hash),
        Role::User,
    )
    .await
    .map_err(|e| {
        // Concurrent registration can still slip past the count check;
        // the unique constraint is the arbiter
        if crate::services::is_unique_violation(&e) {
            AuthError::EmailTaken
        } else {
            AuthError::DatabaseError(e)
        }
    })?;

    Ok(user.to_shared())
}

/// Password login: verify credentials, then open a session.
pub async fn login(
    pool: &SqlitePool,
    config: &Config,
    request: &LoginRequest,
) -> Result<(User, TokenPair), AuthError> {
    let user = validate_user(pool, &request.email, &request.password).await?;
    let pair = open_session(pool, config, user.id, &user.email).await?;

    Ok((user.to_shared(), pair))
}

/// Provider login: resolve or create the linked account, then open a session.
pub async fn login_oauth(
    pool: &SqlitePool,
    config: &Config,
    request: &OAuthCallbackRequest,
) -> Result<(User, TokenPair), AuthError> {
    let user = oauth::link_or_create(pool, request).await?;
    let pair = open_session(pool, config, user.id, &user.email).await?;

    Ok((user.to_shared(), pair))
}

/// Redeem a refresh token for a new token pair, revoking the consumed one.
///
/// Each presented token can win at most once: the revocation is a
/// compare-and-set, so of two concurrent calls with the same token exactly
/// one receives a new pair and the other is rejected. Failures collapse to
/// `InvalidCredentials` (bad signature, expired, no active session, lost
/// race) or `RefreshMismatch` (valid signature but not the stored session).
pub async fn refresh_session(
    pool: &SqlitePool,
    config: &Config,
    raw_token: &str,
) -> Result<(User, TokenPair), AuthError> {
    let claims = tokens::verify_token(config, TokenKind::Refresh, raw_token)
        .map_err(|_| AuthError::InvalidCredentials)?;

    let record = refresh_tokens::find_active(pool, claims.sub)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if refresh_tokens::hash_token(raw_token) != record.token_hash {
        return Err(AuthError::RefreshMismatch);
    }

    if record.is_expired(Utc::now()) {
        return Err(AuthError::InvalidCredentials);
    }

    // Rotation: the consumed record must be dead before a replacement exists
    if !refresh_tokens::revoke(pool, record.id).await? {
        return Err(AuthError::InvalidCredentials);
    }

    let user = users::find_by_id(pool, claims.sub)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    let pair = open_session(pool, config, user.id, &user.email).await?;

    Ok((user.to_shared(), pair))
}

/// Revoke every active session for the token's owner. An unresolvable token
/// means there is no session to tear down, which is success, not an error.
pub async fn logout(pool: &SqlitePool, config: &Config, access_token: &str) -> Result<(), AuthError> {
    let user_id = match tokens::verify_token(config, TokenKind::Access, access_token) {
        Ok(claims) => claims.sub,
        Err(_) => return Ok(()),
    };

    refresh_tokens::revoke_all(pool, user_id).await?;

    Ok(())
}

async fn open_session(
    pool: &SqlitePool,
    config: &Config,
    user_id: i64,
    email: &str,
) -> Result<TokenPair, AuthError> {
    let pair = tokens::issue_token_pair(config, user_id, email)?;
    refresh_tokens::save(pool, user_id, &pair.refresh_token, config.refresh_token_ttl_days).await?;

    Ok(pair)
}
