use chrono::{Duration, Utc};
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;

use crate::models::RefreshTokenRow;

/// One-way digest of a raw refresh token; only this value is persisted.
pub fn hash_token(raw: &str) -> String {
    format!("{:x}", Sha256::digest(raw.as_bytes()))
}

pub async fn save(
    pool: &SqlitePool,
    user_id: i64,
    raw_token: &str,
    ttl_days: i64,
) -> Result<(), sqlx::Error> {
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO refresh_tokens (user_id, token_hash, expires_at, revoked, created_at)
        VALUES (?, ?, ?, 0, ?)
        "#,
    )
    .bind(user_id)
    .bind(hash_token(raw_token))
    .bind(now + Duration::days(ttl_days))
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}

/// The newest non-revoked record for the user, if any. Insertion order breaks
/// creation-time ties, so the latest issued token always governs.
pub async fn find_active(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Option<RefreshTokenRow>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT * FROM refresh_tokens
        WHERE user_id = ? AND revoked = 0
        ORDER BY created_at DESC, id DESC
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Compare-and-set revocation. Returns true only for the call that actually
/// flipped the flag, so concurrent consumers of one token get exactly one
/// winner. Calling it on an already-revoked record is a harmless no-op.
pub async fn revoke(pool: &SqlitePool, token_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE refresh_tokens SET revoked = 1 WHERE id = ? AND revoked = 0")
        .bind(token_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() == 1)
}

pub async fn revoke_all(pool: &SqlitePool, user_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE refresh_tokens SET revoked = 1 WHERE user_id = ? AND revoked = 0")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(())
}
