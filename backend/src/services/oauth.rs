use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::{OAuthAccountRow, UserRow};
use crate::services::auth::AuthError;
use crate::services::{is_unique_violation, users};
use shared::{OAuthCallbackRequest, Role};

pub async fn find_account(
    pool: &SqlitePool,
    provider: &str,
    provider_id: &str,
) -> Result<Option<OAuthAccountRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM oauth_accounts WHERE provider = ? AND provider_id = ?")
        .bind(provider)
        .bind(provider_id)
        .fetch_optional(pool)
        .await
}

/// Resolve a provider assertion to a local user:
/// 1. an existing (provider, provider_id) link wins outright;
/// 2. else an existing user with the same email is reused, so a password
///    account and a provider login for one address stay one identity;
/// 3. else a fresh user is created without a password hash.
/// The link row is then inserted; under a concurrent duplicate callback the
/// unique constraint on (provider, provider_id) picks the winner and the
/// loser re-reads and returns the winner's account.
pub async fn link_or_create(
    pool: &SqlitePool,
    request: &OAuthCallbackRequest,
) -> Result<UserRow, AuthError> {
    if let Some(account) = find_account(pool, &request.provider, &request.provider_id).await? {
        return users::find_by_id(pool, account.user_id)
            .await?
            .ok_or(AuthError::UserNotFound);
    }

    let user = match users::find_by_email(pool, &request.email).await? {
        Some(user) => user,
        None => {
            match users::create_user(pool, &request.display_name, &request.email, None, Role::User)
                .await
            {
                Ok(user) => user,
                // A concurrent callback created the user first; reuse it
                Err(e) if is_unique_violation(&e) => users::find_by_email(pool, &request.email)
                    .await?
                    .ok_or(AuthError::UserNotFound)?,
                Err(e) => return Err(e.into()),
            }
        }
    };

    let payload = request
        .provider_data
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "{}".to_string());

    let inserted = sqlx::query(
        r#"
        INSERT INTO oauth_accounts (provider, provider_id, user_id, provider_data, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&request.provider)
    .bind(&request.provider_id)
    .bind(user.id)
    .bind(payload)
    .bind(Utc::now())
    .execute(pool)
    .await;

    match inserted {
        Ok(_) => Ok(user),
        Err(e) if is_unique_violation(&e) => {
            let account = find_account(pool, &request.provider, &request.provider_id)
                .await?
                .ok_or(AuthError::UserNotFound)?;
            users::find_by_id(pool, account.user_id)
                .await?
                .ok_or(AuthError::UserNotFound)
        }
        Err(e) => Err(e.into()),
    }
}
