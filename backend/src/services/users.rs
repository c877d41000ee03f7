use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::UserRow;
use shared::Role;

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &SqlitePool, user_id: i64) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Insert a user row. `password_hash` is None for accounts created through a
/// provider callback; such accounts cannot log in with a password.
pub async fn create_user(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    password_hash: Option<&str>,
    role: Role,
) -> Result<UserRow, sqlx::Error> {
    let now = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO users (name, email, password_hash, role, balance, created_at, updated_at)
        VALUES (?, ?, ?, ?, 0, ?, ?)
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(role.as_str())
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(UserRow {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        email: email.to_string(),
        password_hash: password_hash.map(String::from),
        role: role.as_str().to_string(),
        balance: 0.0,
        created_at: now,
        updated_at: now,
    })
}
