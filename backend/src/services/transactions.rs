use chrono::Utc;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::models::TransactionRow;
use shared::{CreateTransactionRequest, Transaction, TransactionType};

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("User not found")]
    UserNotFound,
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Signed effect of a transaction on the owning user's balance.
fn balance_delta(transaction_type: TransactionType, amount: f64) -> f64 {
    match transaction_type {
        TransactionType::Deposit | TransactionType::Winnings => amount,
        TransactionType::Withdrawal | TransactionType::TicketPurchase => -amount,
    }
}

pub async fn create_transaction(
    pool: &SqlitePool,
    request: &CreateTransactionRequest,
) -> Result<Transaction, TransactionError> {
    let now = Utc::now();

    let updated = sqlx::query("UPDATE users SET balance = balance + ?, updated_at = ? WHERE id = ?")
        .bind(balance_delta(request.transaction_type, request.amount))
        .bind(now)
        .bind(request.user_id)
        .execute(pool)
        .await?;

    if updated.rows_affected() == 0 {
        return Err(TransactionError::UserNotFound);
    }

    let result = sqlx::query(
        r#"
        INSERT INTO transactions (amount, transaction_type, user_id, ticket_id, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(request.amount)
    .bind(request.transaction_type.as_str())
    .bind(request.user_id)
    .bind(request.ticket_id)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Transaction {
        id: result.last_insert_rowid(),
        amount: request.amount,
        transaction_type: request.transaction_type,
        user_id: request.user_id,
        ticket_id: request.ticket_id,
        created_at: now,
    })
}

pub async fn list_for_user(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<Transaction>, TransactionError> {
    let rows: Vec<TransactionRow> =
        sqlx::query_as("SELECT * FROM transactions WHERE user_id = ? ORDER BY created_at DESC")
            .bind(user_id)
            .fetch_all(pool)
            .await?;

    Ok(rows.iter().map(|t| t.to_shared()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT,
                role TEXT NOT NULL DEFAULT 'user',
                balance REAL NOT NULL DEFAULT 0,
                created_at DATETIME NOT NULL,
                updated_at DATETIME NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL,
                transaction_type TEXT NOT NULL,
                user_id INTEGER NOT NULL,
                ticket_id INTEGER,
                created_at DATETIME NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        pool
    }

    async fn seed_user(pool: &SqlitePool) -> i64 {
        crate::services::users::create_user(pool, "A", "a@x.com", Some("hash"), shared::Role::User)
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_deposit_and_purchase_move_balance() {
        let pool = setup_test_db().await;
        let user_id = seed_user(&pool).await;

        create_transaction(
            &pool,
            &CreateTransactionRequest {
                amount: 50.0,
                transaction_type: TransactionType::Deposit,
                user_id,
                ticket_id: None,
            },
        )
        .await
        .unwrap();

        create_transaction(
            &pool,
            &CreateTransactionRequest {
                amount: 10.0,
                transaction_type: TransactionType::TicketPurchase,
                user_id,
                ticket_id: Some(1),
            },
        )
        .await
        .unwrap();

        let balance: f64 = sqlx::query_scalar("SELECT balance FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(balance, 40.0);

        let history = list_for_user(&pool, user_id).await.unwrap();
        assert_eq!(history.len(), 2);
    }

    #[tokio::test]
    async fn test_transaction_for_missing_user_fails() {
        let pool = setup_test_db().await;

        let err = create_transaction(
            &pool,
            &CreateTransactionRequest {
                amount: 5.0,
                transaction_type: TransactionType::Deposit,
                user_id: 999,
                ticket_id: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, TransactionError::UserNotFound));
    }
}
