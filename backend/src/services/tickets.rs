use chrono::Utc;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::models::{TicketContributionRow, TicketRow};
use shared::{CreateTicketContributionRequest, CreateTicketRequest, Ticket, TicketContribution};

#[derive(Debug, Error)]
pub enum TicketError {
    #[error("Ticket not found")]
    NotFound,
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

pub async fn create_ticket(
    pool: &SqlitePool,
    request: &CreateTicketRequest,
) -> Result<Ticket, TicketError> {
    let now = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO tickets (ticket_number, cost, lottery, user_id, group_id, winning_amount, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&request.ticket_number)
    .bind(request.cost)
    .bind(&request.lottery)
    .bind(request.user_id)
    .bind(request.group_id)
    .bind(request.winning_amount)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Ticket {
        id: result.last_insert_rowid(),
        ticket_number: request.ticket_number.clone(),
        cost: request.cost,
        lottery: request.lottery.clone(),
        user_id: request.user_id,
        group_id: request.group_id,
        winning_amount: request.winning_amount,
        created_at: now,
    })
}

pub async fn get_ticket(pool: &SqlitePool, ticket_id: i64) -> Result<Option<Ticket>, TicketError> {
    let ticket: Option<TicketRow> = sqlx::query_as("SELECT * FROM tickets WHERE id = ?")
        .bind(ticket_id)
        .fetch_optional(pool)
        .await?;

    Ok(ticket.map(|t| t.to_shared()))
}

pub async fn add_contribution(
    pool: &SqlitePool,
    ticket_id: i64,
    request: &CreateTicketContributionRequest,
) -> Result<TicketContribution, TicketError> {
    get_ticket(pool, ticket_id).await?.ok_or(TicketError::NotFound)?;

    let now = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO ticket_contributions (ticket_id, user_id, amount_contributed, created_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(ticket_id)
    .bind(request.user_id)
    .bind(request.amount_contributed)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(TicketContribution {
        id: result.last_insert_rowid(),
        ticket_id,
        user_id: request.user_id,
        amount_contributed: request.amount_contributed,
        created_at: now,
    })
}

pub async fn list_contributions(
    pool: &SqlitePool,
    ticket_id: i64,
) -> Result<Vec<TicketContribution>, TicketError> {
    let rows: Vec<TicketContributionRow> =
        sqlx::query_as("SELECT * FROM ticket_contributions WHERE ticket_id = ? ORDER BY created_at")
            .bind(ticket_id)
            .fetch_all(pool)
            .await?;

    Ok(rows.iter().map(|c| c.to_shared()).collect())
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
            CREATE TABLE IF NOT EXISTS tickets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                ticket_number TEXT NOT NULL,
                cost REAL NOT NULL,
                lottery TEXT NOT NULL,
                user_id INTEGER,
                group_id INTEGER,
                winning_amount REAL,
                created_at DATETIME NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS ticket_contributions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                ticket_id INTEGER NOT NULL,
                user_id INTEGER NOT NULL,
                amount_contributed REAL NOT NULL,
                created_at DATETIME NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        pool
    }

    fn ticket_request() -> CreateTicketRequest {
        CreateTicketRequest {
            ticket_number: "A-123456".to_string(),
            cost: 10.0,
            lottery: "powerball".to_string(),
            user_id: Some(1),
            group_id: Some(2),
            winning_amount: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_ticket() {
        let pool = setup_test_db().await;

        let created = create_ticket(&pool, &ticket_request()).await.unwrap();

        let fetched = get_ticket(&pool, created.id).await.unwrap().unwrap();
        assert_eq!(fetched.ticket_number, "A-123456");
        assert_eq!(fetched.group_id, Some(2));
        assert!(fetched.winning_amount.is_none());

        assert!(get_ticket(&pool, created.id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_contributions_require_existing_ticket() {
        let pool = setup_test_db().await;

        let request = CreateTicketContributionRequest {
            user_id: 1,
            amount_contributed: 2.5,
        };

        let err = add_contribution(&pool, 999, &request).await.unwrap_err();
        assert!(matches!(err, TicketError::NotFound));

        let ticket = create_ticket(&pool, &ticket_request()).await.unwrap();
        add_contribution(&pool, ticket.id, &request).await.unwrap();

        let contributions = list_contributions(&pool, ticket.id).await.unwrap();
        assert_eq!(contributions.len(), 1);
        assert_eq!(contributions[0].amount_contributed, 2.5);
    }
}
