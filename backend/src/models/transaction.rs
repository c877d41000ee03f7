use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use shared::TransactionType;

/// Database model for balance transactions
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TransactionRow {
    pub id: i64,
    pub amount: f64,
    pub transaction_type: String,
    pub user_id: i64,
    pub ticket_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl TransactionRow {
    pub fn to_shared(&self) -> shared::Transaction {
        shared::Transaction {
            id: self.id,
            amount: self.amount,
            transaction_type: self
                .transaction_type
                .parse()
                .unwrap_or(TransactionType::Deposit),
            user_id: self.user_id,
            ticket_id: self.ticket_id,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_row_to_shared() {
        let now = Utc::now();

        let row = TransactionRow {
            id: 3,
            amount: 25.0,
            transaction_type: "ticket_purchase".to_string(),
            user_id: 8,
            ticket_id: Some(11),
            created_at: now,
        };

        let shared = row.to_shared();

        assert_eq!(shared.transaction_type, TransactionType::TicketPurchase);
        assert_eq!(shared.ticket_id, Some(11));
    }
}
