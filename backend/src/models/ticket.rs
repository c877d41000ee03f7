use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database model for lottery tickets
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TicketRow {
    pub id: i64,
    pub ticket_number: String,
    pub cost: f64,
    pub lottery: String,
    pub user_id: Option<i64>,
    pub group_id: Option<i64>,
    pub winning_amount: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl TicketRow {
    pub fn to_shared(&self) -> shared::Ticket {
        shared::Ticket {
            id: self.id,
            ticket_number: self.ticket_number.clone(),
            cost: self.cost,
            lottery: self.lottery.clone(),
            user_id: self.user_id,
            group_id: self.group_id,
            winning_amount: self.winning_amount,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TicketContributionRow {
    pub id: i64,
    pub ticket_id: i64,
    pub user_id: i64,
    pub amount_contributed: f64,
    pub created_at: DateTime<Utc>,
}

impl TicketContributionRow {
    pub fn to_shared(&self) -> shared::TicketContribution {
        shared::TicketContribution {
            id: self.id,
            ticket_id: self.ticket_id,
            user_id: self.user_id,
            amount_contributed: self.amount_contributed,
            created_at: self.created_at,
        }
    }
}
