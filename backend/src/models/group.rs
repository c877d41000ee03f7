use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database model for lottery pool groups
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct GroupRow {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl GroupRow {
    pub fn to_shared(&self) -> shared::Group {
        shared::Group {
            id: self.id,
            name: self.name.clone(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct GroupMemberRow {
    pub id: i64,
    pub group_id: i64,
    pub user_id: i64,
    pub joined_at: DateTime<Utc>,
}

impl GroupMemberRow {
    pub fn to_shared(&self) -> shared::GroupMember {
        shared::GroupMember {
            id: self.id,
            group_id: self.group_id,
            user_id: self.user_id,
            joined_at: self.joined_at,
        }
    }
}
