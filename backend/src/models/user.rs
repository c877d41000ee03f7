use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use shared::Role;

/// Database model for users
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub role: String,
    pub balance: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    pub fn to_shared(&self) -> shared::User {
        shared::User {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.parse().unwrap_or(Role::User),
            balance: self.balance,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_row_to_shared() {
        let now = Utc::now();

        let row = UserRow {
            id: 42,
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password_hash: Some("hashed".to_string()),
            role: "admin".to_string(),
            balance: 12.5,
            created_at: now,
            updated_at: now,
        };

        let shared = row.to_shared();

        assert_eq!(shared.id, 42);
        assert_eq!(shared.email, "test@example.com");
        assert_eq!(shared.role, Role::Admin);
        assert_eq!(shared.balance, 12.5);
    }

    #[test]
    fn test_unknown_role_falls_back_to_user() {
        let now = Utc::now();

        let row = UserRow {
            id: 1,
            name: "X".to_string(),
            email: "x@example.com".to_string(),
            password_hash: None,
            role: "superuser".to_string(),
            balance: 0.0,
            created_at: now,
            updated_at: now,
        };

        assert_eq!(row.to_shared().role, Role::User);
    }
}
