use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database model for refresh tokens. Rows are only ever revoked, never
/// deleted, so the table doubles as a session audit trail.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct RefreshTokenRow {
    pub id: i64,
    pub user_id: i64,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
    pub created_at: DateTime<Utc>,
}

impl RefreshTokenRow {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_refresh_token_row_expiry() {
        let now = Utc::now();

        let row = RefreshTokenRow {
            id: 1,
            user_id: 7,
            token_hash: "abc123hash".to_string(),
            expires_at: now + Duration::days(7),
            revoked: false,
            created_at: now,
        };

        assert!(!row.is_expired(now));
        assert!(row.is_expired(now + Duration::days(8)));
    }
}
