use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database model linking a third-party identity to a local user.
/// (provider, provider_id) is unique; a user may have several links.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct OAuthAccountRow {
    pub id: i64,
    pub provider: String,
    pub provider_id: String,
    pub user_id: i64,
    pub provider_data: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oauth_account_row_fields() {
        let now = Utc::now();

        let row = OAuthAccountRow {
            id: 1,
            provider: "google".to_string(),
            provider_id: "g-12345".to_string(),
            user_id: 9,
            provider_data: "{}".to_string(),
            created_at: now,
        };

        assert_eq!(row.provider, "google");
        assert_eq!(row.provider_id, "g-12345");
        assert_eq!(row.user_id, 9);
    }
}
