use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// User Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub balance: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn can_manage_users(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Assertion produced by an already-verified provider callback: the provider
/// id pair plus the profile fields the backend links into a local account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthCallbackRequest {
    pub provider: String,
    pub provider_id: String,
    pub email: String,
    pub display_name: String,
    pub provider_data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub tokens: TokenPair,
    pub user: User,
}

// ============================================================================
// Group Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMember {
    pub id: i64,
    pub group_id: i64,
    pub user_id: i64,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddGroupMemberRequest {
    pub user_id: i64,
}

// ============================================================================
// Ticket Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    pub ticket_number: String,
    pub cost: f64,
    pub lottery: String,
    pub user_id: Option<i64>,
    pub group_id: Option<i64>,
    pub winning_amount: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTicketRequest {
    pub ticket_number: String,
    pub cost: f64,
    pub lottery: String,
    pub user_id: Option<i64>,
    pub group_id: Option<i64>,
    pub winning_amount: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketContribution {
    pub id: i64,
    pub ticket_id: i64,
    pub user_id: i64,
    pub amount_contributed: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTicketContributionRequest {
    pub user_id: i64,
    pub amount_contributed: f64,
}

// ============================================================================
// Transaction Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    TicketPurchase,
    Winnings,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "deposit",
            TransactionType::Withdrawal => "withdrawal",
            TransactionType::TicketPurchase => "ticket_purchase",
            TransactionType::Winnings => "winnings",
        }
    }
}

impl FromStr for TransactionType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "deposit" => Ok(TransactionType::Deposit),
            "withdrawal" => Ok(TransactionType::Withdrawal),
            "ticket_purchase" => Ok(TransactionType::TicketPurchase),
            "winnings" => Ok(TransactionType::Winnings),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub user_id: i64,
    pub ticket_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub user_id: i64,
    pub ticket_id: Option<i64>,
}

// ============================================================================
// API Response Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSuccess<T> {
    pub data: T,
}

impl<T> ApiSuccess<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_str() {
        assert_eq!("user".parse(), Ok(Role::User));
        assert_eq!("ADMIN".parse(), Ok(Role::Admin));
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_permissions() {
        assert!(Role::Admin.can_manage_users());
        assert!(!Role::User.can_manage_users());
    }

    #[test]
    fn test_transaction_type_round_trip() {
        for tt in [
            TransactionType::Deposit,
            TransactionType::Withdrawal,
            TransactionType::TicketPurchase,
            TransactionType::Winnings,
        ] {
            assert_eq!(tt.as_str().parse(), Ok(tt));
        }
        assert!("refund".parse::<TransactionType>().is_err());
    }

    #[test]
    fn test_api_success_wraps_data() {
        let success = ApiSuccess::new("test data");
        assert_eq!(success.data, "test data");
    }

    #[test]
    fn test_oauth_callback_request_deserializes_without_payload() {
        let request: OAuthCallbackRequest = serde_json::from_str(
            r#"{"provider":"google","provider_id":"g-123","email":"a@x.com","display_name":"A"}"#,
        )
        .unwrap();
        assert_eq!(request.provider, "google");
        assert!(request.provider_data.is_none());
    }
}
