use sqlx::SqlitePool;

use crate::config::Config;

pub mod group;
pub mod oauth_account;
pub mod refresh_token;
pub mod ticket;
pub mod transaction;
pub mod user;

pub use group::*;
pub use oauth_account::*;
pub use refresh_token::*;
pub use ticket::*;
pub use transaction::*;
pub use user::*;

/// Application state shared across all handlers
pub struct AppState {
    pub db: SqlitePool,
    pub config: Config,
}
