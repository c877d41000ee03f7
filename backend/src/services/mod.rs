pub mod auth;
pub mod groups;
pub mod oauth;
pub mod refresh_tokens;
pub mod tickets;
pub mod tokens;
pub mod transactions;
pub mod users;

/// True when the error is the database rejecting a duplicate key, which the
/// unique-constraint-as-arbiter paths (registration, OAuth linking) turn into
/// their own outcomes instead of a generic persistence failure.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => {
            matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation)
        }
        _ => false,
    }
}
