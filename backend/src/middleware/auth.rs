use actix_web::HttpRequest;

use crate::config::Config;
use crate::services::tokens::{self, TokenKind};

/// The raw bearer credential from the Authorization header, if present.
pub fn bearer_token(req: &HttpRequest) -> Option<&str> {
    let auth_str = req.headers().get("Authorization")?.to_str().ok()?;
    auth_str.strip_prefix("Bearer ")
}

/// Extract the authenticated user ID from the Authorization header
pub fn extract_user_id(req: &HttpRequest, config: &Config) -> Result<i64, AuthMiddlewareError> {
    let token = bearer_token(req).ok_or(AuthMiddlewareError::MissingToken)?;

    tokens::verify_token(config, TokenKind::Access, token)
        .map(|claims| claims.sub)
        .map_err(|_| AuthMiddlewareError::InvalidToken)
}

#[derive(Debug)]
pub enum AuthMiddlewareError {
    MissingToken,
    InvalidToken,
}

impl std::fmt::Display for AuthMiddlewareError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthMiddlewareError::MissingToken => write!(f, "Missing authorization token"),
            AuthMiddlewareError::InvalidToken => write!(f, "Invalid authorization token"),
        }
    }
}

impl std::error::Error for AuthMiddlewareError {}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn test_config() -> Config {
        Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            database_url: "sqlite::memory:".to_string(),
            jwt_access_secret: "access-test-secret".to_string(),
            jwt_refresh_secret: "refresh-test-secret".to_string(),
            access_token_ttl_minutes: 15,
            refresh_token_ttl_days: 7,
            frontend_url: "http://localhost:4200".to_string(),
        }
    }

    #[test]
    fn test_auth_error_display() {
        assert_eq!(
            AuthMiddlewareError::MissingToken.to_string(),
            "Missing authorization token"
        );
        assert_eq!(
            AuthMiddlewareError::InvalidToken.to_string(),
            "Invalid authorization token"
        );
    }

    #[actix_web::test]
    async fn test_extract_user_id_round_trip() {
        let config = test_config();
        let token = tokens::create_token(&config, TokenKind::Access, 42, "a@x.com").unwrap();

        let req = TestRequest::default()
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_http_request();

        assert_eq!(extract_user_id(&req, &config).unwrap(), 42);
    }

    #[actix_web::test]
    async fn test_extract_user_id_rejects_refresh_token() {
        let config = test_config();
        let token = tokens::create_token(&config, TokenKind::Refresh, 42, "a@x.com").unwrap();

        let req = TestRequest::default()
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_http_request();

        assert!(extract_user_id(&req, &config).is_err());
    }

    #[actix_web::test]
    async fn test_extract_user_id_requires_bearer_scheme() {
        let config = test_config();

        let req = TestRequest::default()
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_http_request();

        assert!(matches!(
            extract_user_id(&req, &config),
            Err(AuthMiddlewareError::MissingToken)
        ));
    }
}
