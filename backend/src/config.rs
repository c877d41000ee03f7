use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_access_secret: String,
    pub jwt_refresh_secret: String,
    pub access_token_ttl_minutes: i64,
    pub refresh_token_ttl_days: i64,
    pub frontend_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a number"),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:lottery.db?mode=rwc".to_string()),
            jwt_access_secret: env::var("JWT_ACCESS_SECRET")
                .unwrap_or_else(|_| "development-access-secret-change-in-production".to_string()),
            jwt_refresh_secret: env::var("JWT_REFRESH_SECRET")
                .unwrap_or_else(|_| "development-refresh-secret-change-in-production".to_string()),
            access_token_ttl_minutes: env::var("ACCESS_TOKEN_TTL_MINUTES")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .expect("ACCESS_TOKEN_TTL_MINUTES must be a number"),
            refresh_token_ttl_days: env::var("REFRESH_TOKEN_TTL_DAYS")
                .unwrap_or_else(|_| "7".to_string())
                .parse()
                .expect("REFRESH_TOKEN_TTL_DAYS must be a number"),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:4200".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure config tests run serially (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("HOST");
        env::remove_var("PORT");
        env::remove_var("DATABASE_URL");
        env::remove_var("JWT_ACCESS_SECRET");
        env::remove_var("JWT_REFRESH_SECRET");
        env::remove_var("ACCESS_TOKEN_TTL_MINUTES");
        env::remove_var("REFRESH_TOKEN_TTL_DAYS");
        env::remove_var("FRONTEND_URL");
    }

    #[test]
    fn test_config_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.database_url, "sqlite:lottery.db?mode=rwc");
        assert_eq!(config.access_token_ttl_minutes, 15);
        assert_eq!(config.refresh_token_ttl_days, 7);
        assert_ne!(config.jwt_access_secret, config.jwt_refresh_secret);
    }

    #[test]
    fn test_config_from_env() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();

        env::set_var("HOST", "0.0.0.0");
        env::set_var("PORT", "8080");
        env::set_var("DATABASE_URL", "sqlite:test.db");
        env::set_var("JWT_ACCESS_SECRET", "access-secret");
        env::set_var("JWT_REFRESH_SECRET", "refresh-secret");
        env::set_var("ACCESS_TOKEN_TTL_MINUTES", "5");
        env::set_var("REFRESH_TOKEN_TTL_DAYS", "30");

        let config = Config::from_env().unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_url, "sqlite:test.db");
        assert_eq!(config.jwt_access_secret, "access-secret");
        assert_eq!(config.jwt_refresh_secret, "refresh-secret");
        assert_eq!(config.access_token_ttl_minutes, 5);
        assert_eq!(config.refresh_token_ttl_days, 30);

        // Clean up
        clear_env();
    }
}
