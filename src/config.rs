//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// SQLite database URL
    pub database_url: String,
    /// Base URL of the challenges microservice
    pub challenges_url: String,
    /// Base URL of the objectives microservice
    pub objectives_url: String,
    /// Base URL of the Strava API (overridable for tests)
    pub strava_api_url: String,
    /// Frontend URL for CORS
    pub frontend_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "5002".to_string())
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT"))?,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:beepbeep-dataservice.db".to_string()),
            challenges_url: env::var("CHALLENGES_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:5003".to_string()),
            objectives_url: env::var("OBJECTIVES_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:5004".to_string()),
            strava_api_url: env::var("STRAVA_API_URL")
                .unwrap_or_else(|_| "https://www.strava.com".to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5000".to_string()),
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            port: 5002,
            database_url: "sqlite::memory:".to_string(),
            challenges_url: "http://127.0.0.1:5003".to_string(),
            objectives_url: "http://127.0.0.1:5004".to_string(),
            strava_api_url: "https://www.strava.com".to_string(),
            frontend_url: "http://localhost:5000".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        env::remove_var("PORT");
        env::remove_var("DATABASE_URL");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.port, 5002);
        assert_eq!(config.database_url, "sqlite:beepbeep-dataservice.db");
    }
}
