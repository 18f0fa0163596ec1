use std::env;
use std::time::Duration;

use anyhow::Context;
use persistence::db::{DatabaseConfig, create_postgres_pool, run_migrations};
use sqlx::PgPool;

use super::error::{ConfigError, parse_number};

/// Database settings read from the environment
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub migrations_path: Option<String>,
}

impl DatabaseSettings {
    /// Load database settings from environment variables
    ///
    /// Environment variables:
    /// - DATABASE_URL: PostgreSQL connection string (required)
    /// - DATABASE_MAX_CONNECTIONS: Pool size (default: 5)
    /// - DATABASE_ACQUIRE_TIMEOUT_SECS: Pool acquire timeout (default: 30)
    /// - DATABASE_MIGRATIONS_PATH: Migrations to run at startup (optional)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            env::var("DATABASE_URL").ok(),
            env::var("DATABASE_MAX_CONNECTIONS").ok(),
            env::var("DATABASE_ACQUIRE_TIMEOUT_SECS").ok(),
            env::var("DATABASE_MIGRATIONS_PATH").ok(),
        )
    }

    fn from_vars(
        url: Option<String>,
        max_connections: Option<String>,
        acquire_timeout_secs: Option<String>,
        migrations_path: Option<String>,
    ) -> Result<Self, ConfigError> {
        let url = url
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::MissingVariable("DATABASE_URL"))?;
        let max_connections: u32 =
            parse_number("DATABASE_MAX_CONNECTIONS", max_connections, 5)?;
        let acquire_timeout_secs: u64 =
            parse_number("DATABASE_ACQUIRE_TIMEOUT_SECS", acquire_timeout_secs, 30)?;

        Ok(Self {
            url,
            max_connections,
            acquire_timeout: Duration::from_secs(acquire_timeout_secs),
            migrations_path: migrations_path.filter(|p| !p.is_empty()),
        })
    }
}

/// Creates the connection pool once at startup and applies migrations when configured.
pub async fn init_database(settings: &DatabaseSettings) -> anyhow::Result<PgPool> {
    let config = DatabaseConfig::new(settings.url.clone())
        .with_max_connections(settings.max_connections)
        .with_acquire_timeout(settings.acquire_timeout);
    let pool = create_postgres_pool(&config)
        .await
        .context("could not connect to the database")?;

    if let Some(path) = &settings.migrations_path {
        run_migrations(&pool, path)
            .await
            .with_context(|| format!("could not run migrations from {}", path))?;
    }

    Ok(pool)
}
