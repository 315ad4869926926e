use std::sync::Arc;

use anyhow::{Context, Result, bail};

use crate::config::Config;
use crate::store::{PostgresStore, SqliteStore, Store};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Sqlite,
    Postgres,
}

impl Backend {
    pub fn from_url(database_url: &str) -> Result<Self> {
        if database_url.starts_with("sqlite:") {
            Ok(Backend::Sqlite)
        } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://")
        {
            Ok(Backend::Postgres)
        } else {
            bail!("DATABASE_URL must start with sqlite:, postgres:// or postgresql://")
        }
    }
}

/// Connect the store picked by the `DATABASE_URL` scheme and make sure the
/// schema exists.
pub async fn init_db(config: &Config) -> Result<Arc<dyn Store>> {
    let store: Arc<dyn Store> = match Backend::from_url(&config.database_url)? {
        Backend::Sqlite => Arc::new(
            SqliteStore::connect(&config.database_url, config.database_max_connections)
                .await
                .context("Failed to connect to SQLite")?,
        ),
        Backend::Postgres => Arc::new(
            PostgresStore::connect(
                &config.database_url,
                config.database_max_connections,
                config.database_ssl,
            )
            .await
            .context("Failed to connect to PostgreSQL")?,
        ),
    };

    store
        .init_schema()
        .await
        .with_context(|| format!("Failed to initialise {} schema", store.backend()))?;

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_follows_url_scheme() {
        assert_eq!(Backend::from_url("sqlite://hrms.db").unwrap(), Backend::Sqlite);
        assert_eq!(Backend::from_url("sqlite::memory:").unwrap(), Backend::Sqlite);
        assert_eq!(
            Backend::from_url("postgres://u:p@localhost/hrms").unwrap(),
            Backend::Postgres
        );
        assert_eq!(
            Backend::from_url("postgresql://localhost/hrms").unwrap(),
            Backend::Postgres
        );
        assert!(Backend::from_url("mysql://localhost/hrms").is_err());
    }

    #[actix_web::test]
    async fn init_db_creates_schema_on_memory_sqlite() {
        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            ..Config::default()
        };
        let store = init_db(&config).await.unwrap();
        assert_eq!(store.backend(), "sqlite");
        assert!(store.list_employees().await.unwrap().is_empty());
    }
}
