//! Application state for cafe-api

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::config::Config;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state, cloned into every handler
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// Shared secret required by the delete endpoint
    pub api_key: String,
}

impl AppState {
    /// Connect to the database, run migrations, and build the state
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let options =
            SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        crate::db::MIGRATOR.run(&pool).await?;

        Ok(Self {
            pool,
            api_key: config.api_key.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::cafes::{self, NewCafe};

    #[tokio::test]
    async fn state_creates_database_file_and_persists_rows() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("cafes.db");
        let config = Config {
            database_url: format!("sqlite:{}", db_path.display()),
            http_port: 0,
            api_key: "k".into(),
            environment: "development".into(),
        };

        let state = AppState::new(&config).await.unwrap();
        cafes::insert(
            &state.pool,
            &NewCafe {
                name: "Persisted".into(),
                map_url: "m".into(),
                img_url: "i".into(),
                location: "Soho".into(),
                seats: "10".into(),
                has_toilet: true,
                has_wifi: true,
                has_sockets: true,
                can_take_calls: true,
                coffee_price: None,
            },
        )
        .await
        .unwrap();
        state.pool.close().await;

        // Reopen: migrations are idempotent and the row survives.
        let reopened = AppState::new(&config).await.unwrap();
        let rows = cafes::list_all(&reopened.pool).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Persisted");
    }
}
