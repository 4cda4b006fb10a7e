use confbook_core::StoreError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Single shared handle to the SQLite file backing the bookings table.
#[derive(Clone)]
pub struct DbClient {
    pub pool: Pool<Sqlite>,
}

impl DbClient {
    pub async fn new(connection_string: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(connection_string)
            .map_err(|e| StoreError::Open(Box::new(e)))?
            .create_if_missing(true);

        // One connection, never recycled: in-memory databases live only as long as it does
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Open(Box::new(e)))?;

        info!("Opened booking store at {}", connection_string);
        Ok(Self { pool })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
