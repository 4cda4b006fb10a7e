use async_trait::async_trait;
use confbook_core::{Booking, BookingRepository, StoreError};
use sqlx::SqlitePool;
use tracing::{error, info};

pub const TABLE_NAME: &str = "bookings";

pub struct SqliteBookingRepository {
    pool: SqlitePool,
}

impl SqliteBookingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// Columns carry no NOT NULL constraint, so every field may come back empty
#[derive(sqlx::FromRow)]
struct BookingRow {
    #[sqlx(rename = "firstName")]
    first_name: Option<String>,
    #[sqlx(rename = "lastName")]
    last_name: Option<String>,
    email: Option<String>,
    #[sqlx(rename = "numberOfTickets")]
    number_of_tickets: Option<i64>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Booking::new(
            row.first_name.unwrap_or_default(),
            row.last_name.unwrap_or_default(),
            row.email.unwrap_or_default(),
            row.number_of_tickets
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0),
        )
    }
}

fn query_error(err: sqlx::Error) -> StoreError {
    error!("Booking store query failed: {}", err);
    StoreError::Query(Box::new(err))
}

#[async_trait]
impl BookingRepository for SqliteBookingRepository {
    async fn create_table(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS bookings (
                firstName TEXT,
                lastName TEXT,
                email TEXT,
                numberOfTickets INTEGER
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Schema(Box::new(e)))?;

        info!("Table {} is ready", TABLE_NAME);
        Ok(())
    }

    async fn insert_booking(&self, booking: &Booking) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO bookings (firstName, lastName, email, numberOfTickets)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&booking.first_name)
        .bind(&booking.last_name)
        .bind(&booking.email)
        .bind(i64::from(booking.number_of_tickets))
        .execute(&self.pool)
        .await
        .map_err(query_error)?;

        info!(
            "Persisted booking of {} tickets for {}",
            booking.number_of_tickets,
            booking.full_name()
        );
        Ok(())
    }

    async fn delete_all_records(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM bookings")
            .execute(&self.pool)
            .await
            .map_err(query_error)?;

        let deleted = result.rows_affected();
        info!("Deleted {} rows from {}", deleted, TABLE_NAME);
        Ok(deleted)
    }

    async fn count_bookings(&self) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(count.max(0) as u64)
    }

    async fn tickets_sold(&self) -> Result<u64, StoreError> {
        let sold: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(numberOfTickets), 0) FROM bookings")
            .fetch_one(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(sold.max(0) as u64)
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>, StoreError> {
        let rows: Vec<BookingRow> = sqlx::query_as(
            "SELECT firstName, lastName, email, numberOfTickets FROM bookings ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(query_error)?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }
}
