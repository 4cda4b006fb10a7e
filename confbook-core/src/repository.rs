use async_trait::async_trait;
use crate::booking::Booking;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to open booking store: {0}")]
    Open(#[source] BoxError),
    #[error("Failed to prepare booking table: {0}")]
    Schema(#[source] BoxError),
    #[error("Booking store query failed: {0}")]
    Query(#[source] BoxError),
}

/// Repository trait for booking rows
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Create the bookings table if it does not exist yet
    async fn create_table(&self) -> Result<(), StoreError>;

    /// Append one row
    async fn insert_booking(&self, booking: &Booking) -> Result<(), StoreError>;

    /// Remove every row, returning how many were deleted
    async fn delete_all_records(&self) -> Result<u64, StoreError>;

    async fn count_bookings(&self) -> Result<u64, StoreError>;

    /// Sum of `numberOfTickets` over all rows
    async fn tickets_sold(&self) -> Result<u64, StoreError>;

    /// All rows in insertion order
    async fn list_bookings(&self) -> Result<Vec<Booking>, StoreError>;
}
