use confbook_core::{Booking, BookingRepository};
use confbook_store::{DbClient, SqliteBookingRepository};

async fn memory_repo() -> (DbClient, SqliteBookingRepository) {
    let db = DbClient::new("sqlite::memory:").await.unwrap();
    let repo = SqliteBookingRepository::new(db.pool.clone());
    repo.create_table().await.unwrap();
    (db, repo)
}

#[tokio::test]
async fn test_create_table_is_idempotent() {
    let (db, repo) = memory_repo().await;

    repo.create_table().await.unwrap();
    repo.create_table().await.unwrap();

    let tables: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'bookings'",
    )
    .fetch_one(&db.pool)
    .await
    .unwrap();
    assert_eq!(tables, 1);
}

#[tokio::test]
async fn test_table_has_expected_columns() {
    let (db, _repo) = memory_repo().await;

    let columns: Vec<(String, String)> =
        sqlx::query_as("SELECT name, type FROM pragma_table_info('bookings') ORDER BY cid")
            .fetch_all(&db.pool)
            .await
            .unwrap();

    assert_eq!(
        columns,
        vec![
            ("firstName".to_string(), "TEXT".to_string()),
            ("lastName".to_string(), "TEXT".to_string()),
            ("email".to_string(), "TEXT".to_string()),
            ("numberOfTickets".to_string(), "INTEGER".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_insert_and_list_in_order() {
    let (_db, repo) = memory_repo().await;

    let john = Booking::new("John", "Doe", "john@x.com", 10);
    let jane = Booking::new("Jane", "Roe", "jane@x.com", 2);
    repo.insert_booking(&john).await.unwrap();
    repo.insert_booking(&jane).await.unwrap();
    // No uniqueness constraint
    repo.insert_booking(&john).await.unwrap();

    assert_eq!(repo.count_bookings().await.unwrap(), 3);
    assert_eq!(repo.tickets_sold().await.unwrap(), 22);
    assert_eq!(repo.list_bookings().await.unwrap(), vec![john.clone(), jane, john]);
}

#[tokio::test]
async fn test_empty_table_sums_to_zero() {
    let (_db, repo) = memory_repo().await;

    assert_eq!(repo.count_bookings().await.unwrap(), 0);
    assert_eq!(repo.tickets_sold().await.unwrap(), 0);
    assert!(repo.list_bookings().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_all_records() {
    let (_db, repo) = memory_repo().await;

    for i in 1..=4 {
        let booking = Booking::new("Guest", "Person", format!("guest{}@x.com", i), i);
        repo.insert_booking(&booking).await.unwrap();
    }

    assert_eq!(repo.delete_all_records().await.unwrap(), 4);
    assert_eq!(repo.count_bookings().await.unwrap(), 0);

    // Clearing an empty table is fine too
    assert_eq!(repo.delete_all_records().await.unwrap(), 0);
}

#[tokio::test]
async fn test_insert_without_table_fails() {
    let db = DbClient::new("sqlite::memory:").await.unwrap();
    let repo = SqliteBookingRepository::new(db.pool.clone());

    let result = repo.insert_booking(&Booking::new("John", "Doe", "john@x.com", 1)).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_closed_store_rejects_schema_changes() {
    let db = DbClient::new("sqlite::memory:").await.unwrap();
    let repo = SqliteBookingRepository::new(db.pool.clone());
    db.close().await;

    let result = repo.create_table().await;
    assert!(matches!(result, Err(confbook_core::StoreError::Schema(_))));
}

#[tokio::test]
async fn test_unopenable_path_is_an_open_error() {
    let missing_dir = std::env::temp_dir()
        .join(format!("confbook-missing-{}", std::process::id()))
        .join("nested");
    let url = format!("sqlite://{}", missing_dir.join("conference.db").display());

    let result = DbClient::new(&url).await;
    assert!(matches!(result, Err(confbook_core::StoreError::Open(_))));
}
