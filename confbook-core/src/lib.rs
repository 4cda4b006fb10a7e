pub mod booking;
pub mod inventory;
pub mod notifier;
pub mod repository;
pub mod validation;

pub use booking::{format_booking_list, Booking};
pub use inventory::{Inventory, InventoryError};
pub use notifier::{ticket_banner, TicketNotifier};
pub use repository::{BookingRepository, StoreError};
pub use validation::{validate_user_input, ValidationReport};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type CoreResult<T> = Result<T, CoreError>;
