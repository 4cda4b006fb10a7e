pub mod console;
pub mod desk;
pub mod notifier;
pub mod state;

pub use console::{Console, Output, TokenReader};
pub use desk::BookingDesk;
pub use notifier::ConsoleNotifier;
pub use state::DeskState;
