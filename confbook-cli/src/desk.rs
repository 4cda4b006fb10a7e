//! The interactive booking loop.
//!
//! One booking is handled at a time. Each successful booking spawns a
//! confirmation task into a `JoinSet`, and every task is joined before the
//! operator is prompted again, so no confirmation is ever in flight while
//! the counter or the booking list changes.

use confbook_core::{
    format_booking_list, validate_user_input, Booking, BookingRepository, CoreError, CoreResult,
    StoreError, TicketNotifier,
};
use std::io;
use std::sync::Arc;
use tokio::io::AsyncBufRead;
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::console::Console;
use crate::state::DeskState;

/// Fields collected by one pass through the prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub tickets: i64,
}

#[derive(Debug)]
enum Stage {
    Prompting,
    Validating(RawInput),
    Booking(Booking),
    AwaitingConfirmations,
    ContinueDecision,
    SoldOut,
    Terminated,
}

pub struct BookingDesk<R> {
    conference_name: String,
    state: Arc<Mutex<DeskState>>,
    repository: Arc<dyn BookingRepository>,
    notifier: Arc<dyn TicketNotifier>,
    confirmations: JoinSet<()>,
    console: Console<R>,
}

impl<R: AsyncBufRead + Unpin> BookingDesk<R> {
    pub fn new(
        conference_name: impl Into<String>,
        total_tickets: u32,
        repository: Arc<dyn BookingRepository>,
        notifier: Arc<dyn TicketNotifier>,
        console: Console<R>,
    ) -> Self {
        Self {
            conference_name: conference_name.into(),
            state: Arc::new(Mutex::new(DeskState::new(total_tickets))),
            repository,
            notifier,
            confirmations: JoinSet::new(),
            console,
        }
    }

    /// Resume from rows persisted by an earlier run
    pub async fn restore_from_store(&self) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;

        let sold = self.repository.tickets_sold().await?;
        state.inventory.restore_sold(sold);
        state.bookings = self.repository.list_bookings().await?;

        info!(
            "Restored {} bookings, {} tickets remaining",
            state.bookings.len(),
            state.remaining()
        );
        Ok(())
    }

    /// Copy of the counter and booking list as they are right now
    pub async fn snapshot(&self) -> DeskState {
        self.state.lock().await.clone()
    }

    /// Drive the loop until the operator stops, tickets run out, or input ends.
    pub async fn run(&mut self) -> io::Result<()> {
        let mut stage = if self.state.lock().await.inventory.is_sold_out() {
            Stage::SoldOut
        } else {
            Stage::Prompting
        };

        loop {
            stage = match stage {
                Stage::Prompting => self.prompt().await?,
                Stage::Validating(input) => self.validate(input).await,
                Stage::Booking(booking) => self.place_booking(booking).await,
                Stage::AwaitingConfirmations => {
                    self.await_confirmations().await;
                    if self.state.lock().await.inventory.is_sold_out() {
                        Stage::SoldOut
                    } else {
                        Stage::ContinueDecision
                    }
                }
                Stage::ContinueDecision => self.continue_decision().await?,
                Stage::SoldOut => {
                    self.announce_sold_out().await;
                    Stage::Terminated
                }
                Stage::Terminated => break,
            };
        }

        let stragglers = self.await_confirmations().await;
        if stragglers > 0 {
            warn!("Joined {} confirmations after the loop ended", stragglers);
        }

        self.offer_bulk_delete().await
    }

    fn println(&self, line: &str) {
        self.console.output().println(line);
    }

    async fn greet(&self) {
        let state = self.state.lock().await;
        self.println(&format!(
            "Hello, Welcome to {} booking application",
            self.conference_name
        ));
        self.println(&format!(
            "We have a total of {} tickets and {} tickets are still available",
            state.inventory.total_capacity(),
            state.remaining()
        ));
        self.println("Get your tickets here to attend");
    }

    async fn prompt(&mut self) -> io::Result<Stage> {
        self.greet().await;

        let Some(first_name) = self.console.ask("Enter your first name: ").await? else {
            return Ok(Stage::Terminated);
        };
        let Some(last_name) = self.console.ask("Enter your last name: ").await? else {
            return Ok(Stage::Terminated);
        };
        let Some(email) = self.console.ask("Enter your email address: ").await? else {
            return Ok(Stage::Terminated);
        };
        let Some(tickets) = self.console.ask("Enter the number of tickets: ").await? else {
            return Ok(Stage::Terminated);
        };

        match tickets.parse::<i64>() {
            Ok(tickets) => Ok(Stage::Validating(RawInput {
                first_name,
                last_name,
                email,
                tickets,
            })),
            Err(e) => {
                self.println(&format!("Error reading number of tickets: {}", e));
                Ok(Stage::Prompting)
            }
        }
    }

    async fn validate(&self, input: RawInput) -> Stage {
        let remaining = self.state.lock().await.remaining();
        let report = validate_user_input(
            &input.first_name,
            &input.last_name,
            &input.email,
            input.tickets,
            remaining,
        );

        // Validation bounds the count by a u32, so this only fails if the report is invalid
        match (report.is_valid(), u32::try_from(input.tickets)) {
            (true, Ok(tickets)) => Stage::Booking(Booking::new(
                input.first_name,
                input.last_name,
                input.email,
                tickets,
            )),
            _ => {
                for failure in report.failures() {
                    self.println(failure);
                }
                Stage::Prompting
            }
        }
    }

    /// Persist, decrement and record one booking under the desk lock.
    ///
    /// Availability is checked first and the counter only moves once the row
    /// is written, so a failed insert leaves the counter and list untouched.
    pub async fn book(&self, booking: &Booking) -> CoreResult<u32> {
        let mut state = self.state.lock().await;

        state.inventory.ensure_available(booking.number_of_tickets)?;
        self.repository.insert_booking(booking).await?;
        let remaining = state.inventory.reserve(booking.number_of_tickets)?;
        state.bookings.push(booking.clone());

        self.println(&format!(
            "List of bookings is {}",
            format_booking_list(&state.bookings)
        ));
        self.println(&format!(
            "Thank you {} {} for booking {} tickets. You will receive a confirmation email at {}",
            booking.first_name, booking.last_name, booking.number_of_tickets, booking.email
        ));

        Ok(remaining)
    }

    async fn place_booking(&mut self, booking: Booking) -> Stage {
        match self.book(&booking).await {
            Ok(remaining) => {
                info!(
                    "Booked {} tickets for {}, {} remaining",
                    booking.number_of_tickets,
                    booking.full_name(),
                    remaining
                );
                let notifier = Arc::clone(&self.notifier);
                self.confirmations.spawn(async move {
                    notifier.send_ticket(&booking).await;
                });
            }
            Err(CoreError::Store(e)) => {
                error!("Error inserting into database: {}", e);
                self.println(&format!("Error inserting into database: {}", e));
            }
            Err(e) => {
                error!("Booking rejected: {}", e);
                self.println(&format!("Booking rejected: {}", e));
            }
        }
        Stage::AwaitingConfirmations
    }

    /// Join barrier: wait for every outstanding confirmation task.
    pub async fn await_confirmations(&mut self) -> usize {
        let mut joined = 0;
        while let Some(result) = self.confirmations.join_next().await {
            match result {
                Ok(()) => joined += 1,
                Err(e) => error!("Confirmation task failed: {}", e),
            }
        }
        joined
    }

    async fn continue_decision(&mut self) -> io::Result<Stage> {
        let remaining = self.state.lock().await.remaining();
        self.println(&format!(
            "{} tickets remaining for {}",
            remaining, self.conference_name
        ));

        let choice = self.console.ask("Do you want to continue? (yes/no): ").await?;
        if choice.as_deref() == Some("yes") {
            Ok(Stage::Prompting)
        } else {
            Ok(Stage::Terminated)
        }
    }

    async fn announce_sold_out(&self) {
        let remaining = self.state.lock().await.remaining();
        self.println(&format!(
            "Since {} tickets remaining for {}",
            remaining, self.conference_name
        ));
        self.println("Our conference is booked out. Come back next year.");
        info!("{} is sold out", self.conference_name);
    }

    async fn offer_bulk_delete(&mut self) -> io::Result<()> {
        let choice = self
            .console
            .ask("Do you want to delete all records in the table? (yes/no): ")
            .await?;
        if choice.as_deref() != Some("yes") {
            return Ok(());
        }

        match self.repository.delete_all_records().await {
            Ok(deleted) => {
                info!("Bulk delete removed {} rows", deleted);
                self.println("All records deleted successfully.");
            }
            Err(e) => {
                error!("Error deleting records: {}", e);
                self.println(&format!("Error deleting records: {}", e));
            }
        }
        Ok(())
    }
}
