use async_trait::async_trait;
use confbook_core::{ticket_banner, Booking, TicketNotifier};
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

use crate::console::Output;

/// Simulates mailing the ticket: waits, then prints the banner to the console.
pub struct ConsoleNotifier {
    delay: Duration,
    output: Output,
}

impl ConsoleNotifier {
    pub fn new(delay: Duration, output: Output) -> Self {
        Self { delay, output }
    }
}

#[async_trait]
impl TicketNotifier for ConsoleNotifier {
    async fn send_ticket(&self, booking: &Booking) {
        sleep(self.delay).await;
        self.output.print(&ticket_banner(booking));
        info!("Ticket sent to {}", booking.email);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_banner_after_delay() {
        let output = Output::buffer();
        let notifier = ConsoleNotifier::new(Duration::from_millis(20), output.clone());
        let booking = Booking::new("John", "Doe", "john@x.com", 10);

        let started = tokio::time::Instant::now();
        notifier.send_ticket(&booking).await;

        assert!(started.elapsed() >= Duration::from_millis(20));
        assert!(output.contents().contains("10 tickets for John Doe"));
        assert!(output.contents().contains("to email address john@x.com"));
    }
}
