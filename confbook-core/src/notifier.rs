use async_trait::async_trait;
use crate::booking::Booking;

pub const BANNER_SEPARATOR: &str = "********************************************";

/// Dispatches the ticket for one booking. There is no failure path.
#[async_trait]
pub trait TicketNotifier: Send + Sync {
    async fn send_ticket(&self, booking: &Booking);
}

pub fn ticket_summary(booking: &Booking) -> String {
    format!(
        "{} tickets for {} {}",
        booking.number_of_tickets, booking.first_name, booking.last_name
    )
}

/// Confirmation banner bounded by the fixed-width separator
pub fn ticket_banner(booking: &Booking) -> String {
    format!(
        "{sep}\nSending Ticket:\n{ticket}\nto email address {email}\n{sep}\n",
        sep = BANNER_SEPARATOR,
        ticket = ticket_summary(booking),
        email = booking.email,
    )
}
