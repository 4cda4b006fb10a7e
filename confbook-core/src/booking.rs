use serde::{Deserialize, Serialize};
use std::fmt;

/// One customer's ticket purchase for the conference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub number_of_tickets: u32,
}

impl Booking {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        number_of_tickets: u32,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            number_of_tickets,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for Booking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.first_name, self.last_name, self.email, self.number_of_tickets
        )
    }
}

/// Renders the in-memory booking list the way the desk prints it.
pub fn format_booking_list(bookings: &[Booking]) -> String {
    let entries = bookings
        .iter()
        .map(|b| format!("{{{}}}", b))
        .collect::<Vec<String>>()
        .join(" ");
    format!("[{}]", entries)
}
