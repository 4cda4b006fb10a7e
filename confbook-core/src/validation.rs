//! Input checks applied before a booking is accepted.
//!
//! Every check runs independently so the operator sees all failures at once.

/// Names must be strictly longer than this many characters.
pub const MIN_NAME_LENGTH: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationReport {
    pub name_valid: bool,
    pub email_valid: bool,
    pub tickets_valid: bool,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.name_valid && self.email_valid && self.tickets_valid
    }

    /// One operator-facing message per failing check.
    pub fn failures(&self) -> Vec<&'static str> {
        let mut messages = Vec::new();
        if !self.name_valid {
            messages.push("First name or last name entered is too short");
        }
        if !self.email_valid {
            messages.push("Email address you entered doesn't contain @ sign");
        }
        if !self.tickets_valid {
            messages.push("Number of tickets you entered is invalid");
        }
        messages
    }
}

pub fn is_valid_name(first_name: &str, last_name: &str) -> bool {
    first_name.chars().count() > MIN_NAME_LENGTH && last_name.chars().count() > MIN_NAME_LENGTH
}

pub fn is_valid_email(email: &str) -> bool {
    email.contains('@')
}

pub fn is_valid_ticket_count(requested: i64, remaining: u32) -> bool {
    requested > 0 && requested <= i64::from(remaining)
}

pub fn validate_user_input(
    first_name: &str,
    last_name: &str,
    email: &str,
    requested_tickets: i64,
    remaining_tickets: u32,
) -> ValidationReport {
    ValidationReport {
        name_valid: is_valid_name(first_name, last_name),
        email_valid: is_valid_email(email),
        tickets_valid: is_valid_ticket_count(requested_tickets, remaining_tickets),
    }
}
