use confbook_core::{Booking, Inventory};

/// Everything the desk mutates under its lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeskState {
    pub inventory: Inventory,
    pub bookings: Vec<Booking>,
}

impl DeskState {
    pub fn new(total_tickets: u32) -> Self {
        Self {
            inventory: Inventory::new(total_tickets),
            bookings: Vec::new(),
        }
    }

    pub fn remaining(&self) -> u32 {
        self.inventory.remaining()
    }
}
