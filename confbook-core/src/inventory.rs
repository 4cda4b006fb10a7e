use serde::{Deserialize, Serialize};

/// Remaining-ticket counter for the single conference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    total_capacity: u32,
    remaining: u32,
}

impl Inventory {
    pub fn new(total_capacity: u32) -> Self {
        Self {
            total_capacity,
            remaining: total_capacity,
        }
    }

    pub fn total_capacity(&self) -> u32 {
        self.total_capacity
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_sold_out(&self) -> bool {
        self.remaining == 0
    }

    /// Check that `quantity` tickets could be taken without touching the counter
    pub fn ensure_available(&self, quantity: u32) -> Result<(), InventoryError> {
        if quantity == 0 {
            return Err(InventoryError::ZeroQuantity);
        }

        if quantity > self.remaining {
            return Err(InventoryError::Insufficient {
                requested: quantity,
                available: self.remaining,
            });
        }

        Ok(())
    }

    /// Take `quantity` tickets, returning what is left
    pub fn reserve(&mut self, quantity: u32) -> Result<u32, InventoryError> {
        self.ensure_available(quantity)?;
        self.remaining -= quantity;
        Ok(self.remaining)
    }

    /// Account for tickets already sold in a previous run
    pub fn restore_sold(&mut self, sold: u64) {
        let sold = u32::try_from(sold).unwrap_or(u32::MAX);
        self.remaining = self.total_capacity.saturating_sub(sold);
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Ticket quantity must be greater than zero")]
    ZeroQuantity,

    #[error("Insufficient inventory: requested {requested}, available {available}")]
    Insufficient {
        requested: u32,
        available: u32,
    },
}
