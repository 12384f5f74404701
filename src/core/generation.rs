//! Generation tickets for superseding pending work
//!
//! Every [`Generation::advance`] issues a new ticket and invalidates all
//! earlier ones. Timers, debounced calls and animations hold on to the ticket
//! they were started with and only act while it is still current.

/// Ticket issued by a [`Generation`]
pub type Ticket = u64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Generation {
    current: Ticket,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new ticket, superseding every earlier one
    pub fn advance(&mut self) -> Ticket {
        self.current = self.current.wrapping_add(1);
        self.current
    }

    /// Most recently issued ticket
    pub fn current(&self) -> Ticket {
        self.current
    }

    /// Whether `ticket` has not been superseded
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket == self.current
    }
}
