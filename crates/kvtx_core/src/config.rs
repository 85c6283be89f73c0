//! Store configuration.

/// Configuration for constructing a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Number of committed entries to reserve space for up front.
    pub initial_capacity: usize,

    /// Number of pending writes each new transaction reserves space for.
    pub pending_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capacity: 64,
            pending_capacity: 16,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the committed map's initial capacity.
    #[must_use]
    pub const fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the per-transaction pending buffer capacity.
    #[must_use]
    pub const fn pending_capacity(mut self, capacity: usize) -> Self {
        self.pending_capacity = capacity;
        self
    }
}
