//! Store statistics.
//!
//! Counters track successful state transitions only. A rejected call
//! changes nothing, counters included, and `get` is never counted.
//!
//! # Usage
//!
//! ```rust
//! use kvtx_core::TransactionalStore;
//!
//! let mut store = TransactionalStore::new();
//! store.begin_transaction().unwrap();
//! store.put("a", 1).unwrap();
//! store.commit().unwrap();
//!
//! let stats = store.stats();
//! assert_eq!(stats.writes(), 1);
//! assert_eq!(stats.transactions_committed(), 1);
//! ```

/// Snapshot of store counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Successful `put` calls.
    writes: u64,
    /// Transactions begun.
    transactions_started: u64,
    /// Transactions committed.
    transactions_committed: u64,
    /// Transactions rolled back.
    transactions_rolled_back: u64,
    /// Keys merged into the committed store across all commits.
    keys_committed: u64,
}

impl StoreStats {
    /// Creates a zeroed stats instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Increment methods (internal use) ===

    pub(crate) fn record_write(&mut self) {
        self.writes += 1;
    }

    pub(crate) fn record_begin(&mut self) {
        self.transactions_started += 1;
    }

    pub(crate) fn record_commit(&mut self, keys: usize) {
        self.transactions_committed += 1;
        self.keys_committed += keys as u64;
    }

    pub(crate) fn record_rollback(&mut self) {
        self.transactions_rolled_back += 1;
    }

    // === Getter methods (public API) ===

    /// Returns the number of successful `put` calls.
    #[must_use]
    pub const fn writes(&self) -> u64 {
        self.writes
    }

    /// Returns the number of transactions begun.
    #[must_use]
    pub const fn transactions_started(&self) -> u64 {
        self.transactions_started
    }

    /// Returns the number of transactions committed.
    #[must_use]
    pub const fn transactions_committed(&self) -> u64 {
        self.transactions_committed
    }

    /// Returns the number of transactions rolled back.
    #[must_use]
    pub const fn transactions_rolled_back(&self) -> u64 {
        self.transactions_rolled_back
    }

    /// Returns the total number of keys merged by commits.
    ///
    /// A key written several times in one transaction counts once.
    #[must_use]
    pub const fn keys_committed(&self) -> u64 {
        self.keys_committed
    }

    /// Returns the number of transactions begun but not yet finished (0 or 1).
    #[must_use]
    pub const fn transactions_open(&self) -> u64 {
        self.transactions_started - self.transactions_committed - self.transactions_rolled_back
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_zeroed() {
        let stats = StoreStats::new();
        assert_eq!(stats.writes(), 0);
        assert_eq!(stats.transactions_started(), 0);
        assert_eq!(stats.transactions_open(), 0);
    }

    #[test]
    fn commit_accumulates_keys() {
        let mut stats = StoreStats::new();
        stats.record_begin();
        stats.record_commit(3);
        stats.record_begin();
        stats.record_commit(2);

        assert_eq!(stats.transactions_committed(), 2);
        assert_eq!(stats.keys_committed(), 5);
        assert_eq!(stats.transactions_open(), 0);
    }

    #[test]
    fn open_transaction_counted() {
        let mut stats = StoreStats::new();
        stats.record_begin();
        stats.record_rollback();
        stats.record_begin();

        assert_eq!(stats.transactions_rolled_back(), 1);
        assert_eq!(stats.transactions_open(), 1);
    }
}
