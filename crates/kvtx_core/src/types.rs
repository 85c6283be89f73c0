//! Core type definitions for kvtx.

use std::fmt;

/// Value type held by the store.
pub type Value = i64;

/// Unique identifier for a transaction.
///
/// Transaction IDs increase monotonically within one store. They only
/// repeat after wrapping past `u64::MAX`, which takes 2^64 transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransactionId(pub u64);

impl TransactionId {
    /// Creates a new transaction ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns the next transaction ID, wrapping to 0 after `u64::MAX`.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "txn:{}", self.0)
    }
}

/// The two states of the store's transaction machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StoreState {
    /// No transaction is active. `put`, `commit` and `rollback` are rejected.
    #[default]
    Idle,
    /// A transaction is active. `begin_transaction` is rejected.
    InTransaction,
}

impl StoreState {
    /// Returns true if a transaction is active.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::InTransaction)
    }
}

impl fmt::Display for StoreState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::InTransaction => f.write_str("in-transaction"),
        }
    }
}
