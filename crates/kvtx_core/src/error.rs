//! Error types for kvtx core.

use crate::types::StoreState;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in kvtx core operations.
///
/// Both variants are precondition violations on the transaction state
/// machine. They are raised before any mutation, so a failed call never
/// leaves the store changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// `put`, `commit` or `rollback` was called while no transaction is active.
    #[error("no transaction in progress")]
    NoActiveTransaction,

    /// `begin_transaction` was called while a transaction is already active.
    #[error("transaction already in progress")]
    TransactionAlreadyActive,
}

impl CoreError {
    /// Returns the state the store must be in for this error to occur.
    #[must_use]
    pub const fn raised_in(&self) -> StoreState {
        match self {
            Self::NoActiveTransaction => StoreState::Idle,
            Self::TransactionAlreadyActive => StoreState::InTransaction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            CoreError::NoActiveTransaction.to_string(),
            "no transaction in progress"
        );
        assert_eq!(
            CoreError::TransactionAlreadyActive.to_string(),
            "transaction already in progress"
        );
    }

    #[test]
    fn raised_in_matches_guard() {
        assert_eq!(CoreError::NoActiveTransaction.raised_in(), StoreState::Idle);
        assert_eq!(
            CoreError::TransactionAlreadyActive.raised_in(),
            StoreState::InTransaction
        );
    }
}
