//! Reference model of the transaction state machine.
//!
//! `ModelStore` implements the same contract as
//! [`kvtx_core::TransactionalStore`] in the most direct way possible, on
//! ordered maps. Property tests compare the two.

use crate::generators::StoreOperation;
use kvtx_core::{CoreError, StoreState, Value};
use std::collections::BTreeMap;

/// Observable result of one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A `get` result.
    Read(Option<Value>),
    /// A successful state-changing call.
    Done,
    /// A rejected call.
    Rejected(CoreError),
}

impl From<Result<(), CoreError>> for Outcome {
    fn from(result: Result<(), CoreError>) -> Self {
        match result {
            Ok(()) => Self::Done,
            Err(err) => Self::Rejected(err),
        }
    }
}

/// Oracle implementation of the store.
#[derive(Debug, Default, Clone)]
pub struct ModelStore {
    committed: BTreeMap<String, Value>,
    pending: Option<BTreeMap<String, Value>>,
}

impl ModelStore {
    /// Creates an empty, idle model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one operation and reports its outcome.
    pub fn apply(&mut self, op: &StoreOperation) -> Outcome {
        match op {
            StoreOperation::Get { key } => Outcome::Read(self.committed.get(key).copied()),
            StoreOperation::Put { key, value } => match self.pending.as_mut() {
                Some(pending) => {
                    pending.insert(key.clone(), *value);
                    Outcome::Done
                }
                None => Outcome::Rejected(CoreError::NoActiveTransaction),
            },
            StoreOperation::Begin => {
                if self.pending.is_some() {
                    Outcome::Rejected(CoreError::TransactionAlreadyActive)
                } else {
                    self.pending = Some(BTreeMap::new());
                    Outcome::Done
                }
            }
            StoreOperation::Commit => match self.pending.take() {
                Some(pending) => {
                    self.committed.extend(pending);
                    Outcome::Done
                }
                None => Outcome::Rejected(CoreError::NoActiveTransaction),
            },
            StoreOperation::Rollback => match self.pending.take() {
                Some(_) => Outcome::Done,
                None => Outcome::Rejected(CoreError::NoActiveTransaction),
            },
        }
    }

    /// Returns the model's state.
    #[must_use]
    pub fn state(&self) -> StoreState {
        if self.pending.is_some() {
            StoreState::InTransaction
        } else {
            StoreState::Idle
        }
    }

    /// Returns the committed data.
    #[must_use]
    pub fn committed(&self) -> &BTreeMap<String, Value> {
        &self.committed
    }

    /// Returns the number of buffered keys.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.as_ref().map_or(0, BTreeMap::len)
    }
}
