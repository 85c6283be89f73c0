//! Transaction state.

use crate::types::{TransactionId, Value};
use std::collections::HashMap;

/// An active transaction.
///
/// Holds the pending-write buffer. The buffer is a map, so writing the same
/// key twice keeps only the latest value. A `Transaction` only exists while
/// active: the store consumes it on commit and drops it on rollback.
#[derive(Debug)]
pub struct Transaction {
    /// Transaction ID.
    id: TransactionId,
    /// Pending writes: key -> latest value.
    writes: HashMap<String, Value>,
}

impl Transaction {
    /// Creates an empty transaction.
    pub(crate) fn new(id: TransactionId, capacity: usize) -> Self {
        Self {
            id,
            writes: HashMap::with_capacity(capacity),
        }
    }

    /// Returns the transaction ID.
    #[must_use]
    pub fn id(&self) -> TransactionId {
        self.id
    }

    /// Records a put, replacing any earlier write of the same key.
    ///
    /// Returns the value this write replaced, if any.
    pub(crate) fn put(&mut self, key: String, value: Value) -> Option<Value> {
        self.writes.insert(key, value)
    }

    /// Gets the pending value for a key.
    #[cfg(test)]
    pub(crate) fn pending_value(&self, key: &str) -> Option<Value> {
        self.writes.get(key).copied()
    }

    /// Returns the number of distinct keys written.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.len()
    }

    /// Consumes the transaction, yielding its buffered writes.
    pub(crate) fn into_writes(self) -> HashMap<String, Value> {
        self.writes
    }
}
