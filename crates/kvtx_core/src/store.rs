//! Transactional key-value store.

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::stats::StoreStats;
use crate::transaction::Transaction;
use crate::types::{StoreState, TransactionId, Value};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, trace};

/// An in-memory key-value store with a single-level transaction wrapper.
///
/// The store keeps two maps: the committed data, which `get` reads, and the
/// pending buffer of the active transaction, which only `commit` ever reads.
///
/// ## State machine
///
/// ```text
///            begin_transaction
///   Idle ---------------------> InTransaction --+
///    ^                             |     ^      | put
///    +------ commit / rollback ----+     +------+
/// ```
///
/// `get` is legal in both states and never changes state. Every other
/// operation is rejected with a [`CoreError`] when called in the wrong
/// state, before anything is mutated.
///
/// # Example
///
/// ```rust
/// use kvtx_core::{CoreError, TransactionalStore};
///
/// let mut store = TransactionalStore::new();
/// assert_eq!(store.put("a", 5), Err(CoreError::NoActiveTransaction));
///
/// store.begin_transaction().unwrap();
/// store.put("a", 5).unwrap();
/// assert_eq!(store.get("a"), None);
///
/// store.commit().unwrap();
/// assert_eq!(store.get("a"), Some(5));
/// ```
pub struct TransactionalStore {
    /// Construction-time configuration.
    config: Config,
    /// Committed, externally visible data.
    committed: HashMap<String, Value>,
    /// The active transaction, if any. Owns the pending buffer.
    active: Option<Transaction>,
    /// ID handed to the next transaction.
    next_txid: TransactionId,
    /// Transition counters.
    stats: StoreStats,
}

impl TransactionalStore {
    /// Creates an empty store with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty store with the given configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            committed: HashMap::with_capacity(config.initial_capacity),
            config,
            active: None,
            next_txid: TransactionId::new(1),
            stats: StoreStats::new(),
        }
    }

    /// Reads a committed value.
    ///
    /// Writes buffered by the active transaction are never visible here,
    /// including the caller's own.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        let value = self.committed.get(key).copied();
        trace!(key, found = value.is_some(), "get");
        value
    }

    /// Buffers a write in the active transaction.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoActiveTransaction`] if no transaction is active.
    pub fn put(&mut self, key: impl Into<String>, value: Value) -> CoreResult<()> {
        let txn = self.active.as_mut().ok_or(CoreError::NoActiveTransaction)?;
        let key = key.into();
        trace!(txn = %txn.id(), key = %key, value, "put");
        txn.put(key, value);
        self.stats.record_write();
        Ok(())
    }

    /// Starts a transaction with an empty pending buffer.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TransactionAlreadyActive`] if a transaction is
    /// already active.
    pub fn begin_transaction(&mut self) -> CoreResult<()> {
        if self.active.is_some() {
            return Err(CoreError::TransactionAlreadyActive);
        }

        let txid = self.next_txid;
        self.next_txid = txid.next();
        self.active = Some(Transaction::new(txid, self.config.pending_capacity));
        self.stats.record_begin();

        debug!(txn = %txid, "transaction begun");
        Ok(())
    }

    /// Merges the pending buffer into the committed data and ends the
    /// transaction.
    ///
    /// Existing keys are overwritten, new keys inserted.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoActiveTransaction`] if no transaction is active.
    pub fn commit(&mut self) -> CoreResult<()> {
        let txn = self.active.take().ok_or(CoreError::NoActiveTransaction)?;
        let txid = txn.id();
        let writes = txn.into_writes();
        let count = writes.len();

        self.committed.extend(writes);
        self.stats.record_commit(count);

        debug!(txn = %txid, keys = count, "transaction committed");
        Ok(())
    }

    /// Discards the pending buffer and ends the transaction.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoActiveTransaction`] if no transaction is active.
    pub fn rollback(&mut self) -> CoreResult<()> {
        let txn = self.active.take().ok_or(CoreError::NoActiveTransaction)?;
        self.stats.record_rollback();

        debug!(txn = %txn.id(), discarded = txn.write_count(), "transaction rolled back");
        Ok(())
    }

    /// Returns the current machine state.
    #[must_use]
    pub fn state(&self) -> StoreState {
        if self.active.is_some() {
            StoreState::InTransaction
        } else {
            StoreState::Idle
        }
    }

    /// Checks if a transaction is active.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.active.is_some()
    }

    /// Returns the active transaction's ID.
    #[must_use]
    pub fn current_transaction(&self) -> Option<TransactionId> {
        self.active.as_ref().map(Transaction::id)
    }

    /// Returns the number of distinct keys buffered (0 when idle).
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.active.as_ref().map_or(0, Transaction::write_count)
    }

    /// Returns the number of committed keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.committed.len()
    }

    /// Returns true if nothing has been committed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    /// Checks if a key has a committed value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.committed.contains_key(key)
    }

    /// Returns the committed keys in sorted order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.committed.keys().cloned().collect();
        keys.sort_unstable();
        keys
    }

    /// Returns a sorted copy of the committed data.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, Value> {
        self.committed
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect()
    }

    /// Returns a copy of the store counters.
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        self.stats
    }

    /// Returns the configuration the store was built with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Default for TransactionalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TransactionalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionalStore")
            .field("state", &self.state())
            .field("committed", &self.len())
            .field("pending", &self.pending_len())
            .finish_non_exhaustive()
    }
}
