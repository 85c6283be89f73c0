//! Differential harness.
//!
//! Drives a [`TransactionalStore`] and a [`ModelStore`] with the same
//! operations and panics as soon as they disagree.

use crate::generators::StoreOperation;
use crate::model::{ModelStore, Outcome};
use kvtx_core::TransactionalStore;

/// Applies one operation to a real store.
pub fn apply_to_store(store: &mut TransactionalStore, op: &StoreOperation) -> Outcome {
    match op {
        StoreOperation::Get { key } => Outcome::Read(store.get(key)),
        StoreOperation::Put { key, value } => store.put(key.as_str(), *value).into(),
        StoreOperation::Begin => store.begin_transaction().into(),
        StoreOperation::Commit => store.commit().into(),
        StoreOperation::Rollback => store.rollback().into(),
    }
}

/// A test harness pairing the store with its reference model.
pub struct DifferentialHarness {
    /// The store under test.
    store: TransactionalStore,
    /// The oracle.
    model: ModelStore,
    /// Number of operations applied so far.
    steps: usize,
}

impl DifferentialHarness {
    /// Creates a harness over a fresh store and model.
    pub fn new() -> Self {
        Self {
            store: TransactionalStore::new(),
            model: ModelStore::new(),
            steps: 0,
        }
    }

    /// Applies an operation to both sides and verifies they still agree.
    pub fn apply(&mut self, op: &StoreOperation) -> Outcome {
        let actual = apply_to_store(&mut self.store, op);
        let expected = self.model.apply(op);
        self.steps += 1;

        assert_eq!(
            actual, expected,
            "outcome mismatch at step {} for {:?}",
            self.steps, op
        );
        self.verify();
        actual
    }

    /// Applies every operation in order.
    pub fn run(&mut self, ops: &[StoreOperation]) {
        for op in ops {
            self.apply(op);
        }
    }

    /// Verifies the store's observable state against the model.
    pub fn verify(&self) {
        assert_eq!(
            self.store.state(),
            self.model.state(),
            "state mismatch after step {}",
            self.steps
        );
        assert_eq!(
            self.store.pending_len(),
            self.model.pending_len(),
            "pending size mismatch after step {}",
            self.steps
        );
        assert_eq!(
            &self.store.snapshot(),
            self.model.committed(),
            "committed data mismatch after step {}",
            self.steps
        );
    }

    /// Returns the store under test.
    ///
    /// Only shared access is handed out: every mutation goes through
    /// [`apply`](Self::apply) so the model stays in step.
    pub fn store(&self) -> &TransactionalStore {
        &self.store
    }

    /// Returns the model.
    pub fn model(&self) -> &ModelStore {
        &self.model
    }

    /// Returns the number of operations applied.
    pub fn steps(&self) -> usize {
        self.steps
    }
}

impl Default for DifferentialHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kvtx_core::CoreError;

    #[test]
    fn harness_tracks_steps() {
        let mut harness = DifferentialHarness::new();
        harness.run(&[
            StoreOperation::Begin,
            StoreOperation::Put {
                key: "a".into(),
                value: 1,
            },
            StoreOperation::Commit,
        ]);

        assert_eq!(harness.steps(), 3);
        assert_eq!(harness.store().get("a"), Some(1));
        assert_eq!(harness.model().committed().get("a"), Some(&1));
    }

    #[test]
    fn harness_reports_rejections() {
        let mut harness = DifferentialHarness::new();
        let outcome = harness.apply(&StoreOperation::Rollback);
        assert_eq!(outcome, Outcome::Rejected(CoreError::NoActiveTransaction));
    }

    #[test]
    fn store_getter_reflects_applied_ops() {
        let mut harness = DifferentialHarness::new();
        harness.apply(&StoreOperation::Begin);
        assert!(harness.store().in_transaction());
        assert_eq!(harness.store().pending_len(), 0);

        harness.apply(&StoreOperation::Rollback);
        assert!(!harness.store().in_transaction());
        assert_eq!(harness.store().stats().transactions_rolled_back(), 1);
    }
}
