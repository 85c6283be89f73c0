//! Test fixtures and store helpers.
//!
//! Provides convenience functions for setting up stores with committed
//! data and for running code inside a transaction.

use crate::generators::StoreOperation;
use crate::model::Outcome;
use kvtx_core::{CoreError, CoreResult, TransactionalStore, Value};

/// Creates a store whose committed data holds the given pairs.
///
/// Pairs are written in one transaction, so a repeated key keeps its last
/// value. The returned store is idle.
pub fn store_with<I, K>(pairs: I) -> TransactionalStore
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    let mut store = TransactionalStore::new();
    store
        .begin_transaction()
        .expect("fresh store should be idle");
    for (key, value) in pairs {
        store.put(key, value).expect("transaction should be active");
    }
    store.commit().expect("transaction should be active");
    store
}

/// Runs `f` inside a transaction and commits if it succeeds.
///
/// On error the transaction is rolled back and the error returned.
pub fn in_transaction<F, R>(store: &mut TransactionalStore, f: F) -> CoreResult<R>
where
    F: FnOnce(&mut TransactionalStore) -> CoreResult<R>,
{
    store.begin_transaction()?;
    match f(store) {
        Ok(result) => {
            store.commit()?;
            Ok(result)
        }
        Err(err) => {
            // The closure may already have ended the transaction.
            if store.in_transaction() {
                store.rollback()?;
            }
            Err(err)
        }
    }
}

/// Runs a test with a fresh store.
///
/// # Example
///
/// ```rust
/// use kvtx_testkit::with_store;
///
/// with_store(|store| {
///     assert!(store.is_empty());
/// });
/// ```
pub fn with_store<F, R>(f: F) -> R
where
    F: FnOnce(&mut TransactionalStore) -> R,
{
    let mut store = TransactionalStore::new();
    f(&mut store)
}

/// The reference demonstration sequence, each step paired with the outcome
/// a fresh store must produce.
///
/// Reads of missing keys, writes outside a transaction, a buffered write
/// that stays invisible, an overwrite followed by commit, commit and
/// rollback while idle, and a rolled back write that never lands.
pub fn reference_scenario() -> Vec<(StoreOperation, Outcome)> {
    let get = |key: &str| StoreOperation::Get { key: key.into() };
    let put = |key: &str, value: Value| StoreOperation::Put {
        key: key.into(),
        value,
    };
    let idle = Outcome::Rejected(CoreError::NoActiveTransaction);

    vec![
        (get("A"), Outcome::Read(None)),
        (put("A", 5), idle.clone()),
        (StoreOperation::Begin, Outcome::Done),
        (put("A", 5), Outcome::Done),
        (get("A"), Outcome::Read(None)),
        (put("A", 6), Outcome::Done),
        (StoreOperation::Commit, Outcome::Done),
        (get("A"), Outcome::Read(Some(6))),
        (StoreOperation::Commit, idle.clone()),
        (StoreOperation::Rollback, idle),
        (get("B"), Outcome::Read(None)),
        (StoreOperation::Begin, Outcome::Done),
        (put("B", 10), Outcome::Done),
        (StoreOperation::Rollback, Outcome::Done),
        (get("B"), Outcome::Read(None)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::apply_to_store;

    #[test]
    fn store_with_commits_pairs() {
        let store = store_with([("a", 1), ("b", 2), ("a", 3)]);
        assert_eq!(store.get("a"), Some(3));
        assert_eq!(store.get("b"), Some(2));
        assert!(!store.in_transaction());
    }

    #[test]
    fn in_transaction_commits_on_success() {
        let mut store = TransactionalStore::new();
        in_transaction(&mut store, |s| s.put("k", 7)).unwrap();
        assert_eq!(store.get("k"), Some(7));
    }

    #[test]
    fn in_transaction_rolls_back_on_error() {
        let mut store = store_with([("k", 1)]);
        let result: CoreResult<()> = in_transaction(&mut store, |s| {
            s.put("k", 2)?;
            s.begin_transaction()
        });

        assert_eq!(result, Err(CoreError::TransactionAlreadyActive));
        assert_eq!(store.get("k"), Some(1));
        assert!(!store.in_transaction());
    }

    #[test]
    fn reference_scenario_replays_on_fresh_store() {
        let mut store = TransactionalStore::new();
        for (idx, (op, expected)) in reference_scenario().iter().enumerate() {
            let actual = apply_to_store(&mut store, op);
            assert_eq!(&actual, expected, "step {} ({:?})", idx + 1, op);
        }

        let committed: Vec<_> = store.snapshot().into_iter().collect();
        assert_eq!(committed, vec![("A".to_string(), 6)]);
        assert!(!store.in_transaction());
    }

    #[test]
    fn reference_scenario_shape() {
        let steps = reference_scenario();
        assert_eq!(steps.len(), 15);

        let rejected = steps
            .iter()
            .filter(|(_, outcome)| matches!(outcome, Outcome::Rejected(_)))
            .count();
        assert_eq!(rejected, 3);
    }

    #[test]
    fn with_store_starts_empty() {
        let len = with_store(|store| store.len());
        assert_eq!(len, 0);
    }
}
