//! Property tests for the transactional store.

use kvtx_core::{CoreError, StoreState, TransactionalStore};
use kvtx_testkit::prelude::*;
use proptest::prelude::*;

proptest! {
    #![proptest_config(PropTestConfig::default().to_proptest_config())]

    #[test]
    fn store_agrees_with_model(ops in operation_sequence_strategy(0, 64)) {
        let mut harness = DifferentialHarness::new();
        harness.run(&ops);
        prop_assert_eq!(harness.steps(), ops.len());
    }

    #[test]
    fn unwritten_keys_are_absent(
        pairs in committed_pairs_strategy(8),
        probe in "[f-z]{1,4}",
    ) {
        let store = store_with(pairs);
        prop_assert_eq!(store.get(&probe), None);
    }

    #[test]
    fn commit_publishes_value(
        pairs in committed_pairs_strategy(8),
        key in key_strategy(),
        value in value_strategy(),
    ) {
        let mut store = store_with(pairs);
        store.begin_transaction().unwrap();
        store.put(key.clone(), value).unwrap();
        store.commit().unwrap();
        prop_assert_eq!(store.get(&key), Some(value));
    }

    #[test]
    fn rollback_leaves_value_unchanged(
        pairs in committed_pairs_strategy(8),
        key in key_strategy(),
        value in value_strategy(),
    ) {
        let mut store = store_with(pairs);
        let before = store.get(&key);

        store.begin_transaction().unwrap();
        store.put(key.clone(), value).unwrap();
        store.rollback().unwrap();

        prop_assert_eq!(store.get(&key), before);
    }

    #[test]
    fn empty_rollbacks_leave_store_identical(pairs in committed_pairs_strategy(8)) {
        let mut store = store_with(pairs);
        let before = store.snapshot();

        for _ in 0..2 {
            store.begin_transaction().unwrap();
            store.rollback().unwrap();
        }

        prop_assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn last_write_wins_within_transaction(
        key in key_strategy(),
        values in prop::collection::vec(value_strategy(), 1..8),
    ) {
        let mut store = TransactionalStore::new();
        store.begin_transaction().unwrap();
        for value in &values {
            store.put(key.clone(), *value).unwrap();
        }
        prop_assert_eq!(store.pending_len(), 1);
        store.commit().unwrap();

        prop_assert_eq!(store.get(&key), values.last().copied());
    }

    #[test]
    fn pending_writes_are_invisible(
        pairs in committed_pairs_strategy(8),
        writes in committed_pairs_strategy(8),
    ) {
        let mut store = store_with(pairs);
        let before = store.snapshot();

        store.begin_transaction().unwrap();
        for (key, value) in &writes {
            store.put(key.clone(), *value).unwrap();
            prop_assert_eq!(store.get(key), before.get(key).copied());
        }
        prop_assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn rejected_calls_change_nothing(ops in operation_sequence_strategy(0, 32)) {
        let mut store = TransactionalStore::new();
        for op in &ops {
            let snapshot = store.snapshot();
            let state = store.state();
            let pending = store.pending_len();
            let stats = store.stats();

            if let Outcome::Rejected(err) = apply_to_store(&mut store, op) {
                prop_assert_eq!(err.raised_in(), state);
                prop_assert_eq!(store.snapshot(), snapshot);
                prop_assert_eq!(store.state(), state);
                prop_assert_eq!(store.pending_len(), pending);
                prop_assert_eq!(store.stats(), stats);
            }
        }
    }

    #[test]
    fn buffer_empty_whenever_idle(ops in operation_sequence_strategy(0, 48)) {
        let mut store = TransactionalStore::new();
        for op in &ops {
            apply_to_store(&mut store, op);
            if store.state() == StoreState::Idle {
                prop_assert_eq!(store.pending_len(), 0);
                prop_assert_eq!(store.current_transaction(), None);
            }
        }
    }

    #[test]
    fn stats_follow_transitions(ops in operation_sequence_strategy(0, 48)) {
        let mut store = TransactionalStore::new();
        let mut writes = 0;
        for op in &ops {
            let outcome = apply_to_store(&mut store, op);
            if matches!(op, StoreOperation::Put { .. }) && outcome == Outcome::Done {
                writes += 1;
            }
        }
        let stats = store.stats();
        prop_assert_eq!(stats.writes(), writes);
        prop_assert_eq!(
            stats.transactions_open(),
            u64::from(store.in_transaction())
        );
    }
}

#[test]
fn state_guards() {
    let mut store = TransactionalStore::new();
    assert_eq!(store.put("k", 1), Err(CoreError::NoActiveTransaction));
    assert_eq!(store.commit(), Err(CoreError::NoActiveTransaction));
    assert_eq!(store.rollback(), Err(CoreError::NoActiveTransaction));

    store.begin_transaction().unwrap();
    assert_eq!(
        store.begin_transaction(),
        Err(CoreError::TransactionAlreadyActive)
    );
}
