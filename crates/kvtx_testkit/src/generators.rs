//! Property-based test generators using proptest.
//!
//! Keys are drawn from a deliberately small alphabet so generated operation
//! sequences keep hitting the same keys: overwrites inside a transaction,
//! overwrites of committed values, and rollbacks over existing keys.

use kvtx_core::Value;
use proptest::prelude::*;

/// Strategy for generating keys from a small key space.
pub fn key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-e]{1,2}").expect("Invalid regex")
}

/// Strategy for generating values, edge cases included.
pub fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        4 => any::<Value>(),
        1 => Just(0),
        1 => Just(Value::MIN),
        1 => Just(Value::MAX),
    ]
}

/// Strategy for generating committed key/value pairs.
pub fn committed_pairs_strategy(max: usize) -> impl Strategy<Value = Vec<(String, Value)>> {
    prop::collection::vec((key_strategy(), value_strategy()), 0..max)
}

/// A single call against the store's public surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOperation {
    /// Read a committed value.
    Get {
        /// Key to read.
        key: String,
    },
    /// Buffer a write.
    Put {
        /// Key to write.
        key: String,
        /// Value to write.
        value: Value,
    },
    /// Start a transaction.
    Begin,
    /// Commit the active transaction.
    Commit,
    /// Roll back the active transaction.
    Rollback,
}

/// Strategy for generating store operations.
///
/// Weighted toward `Put` and `Get`, with enough state-changing calls that
/// both legal and illegal transitions show up in most sequences.
pub fn store_operation_strategy() -> impl Strategy<Value = StoreOperation> {
    prop_oneof![
        4 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| StoreOperation::Put { key, value }),
        3 => key_strategy().prop_map(|key| StoreOperation::Get { key }),
        2 => Just(StoreOperation::Begin),
        1 => Just(StoreOperation::Commit),
        1 => Just(StoreOperation::Rollback),
    ]
}

/// Strategy for generating a sequence of operations.
pub fn operation_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<StoreOperation>> {
    prop::collection::vec(store_operation_strategy(), min_ops..max_ops)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
