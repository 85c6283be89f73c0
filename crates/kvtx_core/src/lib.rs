//! # kvtx Core
//!
//! In-memory key-value store with a single-level transaction wrapper.
//!
//! This crate provides:
//! - A committed string-to-integer map read by `get`
//! - A pending-write buffer filled by `put` inside a transaction
//! - `begin_transaction` / `commit` / `rollback` with explicit state errors
//! - Transition counters and read-only diagnostics
//!
//! Nothing is persisted and only one transaction can be active per store.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod stats;
mod store;
mod transaction;
mod types;

pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use stats::StoreStats;
pub use store::TransactionalStore;
pub use types::{StoreState, TransactionId, Value};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
