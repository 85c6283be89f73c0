//! Single-level transactions.
//!
//! A transaction buffers writes in a keyed map until the store commits or
//! rolls it back:
//! - **Atomicity**: a commit merges the whole buffer, a rollback drops it
//! - **Isolation**: committed reads never see buffered writes
//! - **No nesting**: the store holds at most one transaction

mod state;

pub use state::Transaction;
