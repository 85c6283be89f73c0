//! # kvtx Testkit
//!
//! Test utilities for kvtx.
//!
//! This crate provides:
//! - Store fixtures with pre-committed data
//! - Property-based test generators using proptest
//! - A reference model of the transaction state machine
//! - A differential harness that drives the store and the model in lockstep
//!
//! ## Usage
//!
//! ```rust
//! use kvtx_testkit::prelude::*;
//!
//! let store = store_with([("a", 1), ("b", 2)]);
//! assert_eq!(store.get("a"), Some(1));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod harness;
pub mod model;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::harness::*;
    pub use crate::model::*;
}

pub use fixtures::*;
pub use generators::*;
pub use harness::*;
pub use model::*;
