//! Task store contract and persistence implementations.
//!
//! # Responsibility
//! - Define the live-query store contract the coordinator depends on.
//! - Isolate SQLite details from coordination and presentation code.
//!
//! # Invariants
//! - Every successful write publishes a fresh complete snapshot to all
//!   observers.
//! - Snapshot order is insertion (primary-key) order and stays stable across
//!   updates.

pub mod memory;
pub mod task_store;
