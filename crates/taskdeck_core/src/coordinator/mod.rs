//! Coordination between the task store and presentation state.
//!
//! # Responsibility
//! - Hold the single UI state and keep it in sync with store observations.
//! - Expose fire-and-forget task commands to the presentation layer.
//!
//! # Invariants
//! - State is updated only by replacement, never partial external mutation.
//! - Dropping the coordinator cancels the observation and every in-flight
//!   command together; no state update is delivered after teardown.

pub mod task_coordinator;
