//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the canonical task record and its pre-insert draft shape.
//! - Hold the fixed category labels recognized by the application.
//!
//! # Invariants
//! - `TaskId` is assigned by the store at creation and never reused.
//! - Category membership is plain string equality, no referential constraint.

pub mod task;
