//! Domain logic for the course marketplace.
//!
//! Everything in this crate is pure: no database access, no I/O. The `db`
//! and `api` crates call into these helpers to validate input, compute
//! derived values, and drive the explicit state machines.

pub mod course;
pub mod error;
pub mod ordering;
pub mod policy;
pub mod progress;
pub mod review;
pub mod roles;
pub mod status;
pub mod submission;
pub mod types;
pub mod unlock;
pub mod wallet;
