//! Transactional use cases shared by the HTTP handlers.
//!
//! Each function takes the pool (and the event bus where it publishes),
//! runs its checks and writes, and returns [`AppResult`](crate::error::AppResult).
//! Multi-statement writes run in a single transaction; events are published
//! only after commit.

pub mod access;
pub mod accounts;
pub mod content;
pub mod courses;
pub mod enrollment;
pub mod progress;
pub mod reviews;
pub mod submissions;
pub mod wallet;
