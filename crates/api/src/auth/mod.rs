//! Authentication primitives.
//!
//! - [`password`]: Argon2id hashing and verification.
//! - [`jwt`]: access-token generation and validation.

pub mod jwt;
pub mod password;
