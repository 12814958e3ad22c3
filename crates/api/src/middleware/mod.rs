//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`]: the caller identified by a Bearer token.
//! - [`auth::MaybeAuthUser`]: same, but anonymous callers are allowed.
//! - [`rbac::RequireAuthor`]: requires the `author` role.

pub mod auth;
pub mod rbac;
