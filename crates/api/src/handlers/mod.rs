//! HTTP handlers, one module per resource.

pub mod assignments;
pub mod auth;
pub mod courses;
pub mod forum;
pub mod materials;
pub mod me;
pub mod reviews;
pub mod submissions;
pub mod syllabuses;
