//! Well-known role name constants.
//!
//! These must match the seed data in `20260301000002_create_users.sql`.

use crate::types::DbId;

pub const ROLE_STUDENT: &str = "student";
pub const ROLE_AUTHOR: &str = "author";

/// Seeded `roles.id` for [`ROLE_STUDENT`].
pub const ROLE_STUDENT_ID: i16 = 1;
/// Seeded `roles.id` for [`ROLE_AUTHOR`].
pub const ROLE_AUTHOR_ID: i16 = 2;

/// Map a role name from a registration request to its seeded id.
pub fn role_id_for(name: &str) -> Option<i16> {
    match name {
        ROLE_STUDENT => Some(ROLE_STUDENT_ID),
        ROLE_AUTHOR => Some(ROLE_AUTHOR_ID),
        _ => None,
    }
}

/// Identity handed to the domain layer by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: DbId,
    pub role: String,
}

impl Actor {
    pub fn is_author(&self) -> bool {
        self.role == ROLE_AUTHOR
    }
}
