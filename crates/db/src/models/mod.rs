//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) where the entity is editable

pub mod assignment;
pub mod course;
pub mod enrollment;
pub mod forum_post;
pub mod progress;
pub mod review;
pub mod submission;
pub mod syllabus;
pub mod syllabus_material;
pub mod topup;
pub mod user;
