//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Reads take `&PgPool` or any `PgExecutor` so services can reuse them inside
//! a transaction; writes that only make sense inside a transaction take
//! `&mut PgConnection`.

pub mod assignment_repo;
pub mod course_instructor_repo;
pub mod course_repo;
pub mod enrollment_repo;
pub mod forum_post_repo;
pub mod progress_repo;
pub mod review_repo;
pub mod submission_repo;
pub mod syllabus_material_repo;
pub mod syllabus_repo;
pub mod topup_repo;
pub mod user_assignment_repo;
pub mod user_repo;

pub use assignment_repo::AssignmentRepo;
pub use course_instructor_repo::CourseInstructorRepo;
pub use course_repo::CourseRepo;
pub use enrollment_repo::EnrollmentRepo;
pub use forum_post_repo::ForumPostRepo;
pub use progress_repo::ProgressRepo;
pub use review_repo::ReviewRepo;
pub use submission_repo::SubmissionRepo;
pub use syllabus_material_repo::SyllabusMaterialRepo;
pub use syllabus_repo::SyllabusRepo;
pub use topup_repo::TopupRepo;
pub use user_assignment_repo::UserAssignmentRepo;
pub use user_repo::UserRepo;
