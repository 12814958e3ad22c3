//! Background delivery of platform events to course instructors.

pub mod router;

pub use router::NotificationRouter;
