//! Course-platform event bus and outbound notification delivery.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`]: the domain event envelope published by services
//!   after their transaction commits.
//! - [`delivery`]: external delivery channels (SMTP email).

pub mod bus;
pub mod delivery;

pub use bus::{event_types, EventBus, PlatformEvent};
pub use delivery::email::{EmailConfig, EmailDelivery};
