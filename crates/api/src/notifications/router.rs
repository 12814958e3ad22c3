//! Event-to-email routing.
//!
//! [`NotificationRouter`] subscribes to the platform event bus and, for each
//! enrollment or submission, emails the course's author and co-instructors.
//! Delivery happens after the originating transaction has committed, so a
//! failed email never affects the enrollment or submission itself.

use coursehub_db::repositories::CourseInstructorRepo;
use coursehub_db::DbPool;
use coursehub_events::delivery::email::compose;
use coursehub_events::{EmailDelivery, PlatformEvent};
use tokio::sync::broadcast;

pub struct NotificationRouter {
    pool: DbPool,
    /// `None` when SMTP is not configured; events are then only logged.
    delivery: Option<EmailDelivery>,
}

impl NotificationRouter {
    pub fn new(pool: DbPool, delivery: Option<EmailDelivery>) -> Self {
        Self { pool, delivery }
    }

    /// Consume events until the [`EventBus`](coursehub_events::EventBus) is
    /// dropped.
    pub async fn run(self, mut receiver: broadcast::Receiver<PlatformEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = self.route_event(&event).await {
                        tracing::error!(
                            error = %e,
                            event_type = %event.event_type,
                            "Failed to route event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification router shutting down");
                    break;
                }
            }
        }
    }

    async fn route_event(
        &self,
        event: &PlatformEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let Some(content) = compose(event) else {
            return Ok(());
        };
        let Some(delivery) = &self.delivery else {
            tracing::debug!(
                event_type = %event.event_type,
                subject = %content.subject,
                "SMTP not configured, skipping email"
            );
            return Ok(());
        };
        let Some(course_id) = event.payload_id("course_id") else {
            return Err(format!("{} event without course_id", event.event_type).into());
        };

        let recipients = CourseInstructorRepo::recipient_emails(&self.pool, course_id).await?;
        for email in &recipients {
            // One bad address must not starve the rest.
            if let Err(e) = delivery.deliver(email, &content).await {
                tracing::warn!(error = %e, to = %email, course_id, "Email delivery failed");
            }
        }

        tracing::debug!(
            event_type = %event.event_type,
            course_id,
            recipients = recipients.len(),
            "Notification routed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use coursehub_events::{event_types, EventBus};

    use super::*;

    fn lazy_pool() -> DbPool {
        DbPool::connect_lazy("postgres://localhost/unused").unwrap()
    }

    #[tokio::test]
    async fn stops_when_bus_is_dropped() {
        let bus = EventBus::default();
        let handle = tokio::spawn(NotificationRouter::new(lazy_pool(), None).run(bus.subscribe()));

        bus.publish(
            PlatformEvent::new(event_types::ENROLLMENT_CREATED)
                .with_payload(serde_json::json!({ "course_id": 1 })),
        );
        drop(bus);

        tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .expect("router did not stop")
            .unwrap();
    }

    #[tokio::test]
    async fn without_smtp_events_are_skipped() {
        let router = NotificationRouter::new(lazy_pool(), None);
        let event = PlatformEvent::new(event_types::SUBMISSION_CREATED);
        assert!(router.route_event(&event).await.is_ok());
    }

    #[tokio::test]
    async fn unknown_events_are_ignored() {
        let router = NotificationRouter::new(lazy_pool(), None);
        assert!(router.route_event(&PlatformEvent::new("course.viewed")).await.is_ok());
    }
}
