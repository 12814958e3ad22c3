//! Email notification delivery via SMTP.
//!
//! [`EmailDelivery`] wraps the `lettre` async SMTP transport. Configuration
//! is loaded from the environment; if `SMTP_HOST` is not set,
//! [`EmailConfig::from_env`] returns `None` and no mailer is constructed.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::bus::{event_types, PlatformEvent};

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_FROM_ADDRESS: &str = "noreply@coursehub.local";

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable        | Required | Default                    |
    /// |-----------------|----------|----------------------------|
    /// | `SMTP_HOST`     | yes      | -                          |
    /// | `SMTP_PORT`     | no       | `587`                      |
    /// | `SMTP_FROM`     | no       | `noreply@coursehub.local`  |
    /// | `SMTP_USER`     | no       | -                          |
    /// | `SMTP_PASSWORD` | no       | -                          |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// Message templates
// ---------------------------------------------------------------------------

/// Subject and plain-text body of a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    pub subject: String,
    pub body: String,
}

/// Render the instructor notification for `event`.
///
/// Returns `None` for event types that do not notify anyone by email.
pub fn compose(event: &PlatformEvent) -> Option<EmailContent> {
    match event.event_type.as_str() {
        event_types::ENROLLMENT_CREATED => {
            let course = event.payload_str("course_title");
            let student = event.payload_str("student_name");
            Some(EmailContent {
                subject: format!("New enrollment in {course}"),
                body: format!(
                    "{student} has enrolled in your course \"{course}\".\n\nEnrolled at: {}",
                    event.timestamp.format("%Y-%m-%d %H:%M UTC")
                ),
            })
        }
        event_types::SUBMISSION_CREATED => {
            let course = event.payload_str("course_title");
            let assignment = event.payload_str("assignment_title");
            let student = event.payload_str("student_name");
            let late = event
                .payload
                .get("is_late")
                .and_then(serde_json::Value::as_bool)
                .unwrap_or(false);
            let lateness = if late { " (late)" } else { "" };
            Some(EmailContent {
                subject: format!("New submission for {assignment}"),
                body: format!(
                    "{student} submitted \"{assignment}\" in \"{course}\"{lateness}.\n\nSubmitted at: {}",
                    event.timestamp.format("%Y-%m-%d %H:%M UTC")
                ),
            })
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// EmailDelivery
// ---------------------------------------------------------------------------

/// Sends notification emails via SMTP.
pub struct EmailDelivery {
    config: EmailConfig,
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailDelivery {
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            mailer: builder.build(),
            config,
        })
    }

    /// Send `content` to a single recipient.
    pub async fn deliver(&self, to_email: &str, content: &EmailContent) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(to_email.parse()?)
            .subject(content.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(content.body.clone())
            .map_err(|e| EmailError::Build(e.to_string()))?;

        self.mailer.send(email).await?;

        tracing::info!(to = to_email, subject = %content.subject, "Notification email sent");
        Ok(())
    }
}
