//! Domain events emitted to the message broker and the schemas they must satisfy.
//!
//! Each payload type implements [`EventSchema`], which ties it to its registered
//! [`EventType`]. [`EventEnvelope::seal`] validates the payload before it can be dispatched,
//! so a payload that violates its schema never reaches a publisher.

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use papdaew_domain::user::{AuthProvider, UserRole};

use crate::error::AuthServiceError;

/// Value of `metadata.service` on every envelope.
pub const SERVICE_NAME: &str = "auth-service";

/// Queue consumed by the notification service.
pub const EMAIL_NOTIFICATIONS_QUEUE: &str = "email_notifications";

/// Queue consumed by services that mirror user records.
pub const USER_CREATION_QUEUE: &str = "user_creation";

/// Current `USER_CREATED` payload version.
pub const USER_CREATED_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    UserCreated,
    EmailNotification,
}

impl EventType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UserCreated => "USER_CREATED",
            Self::EmailNotification => "EMAIL_NOTIFICATION",
        }
    }
}

/// A payload registered under an [`EventType`].
pub trait EventSchema: Serialize + Validate {
    const EVENT_TYPE: EventType;
}

/// Public attributes of a newly created account. Never carries credentials.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserCreatedEvent {
    pub id: Uuid,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub username: String,
    pub role: UserRole,
    pub provider: AuthProvider,
    pub is_verified: bool,
    #[serde(serialize_with = "papdaew_core::serde::to_rfc3339_ms")]
    pub timestamp: DateTime<Utc>,
    #[validate(range(min = 1))]
    pub version: u32,
}

impl EventSchema for UserCreatedEvent {
    const EVENT_TYPE: EventType = EventType::UserCreated;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmailNotificationKind {
    Welcome,
    Verification,
    ResetPassword,
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmailNotificationData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub verification_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub reset_url: Option<String>,
}

/// Request for the notification service to send an email.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct EmailNotificationEvent {
    #[serde(rename = "type")]
    pub kind: EmailNotificationKind,
    #[validate(email)]
    pub recipient: String,
    #[validate(nested)]
    pub data: EmailNotificationData,
    #[serde(serialize_with = "papdaew_core::serde::to_rfc3339_ms")]
    pub timestamp: DateTime<Utc>,
}

impl EmailNotificationEvent {
    /// A `VERIFICATION` email pointing at `verification_url`.
    pub fn verification(recipient: &str, username: &str, verification_url: String) -> Self {
        Self {
            kind: EmailNotificationKind::Verification,
            recipient: recipient.to_owned(),
            data: EmailNotificationData {
                username: Some(username.to_owned()),
                verification_url: Some(verification_url),
                reset_url: None,
            },
            timestamp: Utc::now(),
        }
    }
}

impl EventSchema for EmailNotificationEvent {
    const EVENT_TYPE: EventType = EventType::EmailNotification;
}

#[derive(Debug, Clone, Serialize)]
pub struct EventMetadata {
    #[serde(serialize_with = "papdaew_core::serde::to_rfc3339_ms")]
    pub timestamp: DateTime<Utc>,
    pub service: String,
}

/// Wire shape: `{"type", "data", "metadata": {"timestamp", "service"}}`.
#[derive(Debug, Clone, Serialize)]
pub struct EventEnvelope {
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub data: serde_json::Value,
    pub metadata: EventMetadata,
}

impl EventEnvelope {
    /// Validate `event` against its schema and wrap it for dispatch.
    pub fn seal<E: EventSchema>(event: &E) -> Result<Self, AuthServiceError> {
        event.validate()?;
        let data = serde_json::to_value(event).context("serialize event payload")?;
        Ok(Self {
            event_type: E::EVENT_TYPE,
            data,
            metadata: EventMetadata {
                timestamp: Utc::now(),
                service: SERVICE_NAME.to_owned(),
            },
        })
    }
}

/// `{api_url}/auth/verify-email/{token}`.
pub fn verification_url(api_url: &str, token: &str) -> String {
    format!("{}/auth/verify-email/{token}", api_url.trim_end_matches('/'))
}
