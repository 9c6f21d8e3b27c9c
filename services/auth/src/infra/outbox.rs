use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection};
use uuid::Uuid;

use papdaew_auth_schema::outbox_events;

use crate::domain::events::EventEnvelope;
use crate::domain::repository::EventPublisher;
use crate::error::AuthServiceError;

/// Publishes by appending to `outbox_events`; a relay drains the table to the broker and
/// retries until each row is acknowledged.
#[derive(Clone)]
pub struct OutboxEventPublisher {
    pub db: DatabaseConnection,
}

impl EventPublisher for OutboxEventPublisher {
    async fn dispatch(
        &self,
        destination: &str,
        envelope: &EventEnvelope,
    ) -> Result<(), AuthServiceError> {
        let id = Uuid::new_v4();
        let kind = envelope.event_type.as_str();
        let payload = serde_json::to_value(envelope).context("serialize event envelope")?;
        let now = Utc::now();

        outbox_events::ActiveModel {
            id: Set(id),
            destination: Set(destination.to_owned()),
            kind: Set(kind.to_owned()),
            payload: Set(payload),
            idempotency_key: Set(format!("{kind}:{id}")),
            attempts: Set(0),
            last_error: Set(None),
            created_at: Set(now),
            next_attempt_at: Set(now),
            processed_at: Set(None),
            failed_at: Set(None),
        }
        .insert(&self.db)
        .await
        .with_context(|| format!("enqueue {kind} event for {destination}"))?;
        Ok(())
    }
}
