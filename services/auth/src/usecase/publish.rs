use crate::domain::events::{EventEnvelope, EventSchema};
use crate::domain::repository::EventPublisher;
use crate::error::AuthServiceError;

/// Validate `event`, dispatch it to `destination` and log `log_message` once accepted.
///
/// A schema violation is returned before anything reaches the publisher.
pub async fn publish_direct<P, E>(
    publisher: &P,
    destination: &str,
    event: &E,
    log_message: &str,
) -> Result<(), AuthServiceError>
where
    P: EventPublisher,
    E: EventSchema,
{
    let envelope = EventEnvelope::seal(event)?;
    publisher.dispatch(destination, &envelope).await?;
    tracing::info!(
        destination,
        event_type = envelope.event_type.as_str(),
        "{log_message}"
    );
    Ok(())
}
