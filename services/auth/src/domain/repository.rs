#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use papdaew_domain::permission::Permission;

use crate::domain::events::EventEnvelope;
use crate::domain::types::{NewUser, StoredCredentials, User, UserChanges};
use crate::error::AuthServiceError;

/// Persistent store for user identities.
///
/// Email and username uniqueness is enforced by storage; `create` reports a violation as
/// [`AuthServiceError::UserAlreadyExists`].
pub trait UserRepository: Send + Sync {
    /// `email == email OR username == username`.
    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, AuthServiceError>;

    /// Same predicate as [`Self::find_by_email_or_username`], returning only what login needs.
    async fn find_credentials(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<StoredCredentials>, AuthServiceError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthServiceError>;

    /// Find the user holding `digest`. With `valid_at`, only matches whose expiry is
    /// strictly after it.
    async fn find_by_verification_digest(
        &self,
        digest: &str,
        valid_at: Option<DateTime<Utc>>,
    ) -> Result<Option<User>, AuthServiceError>;

    async fn create(&self, user: &NewUser) -> Result<User, AuthServiceError>;

    async fn update(&self, id: Uuid, changes: &UserChanges) -> Result<User, AuthServiceError>;
}

/// Store for default permission grants.
pub trait PermissionRepository: Send + Sync {
    /// Grant all `permissions` in one batch; existing `(user_id, permission)` pairs are kept.
    async fn grant(&self, user_id: Uuid, permissions: &[Permission])
    -> Result<(), AuthServiceError>;
}

/// At-least-once delivery of sealed events to a named destination.
pub trait EventPublisher: Send + Sync {
    async fn dispatch(
        &self,
        destination: &str,
        envelope: &EventEnvelope,
    ) -> Result<(), AuthServiceError>;
}
