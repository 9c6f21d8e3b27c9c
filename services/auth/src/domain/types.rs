use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use papdaew_domain::user::{AuthProvider, UserRole};

/// Outstanding email verification: digest of the mailed token and its deadline.
///
/// Stored as two nullable columns that are always written together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingVerification {
    pub token_digest: String,
    pub expires_at: DateTime<Utc>,
}

impl PendingVerification {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// A registered identity as stored.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    /// Present iff `provider == Local`.
    pub password_digest: Option<String>,
    pub role: UserRole,
    pub provider: AuthProvider,
    pub provider_id: Option<String>,
    pub is_verified: bool,
    /// Always `None` once `is_verified` is set.
    pub pending_verification: Option<PendingVerification>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn into_public(self) -> PublicUser {
        PublicUser {
            id: self.id,
            email: self.email,
            username: self.username,
            role: self.role,
            provider: self.provider,
            provider_id: self.provider_id,
            is_verified: self.is_verified,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// User attributes safe to hand to clients and downstream services.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub role: UserRole,
    pub provider: AuthProvider,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    pub is_verified: bool,
    #[serde(serialize_with = "papdaew_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "papdaew_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

/// Minimal projection used by login: just enough to check a password.
#[derive(Debug, Clone)]
pub struct StoredCredentials {
    pub id: Uuid,
    pub password_digest: Option<String>,
    pub provider: AuthProvider,
}

/// Fully-populated record handed to the repository on signup.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub password_digest: Option<String>,
    pub role: UserRole,
    pub provider: AuthProvider,
    pub provider_id: Option<String>,
    pub pending_verification: PendingVerification,
    pub created_at: DateTime<Utc>,
}

/// Partial update applied by [`crate::domain::repository::UserRepository::update`].
/// `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub is_verified: Option<bool>,
    pub pending_verification: Option<Option<PendingVerification>>,
}

impl UserChanges {
    /// Flip `is_verified` and clear both verification columns.
    pub fn mark_verified() -> Self {
        Self {
            is_verified: Some(true),
            pending_verification: Some(None),
        }
    }

    /// Replace the outstanding verification, invalidating the previous token.
    pub fn replace_verification(pending: PendingVerification) -> Self {
        Self {
            is_verified: None,
            pending_verification: Some(Some(pending)),
        }
    }

    pub fn apply(&self, user: &mut User, now: DateTime<Utc>) {
        if let Some(is_verified) = self.is_verified {
            user.is_verified = is_verified;
        }
        if let Some(pending) = &self.pending_verification {
            user.pending_verification = pending.clone();
        }
        user.updated_at = now;
    }
}

/// Profile attributes extracted from a completed Google OAuth handshake.
#[derive(Debug, Clone)]
pub struct GoogleProfile {
    pub email: String,
    pub provider_id: String,
}

/// Verification token lifetime in seconds (24 hours).
pub const VERIFICATION_TOKEN_TTL_SECS: i64 = 86_400;

/// Random bytes in a verification token (hex-encoded to 64 characters).
pub const VERIFICATION_TOKEN_BYTES: usize = 32;
