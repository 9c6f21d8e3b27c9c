use sea_orm::DatabaseConnection;

use crate::config::AuthConfig;
use crate::infra::db::{DbPermissionRepository, DbUserRepository};
use crate::infra::outbox::OutboxEventPublisher;
use crate::security::password::CredentialHasher;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    pub session_ttl_secs: u64,
    /// Base of verification links.
    pub api_url: String,
    pub secure_cookies: bool,
    pub hasher: CredentialHasher,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: &AuthConfig, hasher: CredentialHasher) -> Self {
        Self {
            db,
            jwt_secret: config.jwt_secret.clone(),
            session_ttl_secs: config.jwt_expires_in_secs,
            api_url: config.api_url.clone(),
            secure_cookies: config.is_production(),
            hasher,
        }
    }

    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn permission_repo(&self) -> DbPermissionRepository {
        DbPermissionRepository {
            db: self.db.clone(),
        }
    }

    pub fn event_publisher(&self) -> OutboxEventPublisher {
        OutboxEventPublisher {
            db: self.db.clone(),
        }
    }
}
