use chrono::Utc;
use uuid::Uuid;
use validator::ValidateEmail;

use papdaew_domain::permission::default_permissions;
use papdaew_domain::user::{AuthProvider, UserRole};

use crate::domain::events::{
    EMAIL_NOTIFICATIONS_QUEUE, EmailNotificationEvent, USER_CREATED_VERSION, USER_CREATION_QUEUE,
    UserCreatedEvent, verification_url,
};
use crate::domain::repository::{EventPublisher, PermissionRepository, UserRepository};
use crate::domain::types::{NewUser, PublicUser, User};
use crate::error::AuthServiceError;
use crate::security::password::CredentialHasher;
use crate::security::verification_token::VerificationToken;
use crate::usecase::publish::publish_direct;

/// Raw signup request. Optional fields are filled in by [`SignupInput::normalize`].
#[derive(Debug, Clone, Default)]
pub struct SignupInput {
    pub email: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub provider: AuthProvider,
    pub provider_id: Option<String>,
}

/// Signup request with every default applied and every rule checked.
#[derive(Debug, Clone)]
pub struct NormalizedSignup {
    pub email: String,
    pub username: String,
    /// Always `Some` for local signups, always `None` otherwise.
    pub password: Option<String>,
    pub role: UserRole,
    pub provider: AuthProvider,
    pub provider_id: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

impl SignupInput {
    pub fn normalize(self) -> Result<NormalizedSignup, AuthServiceError> {
        let email = self.email.trim().to_lowercase();
        let username = non_empty(self.username).unwrap_or_else(|| {
            email
                .split_once('@')
                .map_or(email.as_str(), |(local, _)| local)
                .to_owned()
        });
        let (password, provider_id) = match self.provider {
            AuthProvider::Local => (self.password.filter(|p| !p.is_empty()), None),
            AuthProvider::Google => (None, non_empty(self.provider_id)),
        };

        let signup = NormalizedSignup {
            email,
            username,
            password,
            role: self.role.unwrap_or_default(),
            provider: self.provider,
            provider_id,
        };
        signup.check()?;
        Ok(signup)
    }
}

impl NormalizedSignup {
    /// A Google account only matches the one registered under the same Google subject id.
    pub fn is_same_google_identity(&self, existing: &User) -> bool {
        self.provider == AuthProvider::Google
            && existing.provider == AuthProvider::Google
            && self.provider_id.is_some()
            && existing.provider_id == self.provider_id
    }

    fn check(&self) -> Result<(), AuthServiceError> {
        if !self.email.validate_email() {
            return Err(AuthServiceError::InvalidInput(
                "A valid email address is required".to_owned(),
            ));
        }
        if self.username.is_empty() {
            return Err(AuthServiceError::InvalidInput(
                "Username must not be empty".to_owned(),
            ));
        }
        match self.provider {
            AuthProvider::Local if self.password.is_none() => Err(AuthServiceError::InvalidInput(
                "Password is required".to_owned(),
            )),
            AuthProvider::Google if self.provider_id.is_none() => {
                Err(AuthServiceError::InvalidInput(
                    "Provider id is required for Google sign-in".to_owned(),
                ))
            }
            _ => Ok(()),
        }
    }
}

pub struct SignupUseCase<U, P, E>
where
    U: UserRepository,
    P: PermissionRepository,
    E: EventPublisher,
{
    pub users: U,
    pub permissions: P,
    pub events: E,
    pub hasher: CredentialHasher,
    pub api_url: String,
}

impl<U, P, E> SignupUseCase<U, P, E>
where
    U: UserRepository,
    P: PermissionRepository,
    E: EventPublisher,
{
    pub async fn execute(&self, input: SignupInput) -> Result<PublicUser, AuthServiceError> {
        let signup = input.normalize()?;

        if let Some(existing) = self
            .users
            .find_by_email_or_username(&signup.email, &signup.username)
            .await?
        {
            if signup.is_same_google_identity(&existing) {
                return Ok(existing.into_public());
            }
            tracing::warn!(user_id = %existing.id, "signup rejected: user already exists");
            return Err(AuthServiceError::UserAlreadyExists);
        }

        let now = Utc::now();
        let token = VerificationToken::generate();
        let password_digest = match &signup.password {
            Some(password) => Some(self.hasher.hash(password).await?),
            None => None,
        };

        let user = self
            .users
            .create(&NewUser {
                id: Uuid::new_v4(),
                email: signup.email,
                username: signup.username,
                password_digest,
                role: signup.role,
                provider: signup.provider,
                provider_id: signup.provider_id,
                pending_verification: token.pending(now),
                created_at: now,
            })
            .await?;

        self.seed_permissions(&user).await;
        self.publish_created(&user, &token).await?;

        tracing::info!(user_id = %user.id, role = %user.role, provider = %user.provider, "user signed up");
        Ok(user.into_public())
    }

    async fn seed_permissions(&self, user: &User) {
        let permissions = default_permissions(user.role);
        if let Err(e) = self.permissions.grant(user.id, permissions).await {
            tracing::warn!(user_id = %user.id, error = %e, "default permission seeding failed");
        }
    }

    async fn publish_created(
        &self,
        user: &User,
        token: &VerificationToken,
    ) -> Result<(), AuthServiceError> {
        let email = EmailNotificationEvent::verification(
            &user.email,
            &user.username,
            verification_url(&self.api_url, &token.plaintext),
        );
        publish_direct(
            &self.events,
            EMAIL_NOTIFICATIONS_QUEUE,
            &email,
            "Verification email queued successfully",
        )
        .await?;

        let created = UserCreatedEvent {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            role: user.role,
            provider: user.provider,
            is_verified: user.is_verified,
            timestamp: Utc::now(),
            version: USER_CREATED_VERSION,
        };
        publish_direct(
            &self.events,
            USER_CREATION_QUEUE,
            &created,
            "User creation event published successfully",
        )
        .await
    }
}
